//! Relay the preprocessor run on the plain notice input

use cmd_relay::ExecVariant;
use std::process::ExitCode;

fn main() -> ExitCode {
    cmd_relay::harness::run_variant(ExecVariant::Plain, None)
}
