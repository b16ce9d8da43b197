//! Relay the preprocessor run in INFORMIX mode

use cmd_relay::ExecVariant;
use std::process::ExitCode;

fn main() -> ExitCode {
    cmd_relay::harness::run_variant(ExecVariant::Informix, None)
}
