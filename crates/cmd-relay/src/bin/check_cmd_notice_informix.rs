//! Relay the preprocessor run in INFORMIX mode on a build-selected input
//!
//! Set `PGC_FILE_NAME` at build time to choose the input file.

use cmd_relay::ExecVariant;
use std::process::ExitCode;

fn main() -> ExitCode {
    cmd_relay::harness::run_variant(ExecVariant::Informix, option_env!("PGC_FILE_NAME"))
}
