//! Entry points shared by the thin harness binaries

use env_logger::{Builder, Env};
use log::debug;
use std::process::ExitCode;

use crate::config::{ExecVariant, RelayConfig};
use crate::runner::ProcessRelayRunner;

/// Install a logger that stays silent unless `RUST_LOG` asks for output.
///
/// The harness's stderr is compared against expected files, so nothing may
/// be logged there by default.
pub fn init_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("off")).try_init();
}

/// Relay one variant using the environment-derived configuration.
pub fn run_variant(variant: ExecVariant, input: Option<&str>) -> ExitCode {
    init_logging();
    let config = RelayConfig::from_env();
    exit_code(relay_variant(&config, variant, input))
}

/// Relay one variant with an explicit configuration; returns 0 or 2.
pub fn relay_variant(config: &RelayConfig, variant: ExecVariant, input: Option<&str>) -> i32 {
    let args = variant.arguments(config, input);
    debug!("Variant {:?} resolved to {:?}", variant, args.as_slice());

    match ProcessRelayRunner::from_config(config) {
        Ok(runner) => runner.run(&args),
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}

/// Convert a relay exit code into a process exit code.
pub fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(status_byte(code))
}

fn status_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(u8::MAX)
}
