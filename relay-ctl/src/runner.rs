use cmd_relay::{ArgumentVector, ExecVariant, ProcessRelayRunner, RelayConfig};
use log::{debug, info};
use std::path::PathBuf;

/// Configuration for one relay run
pub struct RunConfig {
    pub config: RelayConfig,
    pub binary: Option<PathBuf>,
    pub variant: ExecVariant,
    pub input: Option<String>,
}

/// Resolve the final argument vector and runner for `run`.
fn prepare(
    run: RunConfig,
) -> Result<(ProcessRelayRunner, ArgumentVector), Box<dyn std::error::Error>> {
    let mut config = run.config;
    if let Some(binary) = run.binary {
        debug!("Overriding binary: {}", binary.display());
        config.binary = binary;
    }

    config.validate()?;
    let args = run.variant.arguments(&config, run.input.as_deref());
    let runner = ProcessRelayRunner::builder().config(&config).build()?;
    Ok((runner, args))
}

/// Relay a configured variant; returns the relay exit code.
pub fn run_variant(run: RunConfig) -> Result<i32, Box<dyn std::error::Error>> {
    let variant = run.variant;
    let (runner, args) = prepare(run)?;

    info!("Running variant {:?}: {} {:?}", variant, runner.binary().display(), args.as_slice());
    Ok(runner.run(&args))
}

/// Relay an explicit argument vector; returns the relay exit code.
pub fn run_exec(
    config: RelayConfig,
    binary: Option<PathBuf>,
    args: Vec<String>,
) -> Result<i32, Box<dyn std::error::Error>> {
    let args = ArgumentVector::new(args)?;
    let binary = binary.unwrap_or(config.binary);
    let runner = ProcessRelayRunner::builder().binary(&binary).build()?;

    info!("Executing: {} {:?}", runner.binary().display(), args.as_slice());
    Ok(runner.run(&args))
}
