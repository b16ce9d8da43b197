//! Relay controller CLI - run the preprocessor and relay its output

mod cli;
mod commands;
mod logging;
mod runner;
mod variants;

use clap::Parser;
use cli::{Cli, Commands};
use cmd_relay::RelayConfig;
use console::style;
use runner::{RunConfig, run_exec, run_variant};
use std::path::Path;
use std::process::ExitCode;

fn load_config(path: Option<&Path>) -> Result<RelayConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => RelayConfig::from_file(path)?,
        None => RelayConfig::default(),
    };
    Ok(config.with_overrides(|key| std::env::var(key).ok()))
}

fn dispatch(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            variant,
            binary,
            input,
        } => run_variant(RunConfig {
            config,
            binary,
            variant: variant.variant(),
            input,
        }),
        Commands::Exec { binary, args } => run_exec(config, binary, args),
        Commands::Variants => {
            commands::list_variants(&config);
            Ok(0)
        }
        Commands::Config => {
            commands::show_config(&config)?;
            Ok(0)
        }
        Commands::Stage { src, dest, files } => {
            commands::stage(&src, &dest, &files)?;
            Ok(0)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_logger(cli.verbose);

    match dispatch(cli) {
        Ok(code) => cmd_relay::harness::exit_code(code),
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::from(1)
        }
    }
}
