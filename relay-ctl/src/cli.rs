use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::variants::VariantArg;

#[derive(Parser)]
#[command(name = "relay-ctl")]
#[command(version, about = "Run the preprocessor and relay its output for regression tests", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Relay a configured variant
    relay-ctl run --variant informix
    relay-ctl run --binary ../preproc/ecpg --input preproc/notice.pgc

    # Relay an explicit argument vector (1 or 3 arguments)
    relay-ctl exec --binary ../preproc/ecpg -- -C INFORMIX preproc/notice_informix.pgc

    # Copy test inputs next to the harness
    relay-ctl stage ../src/preproc preproc notice.pgc notice_informix.pgc
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Relay one configured variant
    Run {
        /// Invocation variant
        #[arg(long, value_enum, default_value_t = VariantArg::Plain)]
        variant: VariantArg,

        /// Override the configured binary
        #[arg(short, long, value_name = "PATH")]
        binary: Option<PathBuf>,

        /// Override the configured input file
        #[arg(short, long, value_name = "FILE")]
        input: Option<String>,
    },

    /// Relay an explicit argument vector
    Exec {
        /// Override the configured binary
        #[arg(short, long, value_name = "PATH")]
        binary: Option<PathBuf>,

        /// Arguments after the program path (1 or 3)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },

    /// List invocation variants
    Variants,

    /// Print the effective configuration as JSON
    Config,

    /// Copy files from a source directory into a destination directory
    Stage {
        /// Directory the files are read from
        src: PathBuf,

        /// Directory the files are copied into (created if missing)
        dest: PathBuf,

        /// Files to copy; only their base names are used
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}
