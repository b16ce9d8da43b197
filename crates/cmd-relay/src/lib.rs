//! cmd-relay: spawn a fixed program, capture its output, relay it afterwards
//!
//! Built for regression harnesses that need to observe a subprocess
//! deterministically: the child's stdout and stderr are captured through two
//! pipes, relayed once the child has terminated, and the termination status is
//! folded into one of two exit codes.
//!
//! # Modules
//!
//! - **args**: length-checked argument vectors
//! - **config**: binary path, mode flags and input names
//! - **execution**: pipes, fork/exec and output draining
//! - **runner**: the spawn-pipe-relay routine
//! - **harness**: entry points for the thin test binaries
//! - **stage**: copying input files into a test directory
//!
//! # Example
//!
//! ```ignore
//! use cmd_relay::{ArgumentVector, ProcessRelayRunner};
//!
//! let runner = ProcessRelayRunner::new("../preproc/ecpg");
//! let args = ArgumentVector::single("preproc/notice.pgc");
//! std::process::exit(runner.run(&args));
//! ```

pub mod args;
pub mod config;
pub mod execution;
pub mod harness;
pub mod runner;
pub mod stage;

pub use args::ArgumentVector;
pub use config::{ExecVariant, RelayConfig};
pub use relay_core::{
    ChildResult, FATAL_EXIT_CODE, RelayError, Result, SUCCESS_EXIT_CODE,
};
pub use runner::{ProcessRelayRunner, RelayReport, RelayRunnerBuilder};
