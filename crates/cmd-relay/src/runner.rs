//! The spawn-pipe-relay routine

use log::{debug, info, warn};
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use relay_core::{ChildResult, FATAL_EXIT_CODE, RelayError, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::args::ArgumentVector;
use crate::config::RelayConfig;
use crate::execution::pipe::PipePair;
use crate::execution::process::{ChildCommand, ensure_executable, spawn_child, wait_for_child};
use crate::execution::stream::{CapturedOutput, DrainHandles};

/// Outcome of one relay run, before anything is written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReport {
    /// How the child ended
    pub result: ChildResult,
    /// Everything the child wrote to its stdout
    pub stdout: Vec<u8>,
    /// Everything the child wrote to its stderr
    pub stderr: Vec<u8>,
}

impl RelayReport {
    fn new(result: ChildResult, output: CapturedOutput) -> Self {
        Self {
            result,
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }

    /// Write the report the way the harness expects and return the exit code.
    ///
    /// A normal exit prints the exit-code line and the child's stdout on `out`,
    /// then the child's stderr on `err`. Any other outcome only prints a
    /// diagnostic on `err`; captured output is discarded.
    pub fn emit<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> io::Result<i32> {
        match self.result {
            ChildResult::NormalExit { .. } => {
                writeln!(out, "{}", self.result)?;
                out.write_all(&self.stdout)?;
                out.flush()?;
                err.write_all(&self.stderr)?;
                err.flush()?;
            }
            ChildResult::KilledBySignal { .. } | ChildResult::AbnormalTermination => {
                writeln!(err, "{}", self.result)?;
                err.flush()?;
            }
        }
        Ok(self.result.exit_code())
    }
}

/// Runs a fixed program and relays its output after it terminates
#[derive(Debug, Clone)]
pub struct ProcessRelayRunner {
    binary: PathBuf,
}

impl ProcessRelayRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn builder() -> RelayRunnerBuilder {
        RelayRunnerBuilder::default()
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(&config.binary))
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Spawn the program with `args`, wait for it and capture both streams.
    ///
    /// Errors are infrastructure failures; no child output is available then.
    pub fn execute(&self, args: &ArgumentVector) -> Result<RelayReport> {
        ensure_executable(&self.binary)?;
        let command = ChildCommand::new(&self.binary, args)?;

        let pipes = PipePair::open()?;
        let pid = spawn_child(&command, &pipes)?;
        let (stdout_read, stderr_read) = pipes.into_read_ends();

        let drains = match DrainHandles::spawn(stdout_read, stderr_read) {
            Ok(drains) => drains,
            Err(e) => {
                // Reap before bailing so no zombie outlives the run.
                let _ = wait_for_child(pid);
                return Err(e);
            }
        };

        let result = match wait_for_child(pid) {
            Ok(result) => result,
            Err(e) => {
                abort_child(pid, drains);
                return Err(e);
            }
        };
        let output = drains.join()?;

        debug!(
            "Child {} finished: {:?}, {} stdout bytes, {} stderr bytes",
            pid,
            result,
            output.stdout.len(),
            output.stderr.len()
        );
        Ok(RelayReport::new(result, output))
    }

    /// Run once and write the relayed output to `out` and `err`.
    ///
    /// Returns 0 when the child exited normally, whatever its own exit code,
    /// and 2 for every other outcome.
    pub fn relay<O: Write, E: Write>(&self, args: &ArgumentVector, out: &mut O, err: &mut E) -> i32 {
        info!("Relaying {} {:?}", self.binary.display(), args.as_slice());

        let report = match self.execute(args) {
            Ok(report) => report,
            Err(e) => {
                debug!("Relay of {} failed: {}", self.binary.display(), e);
                let _ = writeln!(err, "{}", e);
                let _ = err.flush();
                return e.exit_code();
            }
        };

        if !report.result.is_normal_exit() {
            debug!("{}", report.result);
        }

        match report.emit(out, err) {
            Ok(code) => code,
            Err(e) => {
                warn!("Failed to write relayed output: {}", e);
                FATAL_EXIT_CODE
            }
        }
    }

    /// [`relay`](Self::relay) to this process's own stdout and stderr.
    pub fn run(&self, args: &ArgumentVector) -> i32 {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.relay(args, &mut stdout.lock(), &mut stderr.lock())
    }
}

/// Kill a child whose status could not be retrieved, then collect the readers.
///
/// The readers only finish once every write end is closed, so the child must
/// be gone before joining.
fn abort_child(pid: Pid, drains: DrainHandles) {
    if let Err(e) = kill(pid, Signal::SIGKILL) {
        debug!("kill {} failed: {}", pid, e);
    }
    let _ = drains.join();
}

/// Builder for [`ProcessRelayRunner`]
#[derive(Debug, Default)]
pub struct RelayRunnerBuilder {
    binary: Option<PathBuf>,
}

impl RelayRunnerBuilder {
    /// Set the program to spawn
    pub fn binary(mut self, path: impl AsRef<Path>) -> Self {
        self.binary = Some(path.as_ref().to_path_buf());
        self
    }

    /// Take the program from a configuration
    pub fn config(self, config: &RelayConfig) -> Self {
        self.binary(&config.binary)
    }

    pub fn build(self) -> Result<ProcessRelayRunner> {
        match self.binary {
            Some(binary) if !binary.as_os_str().is_empty() => Ok(ProcessRelayRunner::new(binary)),
            _ => Err(RelayError::InvalidConfig(
                "binary path must be set".to_string(),
            )),
        }
    }
}
