//! Draining the child's output pipes

use log::debug;
use relay_core::{RelayError, Result};
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::OwnedFd;
use std::thread;

/// Size of the buffer each drain loop reuses.
pub const RELAY_BUFFER_SIZE: usize = 1024;

/// Bytes captured from both pipes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Read `fd` until end-of-stream; the descriptor is closed on return.
pub fn drain_fd(fd: OwnedFd) -> io::Result<Vec<u8>> {
    let mut file = File::from(fd);
    let mut captured = Vec::new();
    let mut buffer = [0u8; RELAY_BUFFER_SIZE];

    loop {
        match file.read(&mut buffer) {
            Ok(0) => return Ok(captured),
            Ok(n) => captured.extend_from_slice(&buffer[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn spawn_drain(fd: OwnedFd, name: &str) -> Result<thread::JoinHandle<io::Result<Vec<u8>>>> {
    thread::Builder::new()
        .name(format!("relay-{}", name))
        .spawn(move || drain_fd(fd))
        .map_err(|e| RelayError::Drain(format!("spawn {} reader failed: {}", name, e)))
}

fn join_drain(handle: thread::JoinHandle<io::Result<Vec<u8>>>, name: &str) -> Result<Vec<u8>> {
    match handle.join() {
        Ok(Ok(bytes)) => {
            debug!("Drained {} bytes from child {}", bytes.len(), name);
            Ok(bytes)
        }
        Ok(Err(e)) => Err(RelayError::Drain(format!("{}: {}", name, e))),
        Err(_) => Err(RelayError::Drain(format!("{} reader panicked", name))),
    }
}

/// Reader threads draining stdout and stderr concurrently
///
/// Both pipes are read while the child runs, so a child that fills one pipe
/// buffer cannot block on it while the parent waits on the other.
pub struct DrainHandles {
    stdout: thread::JoinHandle<io::Result<Vec<u8>>>,
    stderr: thread::JoinHandle<io::Result<Vec<u8>>>,
}

impl DrainHandles {
    /// Start one reader per read end.
    pub fn spawn(stdout: OwnedFd, stderr: OwnedFd) -> Result<Self> {
        let stdout = spawn_drain(stdout, "stdout")?;
        let stderr = spawn_drain(stderr, "stderr")?;
        Ok(Self { stdout, stderr })
    }

    /// Wait for both readers. Each read end is closed by its reader.
    pub fn join(self) -> Result<CapturedOutput> {
        let stdout = join_drain(self.stdout, "stdout");
        let stderr = join_drain(self.stderr, "stderr");
        Ok(CapturedOutput {
            stdout: stdout?,
            stderr: stderr?,
        })
    }
}
