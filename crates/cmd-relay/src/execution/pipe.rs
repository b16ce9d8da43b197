//! Stdout/stderr pipe pair

use nix::fcntl::OFlag;
use nix::unistd::pipe2;
use relay_core::{RelayError, Result};
use std::os::fd::{AsRawFd, OwnedFd, RawFd};

/// One unidirectional pipe
#[derive(Debug)]
pub struct Pipe {
    pub read: OwnedFd,
    pub write: OwnedFd,
}

impl Pipe {
    /// Create a pipe with both ends marked close-on-exec.
    ///
    /// `dup2` clears the flag on the duplicated descriptor, so the child keeps
    /// its redirected stdout/stderr across exec while unrelated children forked
    /// from this process never inherit the originals.
    pub fn open() -> Result<Self> {
        let (read, write) =
            pipe2(OFlag::O_CLOEXEC).map_err(|e| RelayError::Pipe(e.to_string()))?;
        Ok(Self { read, write })
    }
}

/// Raw descriptor numbers handed to the forked child
#[derive(Debug, Clone, Copy)]
pub struct ChildFds {
    pub stdout_read: RawFd,
    pub stdout_write: RawFd,
    pub stderr_read: RawFd,
    pub stderr_write: RawFd,
}

impl ChildFds {
    pub fn all(&self) -> [RawFd; 4] {
        [
            self.stdout_read,
            self.stdout_write,
            self.stderr_read,
            self.stderr_write,
        ]
    }
}

/// Pipes capturing the child's stdout and stderr
#[derive(Debug)]
pub struct PipePair {
    pub stdout: Pipe,
    pub stderr: Pipe,
}

impl PipePair {
    /// Allocate both pipes; if the second fails the first is closed on drop.
    pub fn open() -> Result<Self> {
        let stdout = Pipe::open()?;
        let stderr = Pipe::open()?;
        Ok(Self { stdout, stderr })
    }

    pub fn child_fds(&self) -> ChildFds {
        ChildFds {
            stdout_read: self.stdout.read.as_raw_fd(),
            stdout_write: self.stdout.write.as_raw_fd(),
            stderr_read: self.stderr.read.as_raw_fd(),
            stderr_write: self.stderr.write.as_raw_fd(),
        }
    }

    /// Close the parent's write ends and hand back `(stdout, stderr)` read ends.
    pub fn into_read_ends(self) -> (OwnedFd, OwnedFd) {
        let PipePair { stdout, stderr } = self;
        drop(stdout.write);
        drop(stderr.write);
        (stdout.read, stderr.read)
    }
}
