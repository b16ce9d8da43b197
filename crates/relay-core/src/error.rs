//! Error types for relay operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::status::FATAL_EXIT_CODE;

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Errors that can occur while relaying a child process
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("pipe: {0}")]
    Pipe(String),

    #[error("Failed to fork process: {0}")]
    Spawn(String),

    #[error("waitpid: {0}")]
    Wait(String),

    #[error("Failed to drain child output: {0}")]
    Drain(String),

    #[error("Failed to execute binary: {}", .0.display())]
    BinaryNotFound(PathBuf),

    #[error("Invalid number of arguments: expected 1 or 3, got {count}")]
    InvalidArgumentCount { count: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Staging failed for {}: {source}", path.display())]
    Stage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RelayError {
    /// Whether the error comes from pipe/spawn/wait plumbing rather than from
    /// a rejected input.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            RelayError::Io(_)
                | RelayError::Pipe(_)
                | RelayError::Spawn(_)
                | RelayError::Wait(_)
                | RelayError::Drain(_)
                | RelayError::BinaryNotFound(_)
        )
    }

    /// Every relay error ends the run with the fatal exit code.
    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }
}
