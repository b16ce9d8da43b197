//! Child termination classification

use nix::sys::wait::WaitStatus;
use std::fmt;

/// Exit code of a relay run whose child exited normally.
pub const SUCCESS_EXIT_CODE: i32 = 0;

/// Exit code for infrastructure failures and abnormal child outcomes.
pub const FATAL_EXIT_CODE: i32 = 2;

/// How the spawned child ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildResult {
    /// Child called exit; `code` is in 0..=255
    NormalExit { code: i32 },
    /// Child was terminated by a signal
    KilledBySignal { signal: i32 },
    /// Any other reported state
    AbnormalTermination,
}

impl ChildResult {
    /// Exit code the relay run reports for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChildResult::NormalExit { .. } => SUCCESS_EXIT_CODE,
            ChildResult::KilledBySignal { .. } | ChildResult::AbnormalTermination => {
                FATAL_EXIT_CODE
            }
        }
    }

    pub fn is_normal_exit(&self) -> bool {
        matches!(self, ChildResult::NormalExit { .. })
    }
}

impl From<WaitStatus> for ChildResult {
    fn from(status: WaitStatus) -> Self {
        match status {
            WaitStatus::Exited(_, code) => ChildResult::NormalExit { code },
            WaitStatus::Signaled(_, signal, _) => ChildResult::KilledBySignal {
                signal: signal as i32,
            },
            _ => ChildResult::AbnormalTermination,
        }
    }
}

impl fmt::Display for ChildResult {
    /// Renders the line the relay writes for this outcome, without newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildResult::NormalExit { code } => {
                write!(f, "Child process exited with code {}", code)
            }
            ChildResult::KilledBySignal { signal } => {
                write!(f, "Child process was terminated by signal {}", signal)
            }
            ChildResult::AbnormalTermination => write!(f, "Child process terminated abnormally."),
        }
    }
}
