//! Execution layer: pipes, child spawning and output draining
//!
//! # Features
//!
//! - **Pipe pairs**: owned stdout/stderr pipes, closed on drop
//! - **Child spawning**: fork, redirect into the pipes, exec the program
//! - **Draining**: one reader thread per pipe, joined after the child exits

pub mod pipe;
pub mod process;
pub mod stream;

pub use pipe::{Pipe, PipePair};
pub use process::{ChildCommand, spawn_child, wait_for_child};
pub use stream::{CapturedOutput, DrainHandles, RELAY_BUFFER_SIZE, drain_fd};
