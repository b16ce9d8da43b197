//! relay-core: shared types and errors for cmd-relay
//!
//! This crate provides the foundational types used by the relay crates:
//! - Error types and Result alias
//! - Child termination classification (`ChildResult`)
//! - The two process exit codes a relay run can produce

pub mod error;
pub mod status;

pub use error::{Result, RelayError};
pub use status::{ChildResult, FATAL_EXIT_CODE, SUCCESS_EXIT_CODE};
