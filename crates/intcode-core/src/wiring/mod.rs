//! Wiring Topologies
//!
//! Compose processes and host drivers over shared channels. Each process runs
//! on its own scoped thread and is joined before a topology returns.
//! No topology adds state to the core; they only create channels, spawn and
//! join.

pub mod control;
pub mod pipe;
pub mod ring;

pub use control::{run_control_loop, Controller};
pub use pipe::{run_patched_pipe, run_pipe, PipeRun};
pub use ring::run_ring;

use std::thread;

use crate::error::{IntcodeError, IntcodeResult};

/// Flatten a scoped thread join, turning a panic into a wiring error.
fn joined<T>(result: thread::Result<IntcodeResult<T>>, name: &str) -> IntcodeResult<T> {
    result.unwrap_or_else(|_| Err(IntcodeError::Wiring(format!("process {} panicked", name))))
}
