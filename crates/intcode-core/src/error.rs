//! Intcode Error Types
//!
//! Defines all error conditions produced by the Intcode runtime.
//! Execution faults are kept separate from the process-level error so a
//! wiring driver can tell which process failed and where.

use std::io;

/// Fatal condition raised by the execution engine.
///
/// Every fault stops the owning process; the engine never recovers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("unknown opcode {opcode}")]
    UnknownOpcode { opcode: i64 },

    #[error("invalid parameter mode {mode} for opcode {opcode}")]
    InvalidMode { opcode: i64, mode: i64 },

    #[error("immediate mode used as write target for opcode {opcode}")]
    ImmediateWrite { opcode: i64 },

    #[error("negative address {address} for opcode {opcode}")]
    NegativeAddress { opcode: i64, address: i64 },

    #[error("address {address} exceeds memory limit of {limit} cells")]
    MemoryLimit { address: i64, limit: usize },

    #[error("input exhausted")]
    InputExhausted,

    #[error("opcode {opcode} needs an {direction} channel but none is attached")]
    ChannelDetached { opcode: i64, direction: &'static str },

    #[error("stopped by host")]
    Stopped,
}

#[derive(Debug, thiserror::Error)]
pub enum IntcodeError {
    // Program loading
    #[error("invalid program token {token:?} at position {index}")]
    InvalidToken { index: usize, token: String },

    // Execution
    #[error("process {process} faulted at pc {pc}: {fault}")]
    Fault {
        process: String,
        pc: usize,
        #[source]
        fault: Fault,
    },

    // Topology
    #[error("wiring error: {0}")]
    Wiring(String),

    #[error("controller error: {0}")]
    Controller(String),

    // IO boundary
    #[error("io error: {0}")]
    Io(String),
}

impl IntcodeError {
    /// The engine fault carried by this error, if any.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            IntcodeError::Fault { fault, .. } => Some(fault),
            _ => None,
        }
    }
}

impl From<io::Error> for IntcodeError {
    fn from(err: io::Error) -> Self {
        IntcodeError::Io(err.to_string())
    }
}

pub type IntcodeResult<T> = Result<T, IntcodeError>;
