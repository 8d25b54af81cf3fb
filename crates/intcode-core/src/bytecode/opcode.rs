//! Intcode Opcode Definitions
//!
//! Defines the opcode set of the Intcode machine.
//! This file contains no execution semantics.

/// Intcode opcodes
#[repr(i64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    // Arithmetic
    Add = 1,
    Mul = 2,

    // IO
    Input  = 3,
    Output = 4,

    // Control flow
    JumpIfTrue  = 5,
    JumpIfFalse = 6,

    // Comparison
    LessThan = 7,
    Equals   = 8,

    // Registers
    AdjustRelativeBase = 9,

    // System
    Halt = 99,
}

impl OpCode {
    /// Convert a decoded opcode number to an opcode
    pub fn from_i64(code: i64) -> Option<Self> {
        match code {
            1 => Some(OpCode::Add),
            2 => Some(OpCode::Mul),

            3 => Some(OpCode::Input),
            4 => Some(OpCode::Output),

            5 => Some(OpCode::JumpIfTrue),
            6 => Some(OpCode::JumpIfFalse),

            7 => Some(OpCode::LessThan),
            8 => Some(OpCode::Equals),

            9 => Some(OpCode::AdjustRelativeBase),

            99 => Some(OpCode::Halt),

            _ => None,
        }
    }

    /// Number of parameter words following the instruction word
    pub fn param_count(self) -> usize {
        match self {
            OpCode::Add | OpCode::Mul | OpCode::LessThan | OpCode::Equals => 3,
            OpCode::JumpIfTrue | OpCode::JumpIfFalse => 2,
            OpCode::Input | OpCode::Output | OpCode::AdjustRelativeBase => 1,
            OpCode::Halt => 0,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_i64() {
        for code in [1, 2, 3, 4, 5, 6, 7, 8, 9, 99] {
            let op = OpCode::from_i64(code).expect("known opcode");
            assert_eq!(op.code(), code);
        }
    }

    #[test]
    fn unassigned_codes_are_rejected() {
        for code in [0, 10, 42, 98, 100, -1, -99] {
            assert_eq!(OpCode::from_i64(code), None);
        }
    }
}
