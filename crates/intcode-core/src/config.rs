//! Intcode Configuration
//!
//! Defines the machine variant and runtime limits for an Intcode process.
//! Configuration specifies constraints only; enforcement is handled by the VM.

use crate::bytecode::opcode::OpCode;
use crate::bytecode::instruction::ParamMode;

/// Historical machine variants, each a strict subset of the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstructionSet {
    /// `add`, `mul`, `halt`; words carry no mode digits.
    Basic,
    /// Opcodes 1 through 8 plus `halt`, position and immediate modes.
    Alu,
    /// Every opcode and addressing mode, including the relative base.
    #[default]
    Full,
}

impl InstructionSet {
    pub fn supports(self, opcode: OpCode) -> bool {
        match self {
            InstructionSet::Basic => matches!(opcode, OpCode::Add | OpCode::Mul | OpCode::Halt),
            InstructionSet::Alu => opcode != OpCode::AdjustRelativeBase,
            InstructionSet::Full => true,
        }
    }

    pub fn supports_mode(self, mode: ParamMode) -> bool {
        match self {
            InstructionSet::Basic => mode == ParamMode::Position,
            InstructionSet::Alu => mode != ParamMode::Relative,
            InstructionSet::Full => true,
        }
    }

    /// Whether instruction words are split into opcode and mode digits.
    pub fn has_modes(self) -> bool {
        self != InstructionSet::Basic
    }
}

impl std::str::FromStr for InstructionSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(InstructionSet::Basic),
            "alu" => Ok(InstructionSet::Alu),
            "full" => Ok(InstructionSet::Full),
            other => Err(format!("unknown instruction set: {}", other)),
        }
    }
}

/// Process configuration
#[derive(Debug, Clone)]
pub struct IntcodeConfig {
    /// Opcodes and modes the engine accepts
    pub instruction_set: InstructionSet,

    /// Upper bound on memory growth, in cells
    pub max_memory_cells: usize,

    /// Read `0` instead of faulting when the input channel is exhausted
    pub tolerate_exhausted_input: bool,

    /// Close the output channel once the process halts
    pub close_output_on_halt: bool,
}

impl Default for IntcodeConfig {
    fn default() -> Self {
        IntcodeConfig {
            instruction_set: InstructionSet::Full,
            max_memory_cells: 1 << 24,
            tolerate_exhausted_input: false,
            close_output_on_halt: true,
        }
    }
}

impl IntcodeConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instruction_set(mut self, instruction_set: InstructionSet) -> Self {
        self.instruction_set = instruction_set;
        self
    }
}
