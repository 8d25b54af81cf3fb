pub mod instruction;
pub mod opcode;

pub use instruction::{Instruction, ParamMode};
pub use opcode::OpCode;
