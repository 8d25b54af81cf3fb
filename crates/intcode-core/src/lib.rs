//! Intcode Runtime - Core Library
//!
//! Public API surface for the Intcode processor, its channels and the
//! topologies that wire processes together.

pub mod error;
pub mod config;
pub mod bytecode;
pub mod vm;
pub mod loader;
pub mod channel;
pub mod wiring;

// Re-export commonly used types
pub use error::{Fault, IntcodeError, IntcodeResult};
pub use config::{InstructionSet, IntcodeConfig};
pub use bytecode::opcode::OpCode;
pub use channel::Channel;
pub use vm::{Memory, Process, RunSummary, StopHandle};
pub use loader::{Program, ProgramLoader};
pub use wiring::{run_control_loop, run_patched_pipe, run_pipe, run_ring, Controller, PipeRun};

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn loaded_program_runs_through_pipe() {
		let program = ProgramLoader::parse("3,9,8,9,10,9,4,9,99,-1,8").expect("parse failed");
		let run = run_pipe(&program, &IntcodeConfig::new(), &[8]).expect("run failed");
		assert_eq!(run.outputs, vec![1]);
		let run = run_pipe(&program, &IntcodeConfig::new(), &[7]).expect("run failed");
		assert_eq!(run.outputs, vec![0]);
	}

	#[test]
	fn basic_machine_patches_and_reads_result_cell() {
		let mut program = ProgramLoader::parse("1,9,10,3,2,3,11,0,99,30,40,50").expect("parse failed");
		program.patch(1, 9);
		let cfg = IntcodeConfig::new().with_instruction_set(InstructionSet::Basic);
		let mut process = Process::new("basic", cfg, &program);
		process.run().expect("run failed");
		assert_eq!(process.memory().get(0), Some(3500));
	}

	#[test]
	fn fault_message_names_process_and_opcode() {
		let program = Program::from(vec![1, 0, 0, 0, 50]);
		let mut process = Process::new("amp-3", IntcodeConfig::new(), &program);
		let err = process.run().expect_err("expected fault");
		assert_eq!(err.to_string(), "process amp-3 faulted at pc 4: unknown opcode 50");
	}
}
