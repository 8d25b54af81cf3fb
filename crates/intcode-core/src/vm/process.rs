//! Intcode Process
//!
//! One execution engine bound to its memory, two registers and an optional
//! input and output channel. The fetch-decode-execute loop is the process's
//! only control structure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::bytecode::instruction::{Instruction, ParamMode};
use crate::bytecode::opcode::OpCode;
use crate::channel::Channel;
use crate::config::IntcodeConfig;
use crate::error::{Fault, IntcodeError, IntcodeResult};
use crate::loader::Program;

use super::memory::Memory;

/// Counters for a process run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub inputs: u64,
    pub outputs: u64,
}

/// Asks a running process to stop before its next instruction.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Intcode process
#[derive(Debug)]
pub struct Process {
    name: String,
    config: IntcodeConfig,
    memory: Memory,

    pc: usize,
    relative_base: i64,
    running: bool,

    input: Option<Channel>,
    output: Option<Channel>,
    stop: StopHandle,
    summary: RunSummary,
}

impl Process {
    /// Create a process over a private copy of `program`
    pub fn new(name: impl Into<String>, config: IntcodeConfig, program: &Program) -> Self {
        Process {
            name: name.into(),
            memory: Memory::new(program.words().to_vec(), config.max_memory_cells),
            pc: 0,
            relative_base: 0,
            running: true,
            input: None,
            output: None,
            stop: StopHandle::default(),
            summary: RunSummary::default(),
            config,
        }
    }

    pub fn with_input(mut self, channel: Channel) -> Self {
        self.input = Some(channel);
        self
    }

    pub fn with_output(mut self, channel: Channel) -> Self {
        self.output = Some(channel);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable memory access, for patching cells before the run.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Handle that faults the process with `Fault::Stopped` at its next step.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Execute until halt or fault
    pub fn run(&mut self) -> IntcodeResult<RunSummary> {
        debug!(process = %self.name, cells = self.memory.len(), "process started");
        while self.running {
            self.step()?;
        }
        Ok(self.summary)
    }

    /// Execute a single instruction. Returns whether the process is still running.
    ///
    /// On a fault the process stops and its output channel is closed so that
    /// downstream readers observe exhaustion instead of blocking.
    pub fn step(&mut self) -> IntcodeResult<bool> {
        if !self.running {
            return Ok(false);
        }
        let pc = self.pc;
        let outcome = if self.stop.is_stopped() {
            Err(Fault::Stopped)
        } else {
            self.execute()
        };
        match outcome {
            Ok(()) => {
                self.summary.steps += 1;
                if !self.running {
                    self.finish();
                }
                Ok(self.running)
            }
            Err(fault) => {
                self.running = false;
                warn!(process = %self.name, pc, %fault, "process faulted");
                if let Some(output) = &self.output {
                    output.close();
                }
                Err(IntcodeError::Fault {
                    process: self.name.clone(),
                    pc,
                    fault,
                })
            }
        }
    }

    fn finish(&mut self) {
        debug!(
            process = %self.name,
            steps = self.summary.steps,
            inputs = self.summary.inputs,
            outputs = self.summary.outputs,
            "process halted"
        );
        if self.config.close_output_on_halt {
            if let Some(output) = &self.output {
                output.close();
            }
        }
    }

    /// Dispatch one decoded instruction
    fn execute(&mut self) -> Result<(), Fault> {
        let set = self.config.instruction_set;
        let word = self.fetch()?;
        let inst = if set.has_modes() {
            Instruction::decode(word)
        } else {
            Instruction::decode_plain(word)
        };
        let op = OpCode::from_i64(inst.opcode)
            .filter(|op| set.supports(*op))
            .ok_or(Fault::UnknownOpcode { opcode: inst.opcode })?;
        let modes = self.modes(&inst, op.param_count())?;
        trace!(process = %self.name, pc = self.pc - 1, ?op, "execute");

        match op {
            OpCode::Add => {
                let a = self.read(op, modes[0])?;
                let b = self.read(op, modes[1])?;
                self.write(op, modes[2], a.wrapping_add(b))
            }
            OpCode::Mul => {
                let a = self.read(op, modes[0])?;
                let b = self.read(op, modes[1])?;
                self.write(op, modes[2], a.wrapping_mul(b))
            }
            OpCode::Input => {
                let value = self.receive(op)?;
                self.write(op, modes[0], value)
            }
            OpCode::Output => {
                let value = self.read(op, modes[0])?;
                self.send(op, value)
            }
            OpCode::JumpIfTrue | OpCode::JumpIfFalse => {
                let cond = self.read(op, modes[0])?;
                let target = self.read(op, modes[1])?;
                if (cond != 0) == (op == OpCode::JumpIfTrue) {
                    self.pc = usize::try_from(target).map_err(|_| Fault::NegativeAddress {
                        opcode: op.code(),
                        address: target,
                    })?;
                }
                Ok(())
            }
            OpCode::LessThan => {
                let a = self.read(op, modes[0])?;
                let b = self.read(op, modes[1])?;
                self.write(op, modes[2], i64::from(a < b))
            }
            OpCode::Equals => {
                let a = self.read(op, modes[0])?;
                let b = self.read(op, modes[1])?;
                self.write(op, modes[2], i64::from(a == b))
            }
            OpCode::AdjustRelativeBase => {
                let delta = self.read(op, modes[0])?;
                self.relative_base = self.relative_base.wrapping_add(delta);
                Ok(())
            }
            OpCode::Halt => {
                self.running = false;
                Ok(())
            }
        }
    }

    /// Resolve the modes of the first `count` parameters
    fn modes(&self, inst: &Instruction, count: usize) -> Result<[ParamMode; 3], Fault> {
        let set = self.config.instruction_set;
        let mut modes = [ParamMode::Position; 3];
        for (index, slot) in modes.iter_mut().enumerate().take(count) {
            *slot = inst
                .mode(index)
                .filter(|mode| set.supports_mode(*mode))
                .ok_or_else(|| Fault::InvalidMode {
                    opcode: inst.opcode,
                    mode: inst.mode_digit(index),
                })?;
        }
        Ok(modes)
    }

    /// Read the word at the counter and advance it
    fn fetch(&mut self) -> Result<i64, Fault> {
        let word = self.memory.load(self.pc)?;
        self.pc += 1;
        Ok(word)
    }

    fn address(&self, op: OpCode, raw: i64, mode: ParamMode) -> Result<usize, Fault> {
        let address = match mode {
            ParamMode::Relative => raw.wrapping_add(self.relative_base),
            _ => raw,
        };
        usize::try_from(address).map_err(|_| Fault::NegativeAddress {
            opcode: op.code(),
            address,
        })
    }

    fn read(&mut self, op: OpCode, mode: ParamMode) -> Result<i64, Fault> {
        let raw = self.fetch()?;
        if mode == ParamMode::Immediate {
            return Ok(raw);
        }
        let address = self.address(op, raw, mode)?;
        self.memory.load(address)
    }

    fn write(&mut self, op: OpCode, mode: ParamMode, value: i64) -> Result<(), Fault> {
        let raw = self.fetch()?;
        if mode == ParamMode::Immediate {
            return Err(Fault::ImmediateWrite { opcode: op.code() });
        }
        let address = self.address(op, raw, mode)?;
        self.memory.store(address, value)
    }

    fn receive(&mut self, op: OpCode) -> Result<i64, Fault> {
        let input = self.input.as_ref().ok_or(Fault::ChannelDetached {
            opcode: op.code(),
            direction: "input",
        })?;
        match input.read() {
            Some(value) => {
                self.summary.inputs += 1;
                Ok(value)
            }
            None if self.config.tolerate_exhausted_input => Ok(0),
            None => Err(Fault::InputExhausted),
        }
    }

    fn send(&mut self, op: OpCode, value: i64) -> Result<(), Fault> {
        let output = self.output.as_ref().ok_or(Fault::ChannelDetached {
            opcode: op.code(),
            direction: "output",
        })?;
        output.write(value);
        self.summary.outputs += 1;
        Ok(())
    }
}
