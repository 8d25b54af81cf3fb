//! Direct pipe: fixed inputs in, every output drained.

use std::thread;

use crate::channel::Channel;
use crate::config::IntcodeConfig;
use crate::error::IntcodeResult;
use crate::loader::Program;
use crate::vm::Process;

use super::joined;

/// Result of a single-process run
#[derive(Debug)]
pub struct PipeRun {
    pub outputs: Vec<i64>,
    /// The halted process, for reading result cells
    pub process: Process,
}

/// Run `program` with a closed input channel holding `inputs`, collecting
/// every output value concurrently until the process halts.
pub fn run_pipe(program: &Program, config: &IntcodeConfig, inputs: &[i64]) -> IntcodeResult<PipeRun> {
    run_patched_pipe(program, config, inputs, |_| Ok(()))
}

/// Like [`run_pipe`], patching the process memory before it starts. A failed
/// patch is returned and the process never runs.
pub fn run_patched_pipe<F>(
    program: &Program,
    config: &IntcodeConfig,
    inputs: &[i64],
    patch: F,
) -> IntcodeResult<PipeRun>
where
    F: FnOnce(&mut Process) -> IntcodeResult<()>,
{
    let input = Channel::with_values(inputs.iter().copied());
    input.close();
    let output = Channel::new();

    let mut process = Process::new("pipe", config.clone(), program)
        .with_input(input)
        .with_output(output.clone());
    patch(&mut process)?;

    thread::scope(|s| -> IntcodeResult<PipeRun> {
        let closer = output.clone();
        let handle = s.spawn(move || {
            let res = process.run();
            closer.close();
            res.map(|_| process)
        });
        let outputs = output.drain();
        let process = joined(handle.join(), "pipe")?;
        Ok(PipeRun { outputs, process })
    })
}
