//! Feedback ring: process `i` reads channel `i` and writes channel `i + 1 mod N`.

use std::thread;

use tracing::debug;

use crate::channel::Channel;
use crate::config::IntcodeConfig;
use crate::error::{Fault, IntcodeError, IntcodeResult};
use crate::loader::Program;
use crate::vm::{Process, RunSummary};

use super::joined;

/// Run one process per configuration value in a ring and return the last
/// process's final output.
///
/// Channel `i` is seeded with `phases[i]`; channel 0 then receives `seed`.
/// The ring ends once every process has halted or faulted. When a process
/// faults, its closed output makes its successors fault on exhausted input;
/// the originating fault is the one returned.
pub fn run_ring(
    program: &Program,
    config: &IntcodeConfig,
    phases: &[i64],
    seed: i64,
) -> IntcodeResult<i64> {
    if phases.is_empty() {
        return Err(IntcodeError::Wiring(
            "feedback ring needs at least one process".to_string(),
        ));
    }
    let n = phases.len();
    let channels: Vec<Channel> = phases.iter().map(|&p| Channel::with_values([p])).collect();
    channels[0].write(seed);

    let processes: Vec<Process> = (0..n)
        .map(|i| {
            Process::new(format!("ring-{}", i), config.clone(), program)
                .with_input(channels[i].clone())
                .with_output(channels[(i + 1) % n].clone())
        })
        .collect();

    let results: Vec<IntcodeResult<RunSummary>> = thread::scope(|s| {
        let handles: Vec<_> = processes
            .into_iter()
            .enumerate()
            .map(|(i, mut process)| {
                let closer = channels[(i + 1) % n].clone();
                s.spawn(move || {
                    let res = process.run();
                    closer.close();
                    res
                })
            })
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(i, handle)| joined(handle.join(), &format!("ring-{}", i)))
            .collect()
    });

    let mut errors: Vec<IntcodeError> = results.into_iter().filter_map(Result::err).collect();
    if !errors.is_empty() {
        let origin = errors
            .iter()
            .position(|e| e.fault() != Some(&Fault::InputExhausted))
            .unwrap_or(0);
        return Err(errors.swap_remove(origin));
    }

    let remaining: Vec<i64> = std::iter::from_fn(|| channels[0].try_read()).collect();
    debug!(processes = n, leftover = remaining.len(), "feedback ring finished");
    remaining.last().copied().ok_or_else(|| {
        IntcodeError::Wiring("feedback ring produced no output".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulate() -> Program {
        // phase = in; value = in; out phase + value
        Program::from(vec![3, 11, 3, 12, 1, 11, 12, 11, 4, 11, 99, 0, 0])
    }

    #[test]
    fn single_pass_ring_sums_phases() {
        let result = run_ring(&accumulate(), &IntcodeConfig::new(), &[9, 8, 7, 6, 5], 0).unwrap();
        assert_eq!(result, 35);
    }

    #[test]
    fn single_process_ring_feeds_itself() {
        let result = run_ring(&accumulate(), &IntcodeConfig::new(), &[4], 10).unwrap();
        assert_eq!(result, 14);
    }

    #[test]
    fn empty_ring_is_rejected() {
        let err = run_ring(&accumulate(), &IntcodeConfig::new(), &[], 0).unwrap_err();
        assert!(matches!(err, IntcodeError::Wiring(_)));
    }

    #[test]
    fn ring_without_output_is_rejected() {
        // consumes phase and seed, outputs nothing
        let program = Program::from(vec![3, 0, 3, 0, 99]);
        let err = run_ring(&program, &IntcodeConfig::new(), &[1], 0).unwrap_err();
        assert!(matches!(err, IntcodeError::Wiring(_)), "{:?}", err);
    }

    #[test]
    fn silent_halt_ends_ring_without_close_on_halt() {
        // phase 1 halts at once; any other phase reads a second input
        let program = Program::from(vec![3, 20, 1008, 20, 1, 21, 1005, 21, 11, 3, 20, 99]);
        let mut cfg = IntcodeConfig::new();
        cfg.close_output_on_halt = false;
        let err = run_ring(&program, &cfg, &[1, 2], 0).unwrap_err();
        match err {
            IntcodeError::Fault { process, pc, fault } => {
                assert_eq!(process, "ring-1");
                assert_eq!(pc, 9);
                assert_eq!(fault, Fault::InputExhausted);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
