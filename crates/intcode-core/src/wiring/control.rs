//! Interactive control loop: a host controller reacts to grouped output.

use std::thread;

use tracing::warn;

use crate::channel::Channel;
use crate::config::IntcodeConfig;
use crate::error::{IntcodeError, IntcodeResult};
use crate::loader::Program;
use crate::vm::{Process, RunSummary};

use super::joined;

/// Host-side decision maker wired to a single process.
///
/// The process's output is cut into groups of `group_size()` values; each
/// complete group is handed to `on_group`, whose returned values are pushed
/// to the process's input in order.
pub trait Controller {
    fn group_size(&self) -> usize;

    /// Inputs queued before the process starts.
    fn start(&mut self) -> Vec<i64> {
        Vec::new()
    }

    fn on_group(&mut self, group: &[i64]) -> IntcodeResult<Vec<i64>>;
}

/// Run `program` under `controller` until the process closes its output.
///
/// A controller error stops the process and closes its input, and is
/// returned in preference to the resulting process fault.
pub fn run_control_loop<C: Controller>(
    program: &Program,
    config: &IntcodeConfig,
    controller: &mut C,
) -> IntcodeResult<RunSummary> {
    let size = controller.group_size();
    if size == 0 {
        return Err(IntcodeError::Wiring(
            "controller group size must be positive".to_string(),
        ));
    }

    let input = Channel::with_values(controller.start());
    let output = Channel::new();
    let mut process = Process::new("control", config.clone(), program)
        .with_input(input.clone())
        .with_output(output.clone());
    let stop = process.stop_handle();

    thread::scope(|s| -> IntcodeResult<RunSummary> {
        let closer = output.clone();
        let handle = s.spawn(move || {
            let res = process.run();
            closer.close();
            res
        });

        let driven = drive(controller, size, &input, &output);
        if let Err(err) = &driven {
            warn!(%err, "controller failed, stopping process");
            stop.stop();
            input.close();
        }
        let run = joined(handle.join(), "control");
        driven?;
        run
    })
}

fn drive<C: Controller>(
    controller: &mut C,
    size: usize,
    input: &Channel,
    output: &Channel,
) -> IntcodeResult<()> {
    let mut group = Vec::with_capacity(size);
    while let Some(value) = output.read() {
        group.push(value);
        if group.len() == size {
            for reply in controller.on_group(&group)? {
                input.write(reply);
            }
            group.clear();
        }
    }
    if !group.is_empty() {
        warn!(values = ?group, "discarding trailing partial output group");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fault;

    /// Replies to each pair with their sum and remembers every pair.
    struct Adder {
        seen: Vec<(i64, i64)>,
        fail_on: Option<i64>,
    }

    impl Controller for Adder {
        fn group_size(&self) -> usize {
            2
        }

        fn start(&mut self) -> Vec<i64> {
            vec![1]
        }

        fn on_group(&mut self, group: &[i64]) -> IntcodeResult<Vec<i64>> {
            if Some(group[0]) == self.fail_on {
                return Err(IntcodeError::Controller(format!("bad value {}", group[0])));
            }
            self.seen.push((group[0], group[1]));
            Ok(vec![group[0] + group[1]])
        }
    }

    // loop: x = in; out x; out x; if x < 100 repeat
    fn doubler() -> Program {
        Program::from(vec![3, 20, 4, 20, 4, 20, 1007, 20, 100, 21, 1005, 21, 0, 99])
    }

    #[test]
    fn controller_drives_process_to_halt() {
        let mut adder = Adder { seen: Vec::new(), fail_on: None };
        let summary = run_control_loop(&doubler(), &IntcodeConfig::new(), &mut adder).unwrap();
        assert_eq!(
            adder.seen,
            vec![(1, 1), (2, 2), (4, 4), (8, 8), (16, 16), (32, 32), (64, 64), (128, 128)]
        );
        assert_eq!(summary.inputs, 8);
        assert_eq!(summary.outputs, 16);
    }

    #[test]
    fn controller_error_stops_process() {
        let mut adder = Adder { seen: Vec::new(), fail_on: Some(8) };
        let err = run_control_loop(&doubler(), &IntcodeConfig::new(), &mut adder).unwrap_err();
        assert!(matches!(err, IntcodeError::Controller(_)), "{:?}", err);
        assert_eq!(adder.seen.len(), 3);
    }

    #[test]
    fn process_fault_surfaces() {
        let mut adder = Adder { seen: Vec::new(), fail_on: None };
        let program = Program::from(vec![4, 0, 4, 0, 77]);
        let err = run_control_loop(&program, &IntcodeConfig::new(), &mut adder).unwrap_err();
        assert_eq!(err.fault(), Some(&Fault::UnknownOpcode { opcode: 77 }));
        assert_eq!(adder.seen, vec![(4, 4)]);
    }

    #[test]
    fn trailing_partial_group_is_discarded() {
        let mut adder = Adder { seen: Vec::new(), fail_on: None };
        let program = Program::from(vec![104, 5, 104, 6, 104, 7, 99]);
        run_control_loop(&program, &IntcodeConfig::new(), &mut adder).unwrap();
        assert_eq!(adder.seen, vec![(5, 6)]);
    }

    /// Fails on the first group it sees.
    struct Refuse;

    impl Controller for Refuse {
        fn group_size(&self) -> usize {
            1
        }

        fn start(&mut self) -> Vec<i64> {
            vec![5]
        }

        fn on_group(&mut self, group: &[i64]) -> IntcodeResult<Vec<i64>> {
            Err(IntcodeError::Controller(format!("refused {}", group[0])))
        }
    }

    #[test]
    fn controller_error_stops_tolerant_process() {
        // x = in; out x; jump 0, never halts when input reads as 0
        let program = Program::from(vec![3, 20, 4, 20, 1105, 1, 0, 99]);
        let mut cfg = IntcodeConfig::new();
        cfg.tolerate_exhausted_input = true;
        let err = run_control_loop(&program, &cfg, &mut Refuse).unwrap_err();
        assert!(matches!(err, IntcodeError::Controller(_)), "{:?}", err);
    }
}
