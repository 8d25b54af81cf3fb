//! Host controllers for Intcode processes
//!
//! Interactive drivers that sit on the other end of a process's channels.
//! Each one implements `Controller` and is run through the core's control loop.

pub use intcode_core::{IntcodeConfig, IntcodeResult, Program, RunSummary};

pub mod arcade;
pub mod painter;

pub use arcade::{Autopilot, Tile};
pub use painter::{Heading, HullPainter, Point};

use intcode_core::run_control_loop;

/// Run the painting program with the robot starting on `start_color`.
pub fn paint_hull(
    program: &Program,
    config: &IntcodeConfig,
    start_color: i64,
) -> IntcodeResult<HullPainter> {
    let mut robot = HullPainter::new(start_color);
    run_control_loop(program, config, &mut robot)?;
    Ok(robot)
}

/// Play the game to completion and return the final board. With `free_play`
/// the quarters are inserted into a copy of `program` first.
pub fn play_arcade(
    program: &Program,
    config: &IntcodeConfig,
    free_play: bool,
) -> IntcodeResult<Autopilot> {
    let mut program = program.clone();
    if free_play {
        Autopilot::insert_quarters(&mut program);
    }
    let mut pilot = Autopilot::new();
    run_control_loop(&program, config, &mut pilot)?;
    Ok(pilot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use intcode_core::IntcodeError;

    #[test]
    fn painting_program_round_trip() {
        // echo the panel color back as paint, always turn left, twice
        let program = Program::from(vec![3, 100, 4, 100, 104, 0, 3, 100, 4, 100, 104, 0, 99]);
        let robot = paint_hull(&program, &IntcodeConfig::new(), painter::WHITE).expect("paint failed");
        assert_eq!(robot.painted_panels(), 2);
        assert_eq!(robot.color_at(Point { x: 0, y: 0 }), painter::WHITE);
        assert_eq!(robot.color_at(Point { x: -1, y: 0 }), painter::BLACK);
        assert_eq!(robot.position(), Point { x: -1, y: 1 });
        assert_eq!(robot.heading(), Heading::Down);
    }

    #[test]
    fn invalid_paint_stops_the_run() {
        let program = Program::from(vec![104, 7, 104, 0, 3, 100, 99]);
        let err = paint_hull(&program, &IntcodeConfig::new(), painter::BLACK).unwrap_err();
        assert!(matches!(err, IntcodeError::Controller(_)), "{:?}", err);
    }
}
