//! Breakout autopilot
//!
//! Reads `(x, y, tile)` triples from the game and keeps the paddle under the
//! ball. `(-1, 0, score)` updates the score display.

use std::collections::HashMap;

use tracing::debug;

use intcode_core::{Controller, IntcodeError, IntcodeResult, Program};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Block,
    Paddle,
    Ball,
}

impl Tile {
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0 => Some(Tile::Empty),
            1 => Some(Tile::Wall),
            2 => Some(Tile::Block),
            3 => Some(Tile::Paddle),
            4 => Some(Tile::Ball),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    screen: HashMap<(i64, i64), Tile>,
    score: i64,
    ball_x: Option<i64>,
    paddle_x: Option<i64>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the game to free play; must be applied before the process starts.
    pub fn insert_quarters(program: &mut Program) {
        program.patch(0, 2);
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn tile_at(&self, x: i64, y: i64) -> Tile {
        self.screen.get(&(x, y)).copied().unwrap_or(Tile::Empty)
    }

    pub fn ball_x(&self) -> Option<i64> {
        self.ball_x
    }

    pub fn paddle_x(&self) -> Option<i64> {
        self.paddle_x
    }

    /// Blocks still on screen
    pub fn blocks(&self) -> usize {
        self.screen.values().filter(|t| **t == Tile::Block).count()
    }

    fn joystick(&self, ball_x: i64) -> i64 {
        self.paddle_x.map_or(0, |paddle_x| (ball_x - paddle_x).signum())
    }
}

impl Controller for Autopilot {
    fn group_size(&self) -> usize {
        3
    }

    fn on_group(&mut self, group: &[i64]) -> IntcodeResult<Vec<i64>> {
        let (x, y, id) = (group[0], group[1], group[2]);
        if x == -1 && y == 0 {
            debug!(score = id, "score updated");
            self.score = id;
            return Ok(Vec::new());
        }

        let tile = Tile::from_id(id)
            .ok_or_else(|| IntcodeError::Controller(format!("unknown tile {}", id)))?;
        self.screen.insert((x, y), tile);
        match tile {
            Tile::Paddle => {
                self.paddle_x = Some(x);
                Ok(Vec::new())
            }
            Tile::Ball => {
                self.ball_x = Some(x);
                Ok(vec![self.joystick(x)])
            }
            _ => Ok(Vec::new()),
        }
    }
}
