//! Hull painting robot
//!
//! Reads `(color, turn)` pairs from the process, paints the panel under the
//! robot, turns, steps forward and reports the color of the new panel.
//! Screen coordinates: `y` grows downward.

use std::collections::HashMap;

use intcode_core::{Controller, IntcodeError, IntcodeResult};

pub const BLACK: i64 = 0;
pub const WHITE: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    fn turn(self, right: bool) -> Self {
        match (self, right) {
            (Heading::Up, false) | (Heading::Down, true) => Heading::Left,
            (Heading::Up, true) | (Heading::Down, false) => Heading::Right,
            (Heading::Left, false) | (Heading::Right, true) => Heading::Down,
            (Heading::Left, true) | (Heading::Right, false) => Heading::Up,
        }
    }

    fn advance(self, p: Point) -> Point {
        match self {
            Heading::Up => Point { x: p.x, y: p.y - 1 },
            Heading::Down => Point { x: p.x, y: p.y + 1 },
            Heading::Left => Point { x: p.x - 1, y: p.y },
            Heading::Right => Point { x: p.x + 1, y: p.y },
        }
    }
}

#[derive(Debug, Clone)]
pub struct HullPainter {
    start_color: i64,
    position: Point,
    heading: Heading,
    panels: HashMap<Point, i64>,
}

impl HullPainter {
    /// Robot at the origin facing up, standing on a panel of `start_color`.
    pub fn new(start_color: i64) -> Self {
        HullPainter {
            start_color,
            position: Point::default(),
            heading: Heading::Up,
            panels: HashMap::new(),
        }
    }

    /// Panels painted at least once
    pub fn painted_panels(&self) -> usize {
        self.panels.len()
    }

    pub fn color_at(&self, p: Point) -> i64 {
        self.panels.get(&p).copied().unwrap_or(BLACK)
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Text picture of the painted area: `#` white, space black.
    pub fn render(&self) -> String {
        let (Some(min_x), Some(max_x)) = (
            self.panels.keys().map(|p| p.x).min(),
            self.panels.keys().map(|p| p.x).max(),
        ) else {
            return String::new();
        };
        let min_y = self.panels.keys().map(|p| p.y).min().unwrap_or(0);
        let max_y = self.panels.keys().map(|p| p.y).max().unwrap_or(0);

        (min_y..=max_y)
            .map(|y| {
                let row: String = (min_x..=max_x)
                    .map(|x| if self.color_at(Point { x, y }) == WHITE { '#' } else { ' ' })
                    .collect();
                row.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Controller for HullPainter {
    fn group_size(&self) -> usize {
        2
    }

    fn start(&mut self) -> Vec<i64> {
        vec![self.start_color]
    }

    fn on_group(&mut self, group: &[i64]) -> IntcodeResult<Vec<i64>> {
        let (color, turn) = (group[0], group[1]);
        if color != BLACK && color != WHITE {
            return Err(IntcodeError::Controller(format!("unexpected color {}", color)));
        }
        if turn != 0 && turn != 1 {
            return Err(IntcodeError::Controller(format!("unexpected rotation {}", turn)));
        }

        self.panels.insert(self.position, color);
        self.heading = self.heading.turn(turn == 1);
        self.position = self.heading.advance(self.position);
        Ok(vec![self.color_at(self.position)])
    }
}
