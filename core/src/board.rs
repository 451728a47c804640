// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation
//!
//! The board is a square grid of `size` dots per side, labelled from a lower
//! left origin. Every line starts at a dot and goes either up or right, so
//! each segment of the grid has exactly one name.

use crate::Seat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Dots per side of a standard game (a 2x2 grid of boxes)
pub const DEFAULT_BOARD_SIZE: u8 = 3;
/// Smallest playable board, a single box
pub const MIN_BOARD_SIZE: u8 = 2;
/// Largest board whose labels stay single digit
pub const MAX_BOARD_SIZE: u8 = 10;

/// Direction a line extends from its anchor dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Vertical line from (x, y) to (x, y + 1)
    Up,
    /// Horizontal line from (x, y) to (x + 1, y)
    Right,
}

/// A unit segment of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Line {
    pub x: u8,
    pub y: u8,
    pub direction: Direction,
}

impl Line {
    pub fn new(x: u8, y: u8, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    pub fn up(x: u8, y: u8) -> Self {
        Self::new(x, y, Direction::Up)
    }

    pub fn right(x: u8, y: u8) -> Self {
        Self::new(x, y, Direction::Right)
    }
}

/// A unit cell, named by its lower left dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxCoord {
    pub x: u8,
    pub y: u8,
}

impl BoxCoord {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// The four lines bounding this box: bottom, top, left, right
    pub fn sides(&self) -> [Line; 4] {
        [
            Line::right(self.x, self.y),
            Line::right(self.x, self.y + 1),
            Line::up(self.x, self.y),
            Line::up(self.x + 1, self.y),
        ]
    }
}

/// Drawn lines and box owners for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Dots per side
    size: u8,
    /// Every line drawn so far
    lines: BTreeSet<Line>,
    /// Owner of each box, row-major from the bottom row
    owners: Vec<Option<Seat>>,
}

impl Board {
    /// Create an empty board. The size is expected to be validated by the caller.
    pub fn new(size: u8) -> Self {
        let per_side = size.saturating_sub(1) as usize;
        Self {
            size,
            lines: BTreeSet::new(),
            owners: vec![None; per_side * per_side],
        }
    }

    /// Whether a board of this size is supported
    pub fn is_supported_size(size: u8) -> bool {
        (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size)
    }

    /// Dots per side
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Boxes per side
    pub fn boxes_per_side(&self) -> u8 {
        self.size.saturating_sub(1)
    }

    /// Total number of boxes
    pub fn box_count(&self) -> usize {
        self.owners.len()
    }

    /// Total number of lines on the board
    pub fn line_count(&self) -> usize {
        2 * self.size as usize * self.boxes_per_side() as usize
    }

    /// Resolve wire coordinates to a line on this board
    pub fn line_at(&self, x: i64, y: i64, direction: Direction) -> Option<Line> {
        let x = u8::try_from(x).ok()?;
        let y = u8::try_from(y).ok()?;
        let line = Line::new(x, y, direction);
        self.contains(&line).then_some(line)
    }

    /// Check if a line lies on this board
    pub fn contains(&self, line: &Line) -> bool {
        match line.direction {
            Direction::Up => line.x < self.size && line.y < self.boxes_per_side(),
            Direction::Right => line.x < self.boxes_per_side() && line.y < self.size,
        }
    }

    pub fn is_drawn(&self, line: &Line) -> bool {
        self.lines.contains(line)
    }

    /// Draw a line. Returns false if it was already drawn or is off the board.
    pub fn draw(&mut self, line: Line) -> bool {
        if !self.contains(&line) {
            return false;
        }
        self.lines.insert(line)
    }

    /// Drawn lines in a stable order
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn drawn_count(&self) -> usize {
        self.lines.len()
    }

    /// The one or two boxes a line borders
    pub fn adjacent_boxes(&self, line: &Line) -> Vec<BoxCoord> {
        let mut result = Vec::with_capacity(2);
        let last = self.boxes_per_side();

        match line.direction {
            Direction::Right => {
                // Above
                if line.y < last {
                    result.push(BoxCoord::new(line.x, line.y));
                }
                // Below
                if line.y > 0 {
                    result.push(BoxCoord::new(line.x, line.y - 1));
                }
            }
            Direction::Up => {
                // Right
                if line.x < last {
                    result.push(BoxCoord::new(line.x, line.y));
                }
                // Left
                if line.x > 0 {
                    result.push(BoxCoord::new(line.x - 1, line.y));
                }
            }
        }

        result
    }

    /// Whether all four sides of a box are drawn
    pub fn is_complete(&self, coord: BoxCoord) -> bool {
        coord.sides().iter().all(|side| self.lines.contains(side))
    }

    /// Owner of a box, if claimed
    pub fn owner(&self, coord: BoxCoord) -> Option<Seat> {
        self.box_index(coord).and_then(|idx| self.owners[idx])
    }

    /// Give an unowned box to a seat. Owners never change once set.
    pub fn claim(&mut self, coord: BoxCoord, seat: Seat) -> bool {
        match self.box_index(coord) {
            Some(idx) if self.owners[idx].is_none() => {
                self.owners[idx] = Some(seat);
                true
            }
            _ => false,
        }
    }

    /// Number of boxes owned by a seat
    pub fn boxes_owned_by(&self, seat: Seat) -> usize {
        self.owners.iter().filter(|owner| **owner == Some(seat)).count()
    }

    /// Whether every box has been claimed
    pub fn all_boxes_owned(&self) -> bool {
        self.owners.iter().all(Option::is_some)
    }

    fn box_index(&self, coord: BoxCoord) -> Option<usize> {
        let per_side = self.boxes_per_side();
        if coord.x >= per_side || coord.y >= per_side {
            return None;
        }
        Some(coord.y as usize * per_side as usize + coord.x as usize)
    }
}
