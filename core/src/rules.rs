// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game rules and validation logic

use crate::{board::Line, Address, GameError, GameSession, MoveType};

/// Validates a candidate move against a session without touching it
pub struct MoveValidator<'a> {
    /// The session being checked
    session: &'a GameSession,
}

impl<'a> MoveValidator<'a> {
    /// Create a new rules validator
    pub fn new(session: &'a GameSession) -> Self {
        Self { session }
    }

    /// Check if a move is valid, returning the line it would draw.
    ///
    /// Checks run in order and the first failure wins: turn, then bounds,
    /// then whether the line is free.
    pub fn check_move(&self, requester: &Address, move_type: &MoveType) -> Result<Line, GameError> {
        if self.session.current_player() != requester {
            return Err(GameError::NotYourTurn);
        }

        match *move_type {
            MoveType::Place { x, y, direction } => {
                let board = &self.session.board;
                let line = board.line_at(x, y, direction).ok_or(GameError::OutOfRange {
                    x,
                    y,
                    direction,
                    size: board.size(),
                })?;

                if board.is_drawn(&line) {
                    return Err(GameError::AlreadyDrawn {
                        x: line.x,
                        y: line.y,
                        direction,
                    });
                }

                Ok(line)
            }
        }
    }
}
