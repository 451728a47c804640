// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn engine: draws a validated line, awards boxes and passes the turn

use crate::{board::BoxCoord, board::Line, GameSession, GameStatus, Seat};
use serde::{Deserialize, Serialize};

/// What a single move did to the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// The line that was drawn
    pub line: Line,
    /// Boxes completed by this line, now owned by the mover
    pub completed: Vec<BoxCoord>,
    /// Seat to move next
    pub next_turn: Seat,
    /// Status after the move
    pub status: GameStatus,
}

impl TurnOutcome {
    /// Whether the mover keeps the turn
    pub fn extra_turn(&self) -> bool {
        !self.completed.is_empty()
    }
}

/// Applies validated moves to a session
pub struct TurnEngine;

impl TurnEngine {
    /// Draw `line` for `seat`. The line must already have passed validation.
    pub fn apply(session: &mut GameSession, seat: Seat, line: Line) -> TurnOutcome {
        let drawn = session.board.draw(line);
        debug_assert!(drawn, "turn engine received an unvalidated line");

        let mut completed = Vec::new();
        for coord in session.board.adjacent_boxes(&line) {
            if session.board.is_complete(coord) && session.board.claim(coord, seat) {
                completed.push(coord);
            }
        }

        // Completing a box earns another move
        if completed.is_empty() {
            session.current_turn = seat.opposite();
        } else {
            session.current_turn = seat;
        }

        if session.board.all_boxes_owned() {
            if session.status != GameStatus::Finished {
                tracing::info!(
                    game_id = %session.id.short(),
                    player1_boxes = session.board.boxes_owned_by(Seat::One),
                    player2_boxes = session.board.boxes_owned_by(Seat::Two),
                    "Game finished"
                );
            }
            session.status = GameStatus::Finished;
        } else {
            session.status = GameStatus::InProgress;
        }

        TurnOutcome {
            line,
            completed,
            next_turn: session.current_turn,
            status: session.status,
        }
    }
}
