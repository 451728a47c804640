// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game sessions: the board, the players and the move log of one game

use crate::{
    board::{Board, BoxCoord},
    engine::{TurnEngine, TurnOutcome},
    entry::{GameEntry, MoveRecord},
    render,
    rules::MoveValidator,
    Address, GameError, GameStatus, MoveType, Seat,
};
use serde::{Deserialize, Serialize};

/// A move that was accepted into the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedMove {
    /// Content address of the move entry
    pub address: Address,
    /// The signed move
    pub record: MoveRecord,
    /// Seat of the author
    pub seat: Seat,
    /// Boxes the move completed
    pub completed: Vec<BoxCoord>,
}

/// Full state of one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Game id, the address of `game`
    pub id: Address,
    /// The entry the game was created from
    pub game: GameEntry,
    /// Lines and box owners
    pub board: Board,
    /// Seat whose turn it is
    pub current_turn: Seat,
    /// Lifecycle status
    pub status: GameStatus,
    /// Accepted moves, oldest first
    pub moves: Vec<LoggedMove>,
}

impl GameSession {
    /// Start a game from its entry. The opponent (player 2) moves first.
    pub fn create(game: GameEntry) -> Result<Self, GameError> {
        if game.player_1 == game.player_2 {
            return Err(GameError::InvalidOpponent);
        }
        if !Board::is_supported_size(game.board_size) {
            return Err(GameError::InvalidBoardSize(game.board_size));
        }

        let id = game.address()?;
        let board = Board::new(game.board_size);

        Ok(Self {
            id,
            game,
            board,
            current_turn: Seat::Two,
            status: GameStatus::Ready,
            moves: Vec::new(),
        })
    }

    /// Agent sitting in a seat
    pub fn player(&self, seat: Seat) -> &Address {
        match seat {
            Seat::One => &self.game.player_1,
            Seat::Two => &self.game.player_2,
        }
    }

    /// Seat of an agent, if it plays in this game
    pub fn seat_of(&self, agent: &Address) -> Option<Seat> {
        if *agent == self.game.player_1 {
            Some(Seat::One)
        } else if *agent == self.game.player_2 {
            Some(Seat::Two)
        } else {
            None
        }
    }

    /// Agent whose turn it is
    pub fn current_player(&self) -> &Address {
        self.player(self.current_turn)
    }

    /// Address of the newest move, which the next move must point back to
    pub fn last_move_address(&self) -> Option<&Address> {
        self.moves.last().map(|m| &m.address)
    }

    /// Validate a move for `requester` without applying it
    pub fn check_move(&self, requester: &Address, move_type: &MoveType) -> Result<(), GameError> {
        MoveValidator::new(self).check_move(requester, move_type).map(|_| ())
    }

    /// Apply a signed move. On error the session is left untouched.
    pub fn apply(&mut self, record: MoveRecord) -> Result<TurnOutcome, GameError> {
        if record.entry.game != self.id {
            return Err(GameError::GameNotFound(record.entry.game.clone()));
        }
        record.verify()?;
        if record.entry.previous_move.as_ref() != self.last_move_address() {
            return Err(GameError::OutOfSequence);
        }

        let line = MoveValidator::new(self).check_move(&record.entry.author, &record.entry.move_type)?;
        let address = record.entry.address()?;
        let seat = self.current_turn;

        let outcome = TurnEngine::apply(self, seat, line);
        tracing::debug!(
            game_id = %self.id.short(),
            move_address = %address.short(),
            seat = seat.number(),
            line = ?outcome.line,
            completed = outcome.completed.len(),
            "Move applied"
        );

        self.moves.push(LoggedMove {
            address,
            record,
            seat,
            completed: outcome.completed.clone(),
        });

        Ok(outcome)
    }

    /// Boxes owned by (player 1, player 2)
    pub fn scores(&self) -> (usize, usize) {
        (
            self.board.boxes_owned_by(Seat::One),
            self.board.boxes_owned_by(Seat::Two),
        )
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Content address of the whole session
    pub fn digest(&self) -> Result<Address, GameError> {
        Address::of(self)
    }

    /// Text rendering of the board and scores
    pub fn render(&self) -> String {
        render::render_session(self)
    }
}
