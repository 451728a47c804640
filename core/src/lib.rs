// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dots and Boxes Core - Game Rules and Board Logic
//!
//! This crate provides the core game functionality including:
//! - Board representation (lines, boxes, ownership)
//! - Move validation and the turn engine
//! - Game sessions with a signed, hash-chained move log
//! - Content addressing and text rendering of game state

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod address;
pub mod board;
pub mod engine;
pub mod entry;
pub mod render;
pub mod rules;
pub mod session;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

pub use address::{Address, ADDRESS_LEN};
pub use board::{Board, BoxCoord, Direction, Line, DEFAULT_BOARD_SIZE};
pub use engine::{TurnEngine, TurnOutcome};
pub use entry::{GameEntry, MoveEntry, MoveRecord};
pub use rules::MoveValidator;
pub use session::{GameSession, LoggedMove};

/// Seat of a player in a game. Player 1 creates the game, player 2 moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Seat {
    /// The agent that created the game
    One = 1,
    /// The invited opponent
    Two = 2,
}

impl Seat {
    /// Returns the other seat
    pub fn opposite(&self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Seat number as shown to players
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created, no move made yet
    Ready,
    /// At least one line drawn, boxes left to claim
    InProgress,
    /// Every box has an owner
    Finished,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameStatus::Ready => "Ready",
            GameStatus::InProgress => "InProgress",
            GameStatus::Finished => "Finished",
        };
        f.write_str(s)
    }
}

/// All kinds of moves a player can submit.
///
/// Coordinates are signed on the wire so that negative input can be
/// rejected as out of range instead of failing to parse. Any integer
/// decodes; values past `i64` saturate and are out of range like any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveType {
    /// Draw the line anchored at dot (x, y) going up or right
    Place {
        #[serde(deserialize_with = "coordinate::deserialize")]
        x: i64,
        #[serde(deserialize_with = "coordinate::deserialize")]
        y: i64,
        direction: Direction,
    },
}

impl MoveType {
    /// Shorthand for a `Place` move
    pub fn place(x: i64, y: i64, direction: Direction) -> Self {
        MoveType::Place { x, y, direction }
    }

    /// One example of every move variant
    pub fn describe() -> Vec<MoveType> {
        vec![MoveType::place(0, 0, Direction::Up)]
    }
}

mod coordinate {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct CoordinateVisitor;

    impl<'de> Visitor<'de> for CoordinateVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer coordinate")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(if v < 0 { i64::MIN } else { i64::MAX }))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        // Integers too large for u64 arrive as floats from JSON
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.is_finite() && v.fract() == 0.0 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_i64(CoordinateVisitor)
    }
}

/// A move as submitted by a player, before it is authored and signed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    /// Address of the game this move belongs to
    pub game: Address,
    /// What the move does
    pub move_type: MoveType,
    /// Caller-supplied timestamp
    pub timestamp: u64,
}

/// Errors that can occur during game play
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The requester is not the player whose turn it is
    #[error("It is not this player's turn")]
    NotYourTurn,

    /// The line lies outside the board
    #[error("Line ({x}, {y}, {direction:?}) is out of range for a board of {size} dots per side")]
    OutOfRange {
        x: i64,
        y: i64,
        direction: Direction,
        size: u8,
    },

    /// The line has been drawn before
    #[error("Line ({x}, {y}, {direction:?}) is already drawn")]
    AlreadyDrawn { x: u8, y: u8, direction: Direction },

    /// No game is stored under the address
    #[error("Game not found: {0}")]
    GameNotFound(Address),

    /// The opponent is the creator
    #[error("A game needs two distinct players")]
    InvalidOpponent,

    /// Board size outside the supported range
    #[error("Unsupported board size {0}; expected {min} to {max} dots per side", min = crate::board::MIN_BOARD_SIZE, max = crate::board::MAX_BOARD_SIZE)]
    InvalidBoardSize(u8),

    /// The string is not a 46 character address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Signature does not verify or the signer is not the author
    #[error("Move signature does not match its author")]
    InvalidSignature,

    /// The move does not extend the current tip of the move log
    #[error("Move does not follow the latest move of the game")]
    OutOfSequence,

    /// An entry could not be encoded
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

impl GameError {
    /// Stable name of the error variant, used as the error kind on the call surface
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::NotYourTurn => "NotYourTurn",
            GameError::OutOfRange { .. } => "OutOfRange",
            GameError::AlreadyDrawn { .. } => "AlreadyDrawn",
            GameError::GameNotFound(_) => "GameNotFound",
            GameError::InvalidOpponent => "InvalidOpponent",
            GameError::InvalidBoardSize(_) => "InvalidBoardSize",
            GameError::InvalidAddress(_) => "InvalidAddress",
            GameError::InvalidSignature => "InvalidSignature",
            GameError::OutOfSequence => "OutOfSequence",
            GameError::Encoding(_) => "Encoding",
        }
    }
}
