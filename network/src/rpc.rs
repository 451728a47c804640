// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON call surface
//!
//! Every call answers with exactly one of `{"Ok": value}` or
//! `{"Err": {"kind": ..., "message": ...}}`.

use dots_core::{Address, GameError, MoveInput};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;
use thiserror::Error;

/// Functions reachable through `AgentHandle::call`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    CreateGame,
    MakeMove,
    GetState,
    RenderState,
    ValidMoves,
}

impl FromStr for Function {
    type Err = CallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_game" => Ok(Function::CreateGame),
            "make_move" => Ok(Function::MakeMove),
            "get_state" => Ok(Function::GetState),
            "render_state" => Ok(Function::RenderState),
            "valid_moves" => Ok(Function::ValidMoves),
            other => Err(CallError::UnknownFunction(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGameParams {
    pub opponent: Address,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeMoveParams {
    pub new_move: MoveInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAddressParams {
    pub game_address: Address,
}

/// Body of an `Err` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub kind: String,
    pub message: String,
}

/// Failures of a call
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CallError {
    /// The game rejected the call
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl CallError {
    pub fn kind(&self) -> &'static str {
        match self {
            CallError::Game(e) => e.kind(),
            CallError::UnknownFunction(_) | CallError::BadRequest(_) => "BadRequest",
        }
    }

    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            kind: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// Decode call parameters
pub fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, CallError> {
    serde_json::from_value(params).map_err(|e| CallError::BadRequest(e.to_string()))
}

/// Wrap a call result in its response envelope
pub fn envelope<T: Serialize>(result: Result<T, CallError>) -> Value {
    let result = result.and_then(|value| {
        serde_json::to_value(value).map_err(|e| CallError::Game(GameError::Encoding(e.to_string())))
    });

    match result {
        Ok(value) => json!({ "Ok": value }),
        Err(err) => json!({ "Err": err.payload() }),
    }
}

/// Split a response envelope back into a result
pub fn open_envelope(response: &Value) -> Result<&Value, ErrorPayload> {
    if let Some(err) = response.get("Err") {
        return Err(serde_json::from_value(err.clone()).unwrap_or_else(|_| ErrorPayload {
            kind: "BadRequest".to_string(),
            message: err.to_string(),
        }));
    }
    response.get("Ok").ok_or_else(|| ErrorPayload {
        kind: "BadRequest".to_string(),
        message: "Response carries neither Ok nor Err".to_string(),
    })
}
