// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dots and Boxes Network - local conductor and call surface
//!
//! This crate provides the service side of the game:
//! - Agents with stable ed25519 identities
//! - A shared game store with one lock per game
//! - The conductor, which exposes `create_game`, `make_move`, `get_state`,
//!   `render_state` and `valid_moves` both as typed calls and as JSON calls
//! - Configuration loading

#![deny(unsafe_code)]

pub mod agent;
pub mod conductor;
pub mod config;
pub mod rpc;
pub mod store;

pub use agent::Agent;
pub use conductor::{AgentHandle, Conductor, ConductorEvent};
pub use config::ConductorConfig;
pub use rpc::{CallError, ErrorPayload};
pub use store::GameStore;

/// Game ids are content addresses
pub type GameId = dots_core::Address;
