// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common utilities for conductor integration tests

#![allow(dead_code)]

use dots_core::{Address, Direction, MoveType};
use dots_network::{AgentHandle, Conductor, ConductorConfig};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

// Initialize logging for tests
static INIT_LOGGING: Lazy<()> = Lazy::new(|| {
    // Only show warnings and errors unless RUST_LOG is explicitly set
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
});

pub fn init_logging() {
    Lazy::force(&INIT_LOGGING);
}

/// Start a conductor with alice and bob on the default board
pub fn spawn_two_agents() -> (Conductor, AgentHandle, AgentHandle) {
    init_logging();
    let conductor = Conductor::new(ConductorConfig::default()).expect("default config is valid");
    let alice = conductor.agent("alice").expect("alice is configured");
    let bob = conductor.agent("bob").expect("bob is configured");
    (conductor, alice, bob)
}

/// JSON parameters for a `make_move` call
pub fn move_params(game: &Address, x: i64, y: i64, direction: Direction, timestamp: u64) -> Value {
    json!({
        "new_move": {
            "game": game,
            "move_type": MoveType::place(x, y, direction),
            "timestamp": timestamp,
        }
    })
}

/// Create a game between `creator` and `opponent` through the call surface
pub fn create_game(creator: &AgentHandle, opponent: &AgentHandle, timestamp: u64) -> Address {
    let response = creator.call(
        "create_game",
        json!({ "opponent": opponent.address(), "timestamp": timestamp }),
    );
    serde_json::from_value(response["Ok"].clone()).expect("create_game answers with a game id")
}
