// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted Dots and Boxes game between two local agents
//!
//! Replays the reference game through the JSON call surface and prints
//! every answer, then the final board.
//! Run with: cargo run --bin demo_game

use anyhow::{Context, Result};
use dots_core::{Direction, MoveType};
use dots_network::{rpc::open_envelope, Conductor, ConductorConfig};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use Direction::{Right, Up};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let conductor = Conductor::new(ConductorConfig::default())?;
    let alice = conductor.agent("alice").context("alice is not running")?;
    let bob = conductor.agent("bob").context("bob is not running")?;

    let response = alice.call(
        "create_game",
        json!({ "opponent": bob.address(), "timestamp": 0 }),
    );
    let game = open_envelope(&response)
        .map_err(|e| anyhow::anyhow!("create_game failed: {}", e.message))?
        .clone();
    println!("alice created game {}", game);

    let script = [
        (&alice, 2, 1, Up),
        (&bob, 0, 2, Up),
        (&bob, 2, 0, Right),
        (&bob, 0, -1, Up),
        (&bob, -1, 0, Right),
        (&bob, 0, 0, Up),
        (&alice, 0, 0, Up),
        (&alice, 2, 1, Up),
        (&bob, 0, 0, Right),
        (&alice, 1, 0, Up),
        (&bob, 0, 1, Right),
        (&alice, 1, 1, Right),
        (&bob, 1, 1, Right),
        (&alice, 0, 1, Up),
        (&bob, 1, 0, Right),
        (&alice, 2, 0, Up),
        (&alice, 1, 1, Up),
        (&bob, 0, 2, Right),
        (&bob, 1, 2, Right),
    ];

    for (step, (agent, x, y, direction)) in script.into_iter().enumerate() {
        let params = json!({
            "new_move": {
                "game": game,
                "move_type": MoveType::place(x, y, direction),
                "timestamp": step + 1,
            }
        });
        let response = agent.call("make_move", params);
        match open_envelope(&response) {
            Ok(digest) => println!("{:>5} {:>2} {:>2} {:<5} -> Ok {}", agent.name(), x, y, format!("{:?}", direction), digest),
            Err(e) => println!("{:>5} {:>2} {:>2} {:<5} -> Err {}", agent.name(), x, y, format!("{:?}", direction), e.kind),
        }
    }

    let response = alice.call("render_state", json!({ "game_address": game }));
    let board = open_envelope(&response)
        .map_err(|e| anyhow::anyhow!("render_state failed: {}", e.message))?;
    println!("{}", board.as_str().unwrap_or_default());

    Ok(())
}
