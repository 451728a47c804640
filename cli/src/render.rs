// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text output for the CLI.

use dots_core::{Address, GameSession, MoveType};
use dots_network::ConductorEvent;

/// REPL prompt: `alice> ` or `alice@1a2b3c4d> `
pub fn prompt(agent: &str, game: Option<&Address>) -> String {
    match game {
        Some(game) => format!("{}@{}> ", agent, game.short()),
        None => format!("{}> ", agent),
    }
}

/// One-line summary of a game, naming players through `name_of`
pub fn game_summary(session: &GameSession, name_of: impl Fn(&Address) -> String) -> String {
    let (p1, p2) = session.scores();
    format!(
        "{} {} ({}) vs {} ({}), {} moves, {}, {} to move",
        session.id.short(),
        name_of(&session.game.player_1),
        p1,
        name_of(&session.game.player_2),
        p2,
        session.moves.len(),
        session.status,
        name_of(session.current_player()),
    )
}

pub fn describe_move(move_type: &MoveType) -> String {
    match move_type {
        MoveType::Place { x, y, direction } => format!("{:?} line at ({}, {})", direction, x, y),
    }
}

pub fn describe_event(event: &ConductorEvent, name_of: impl Fn(&Address) -> String) -> String {
    match event {
        ConductorEvent::GameCreated {
            game_id,
            player_1,
            player_2,
        } => format!(
            "[{}] {} started a game against {}",
            game_id.short(),
            name_of(player_1),
            name_of(player_2)
        ),
        ConductorEvent::MoveMade {
            game_id,
            author,
            move_type,
            completed,
            next_player,
        } => {
            let mut text = format!(
                "[{}] {} drew the {}",
                game_id.short(),
                name_of(author),
                describe_move(move_type)
            );
            if *completed > 0 {
                text.push_str(&format!(" and completed {} box(es)", completed));
            }
            text.push_str(&format!(", {} to move", name_of(next_player)));
            text
        }
        ConductorEvent::GameFinished {
            game_id,
            player1_boxes,
            player2_boxes,
        } => format!(
            "[{}] Game over: {} - {}",
            game_id.short(),
            player1_boxes,
            player2_boxes
        ),
    }
}
