// SPDX-License-Identifier: MIT OR Apache-2.0

mod common;

use common::{create_game, move_params, spawn_two_agents};
use dots_core::{Direction, GameStatus};
use dots_network::ConductorEvent;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_racing_moves_on_one_game_serialize() {
    let (_conductor, alice, bob) = spawn_two_agents();
    let game = create_game(&alice, &bob, 0);

    let lines = [
        (0, 0, Direction::Up),
        (1, 0, Direction::Up),
        (2, 0, Direction::Up),
        (0, 1, Direction::Up),
        (0, 0, Direction::Right),
        (1, 0, Direction::Right),
        (0, 1, Direction::Right),
        (1, 2, Direction::Right),
    ];

    // Every thread races bob's opening move on a different line
    let barrier = Arc::new(Barrier::new(lines.len()));
    let handles: Vec<_> = lines
        .into_iter()
        .enumerate()
        .map(|(i, (x, y, direction))| {
            let bob = bob.clone();
            let game = game.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                bob.call("make_move", move_params(&game, x, y, direction, i as u64))
            })
        })
        .collect();

    let responses: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let accepted = responses.iter().filter(|r| r.get("Ok").is_some()).count();
    assert_eq!(accepted, 1);
    for rejected in responses.iter().filter(|r| r.get("Err").is_some()) {
        assert_eq!(rejected["Err"]["kind"], "NotYourTurn");
    }

    let state = alice.get_state(&game).unwrap();
    assert_eq!(state.moves.len(), 1);
    assert_eq!(state.status, GameStatus::InProgress);
    assert_eq!(state.current_player(), alice.address());
}

#[test]
fn test_games_progress_independently() {
    let (conductor, alice, bob) = spawn_two_agents();
    let games: Vec<_> = (0..4).map(|t| create_game(&alice, &bob, t)).collect();

    thread::scope(|scope| {
        for game in &games {
            let (alice, bob) = (alice.clone(), bob.clone());
            scope.spawn(move || {
                let first = bob.call("make_move", move_params(game, 0, 0, Direction::Up, 1));
                let second = alice.call("make_move", move_params(game, 1, 0, Direction::Up, 2));
                assert!(first.get("Ok").is_some());
                assert!(second.get("Ok").is_some());
            });
        }
    });

    for game in &games {
        assert_eq!(conductor.store().snapshot(game).unwrap().moves.len(), 2);
    }
}

#[test]
fn test_move_events_follow_the_log_order() {
    let (conductor, alice, bob) = spawn_two_agents();
    let game = create_game(&alice, &bob, 0);
    let mut rx = conductor.subscribe();

    let alice_lines = vec![
        (2, 1, Direction::Up),
        (1, 0, Direction::Up),
        (0, 1, Direction::Up),
        (2, 0, Direction::Up),
        (1, 1, Direction::Up),
    ];
    let bob_lines = vec![
        (0, 0, Direction::Up),
        (0, 0, Direction::Right),
        (0, 1, Direction::Right),
        (1, 1, Direction::Right),
        (1, 0, Direction::Right),
        (0, 2, Direction::Right),
        (1, 2, Direction::Right),
    ];

    // Each agent keeps retrying its next line until the game accepts it
    thread::scope(|scope| {
        for (agent, lines) in [(&alice, alice_lines), (&bob, bob_lines)] {
            let game = &game;
            scope.spawn(move || {
                for (i, (x, y, direction)) in lines.into_iter().enumerate() {
                    loop {
                        let params = move_params(game, x, y, direction, i as u64);
                        let response = agent.call("make_move", params);
                        if response.get("Ok").is_some() {
                            break;
                        }
                        assert_eq!(response["Err"]["kind"], "NotYourTurn");
                        thread::yield_now();
                    }
                }
            });
        }
    });

    let state = alice.get_state(&game).unwrap();
    assert_eq!(state.status, GameStatus::Finished);

    let mut published = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let ConductorEvent::MoveMade { author, move_type, .. } = event {
            published.push((author, move_type));
        }
    }
    let logged: Vec<_> = state
        .moves
        .iter()
        .map(|m| (m.record.entry.author.clone(), m.record.entry.move_type.clone()))
        .collect();
    assert_eq!(published, logged);
}
