// SPDX-License-Identifier: MIT OR Apache-2.0

mod common;

use common::{create_game, move_params, spawn_two_agents};
use dots_core::{Direction, MoveType};
use dots_network::ConductorEvent;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_conductor_events() {
    let (conductor, alice, bob) = spawn_two_agents();
    let mut rx = conductor.subscribe();

    let game = create_game(&alice, &bob, 0);
    let event = timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
    assert_eq!(
        event,
        ConductorEvent::GameCreated {
            game_id: game.clone(),
            player_1: alice.address().clone(),
            player_2: bob.address().clone(),
        }
    );

    // Committing the same entry again is silent
    create_game(&alice, &bob, 0);

    bob.call("make_move", move_params(&game, 0, 0, Direction::Up, 1));
    let event = timeout(Duration::from_secs(1), rx.recv()).await.unwrap().unwrap();
    match event {
        ConductorEvent::MoveMade {
            game_id,
            author,
            move_type,
            completed,
            next_player,
        } => {
            assert_eq!(game_id, game);
            assert_eq!(&author, bob.address());
            assert_eq!(move_type, MoveType::place(0, 0, Direction::Up));
            assert_eq!(completed, 0);
            assert_eq!(&next_player, alice.address());
        }
        other => panic!("Expected MoveMade event, got {other:?}"),
    }

    // Rejected moves publish nothing
    bob.call("make_move", move_params(&game, 1, 0, Direction::Up, 2));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_game_finished_event() {
    let (conductor, alice, bob) = spawn_two_agents();
    let game = create_game(&alice, &bob, 0);
    let mut rx = conductor.subscribe();

    let script = [
        (&bob, 0, 0, Direction::Up),
        (&alice, 2, 1, Direction::Up),
        (&bob, 0, 0, Direction::Right),
        (&alice, 1, 0, Direction::Up),
        (&bob, 0, 1, Direction::Right),
        (&bob, 1, 1, Direction::Right),
        (&alice, 0, 1, Direction::Up),
        (&bob, 1, 0, Direction::Right),
        (&alice, 2, 0, Direction::Up),
        (&alice, 1, 1, Direction::Up),
        (&bob, 0, 2, Direction::Right),
        (&bob, 1, 2, Direction::Right),
    ];
    for (i, (agent, x, y, direction)) in script.into_iter().enumerate() {
        let response = agent.call("make_move", move_params(&game, x, y, direction, i as u64));
        assert!(response.get("Ok").is_some(), "move {i}: {response}");
    }

    let mut finished = None;
    while let Ok(event) = rx.try_recv() {
        if let ConductorEvent::GameFinished { player1_boxes, player2_boxes, .. } = event {
            finished = Some((player1_boxes, player2_boxes));
        }
    }
    assert_eq!(finished, Some((1, 3)));
}
