// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two agents playing from their own tasks, waking on conductor events.

use dots_core::{Address, Direction, GameStatus, MoveInput, MoveType};
use dots_network::{AgentHandle, Conductor, ConductorConfig, ConductorEvent};
use std::time::Duration;
use tokio::time::timeout;

use Direction::{Right, Up};

/// Play `lines` in order, waiting for our turn before each one
async fn play(agent: AgentHandle, conductor: Conductor, game: Address, lines: Vec<(i64, i64, Direction)>) {
    let mut events = conductor.subscribe();
    for (i, (x, y, direction)) in lines.into_iter().enumerate() {
        while agent.get_state(&game).unwrap().current_player() != agent.address() {
            match events.recv().await.unwrap() {
                ConductorEvent::MoveMade { .. } => {}
                other => panic!("unexpected event {other:?}"),
            }
        }
        agent
            .make_move(MoveInput {
                game: game.clone(),
                move_type: MoveType::place(x, y, direction),
                timestamp: i as u64,
            })
            .unwrap();
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_agents_play_from_separate_tasks() {
    let conductor = Conductor::new(ConductorConfig::default()).unwrap();
    let alice = conductor.agent("alice").unwrap();
    let bob = conductor.agent("bob").unwrap();
    let game = alice.create_game(bob.address(), 0).unwrap();

    let alice_lines = vec![(2, 1, Up), (1, 0, Up), (0, 1, Up), (2, 0, Up), (1, 1, Up)];
    let bob_lines = vec![
        (0, 0, Up),
        (0, 0, Right),
        (0, 1, Right),
        (1, 1, Right),
        (1, 0, Right),
        (0, 2, Right),
        (1, 2, Right),
    ];

    let a = tokio::spawn(play(alice.clone(), conductor.clone(), game.clone(), alice_lines));
    let b = tokio::spawn(play(bob.clone(), conductor.clone(), game.clone(), bob_lines));

    timeout(Duration::from_secs(5), async {
        a.await.unwrap();
        b.await.unwrap();
    })
    .await
    .expect("agents finished in time");

    let state = alice.get_state(&game).unwrap();
    assert_eq!(state.status, GameStatus::Finished);
    assert_eq!(state.scores(), (1, 3));
    assert_eq!(state.moves.len(), 12);
}
