// SPDX-License-Identifier: MIT OR Apache-2.0

use dots_core::{
    entry::{agent_address, signing_key_for},
    Address, BoxCoord, Direction, GameEntry, GameError, GameSession, GameStatus, MoveEntry,
    MoveRecord, MoveType, Seat,
};
use ed25519_dalek::SigningKey;

struct Agent {
    key: SigningKey,
    address: Address,
}

impl Agent {
    fn new(name: &str) -> Self {
        let key = signing_key_for(name);
        let address = agent_address(&key.verifying_key());
        Self { key, address }
    }

    fn play(&self, session: &mut GameSession, x: i64, y: i64, direction: Direction) -> Result<(), GameError> {
        let entry = MoveEntry {
            game: session.id.clone(),
            author: self.address.clone(),
            move_type: MoveType::place(x, y, direction),
            timestamp: session.moves.len() as u64 + 10,
            previous_move: session.last_move_address().cloned(),
        };
        let record = MoveRecord::sign(entry, &self.key)?;
        session.apply(record).map(|_| ())
    }
}

fn new_game(alice: &Agent, bob: &Agent) -> GameSession {
    GameSession::create(GameEntry {
        player_1: alice.address.clone(),
        player_2: bob.address.clone(),
        created_at: 0,
        board_size: 3,
    })
    .unwrap()
}

#[test]
fn opponent_moves_first() {
    let (alice, bob) = (Agent::new("alice"), Agent::new("bob"));
    let mut game = new_game(&alice, &bob);

    assert_eq!(alice.play(&mut game, 2, 1, Direction::Up), Err(GameError::NotYourTurn));
    assert!(bob.play(&mut game, 0, 0, Direction::Up).is_ok());
    assert_eq!(game.current_turn, Seat::One);
}

#[test]
fn out_of_range_checked_before_already_drawn() {
    let (alice, bob) = (Agent::new("alice"), Agent::new("bob"));
    let mut game = new_game(&alice, &bob);

    for (x, y, dir) in [
        (0, 2, Direction::Up),
        (2, 0, Direction::Right),
        (0, -1, Direction::Up),
        (-1, 0, Direction::Right),
    ] {
        let err = bob.play(&mut game, x, y, dir).unwrap_err();
        assert_eq!(err.kind(), "OutOfRange", "({x}, {y}, {dir:?})");
    }
    assert!(game.moves.is_empty());

    bob.play(&mut game, 0, 0, Direction::Up).unwrap();
    assert!(matches!(
        alice.play(&mut game, 0, 0, Direction::Up),
        Err(GameError::AlreadyDrawn { x: 0, y: 0, direction: Direction::Up })
    ));
}

#[test]
fn full_scripted_game() {
    let (alice, bob) = (Agent::new("alice"), Agent::new("bob"));
    let mut game = new_game(&alice, &bob);

    bob.play(&mut game, 0, 0, Direction::Up).unwrap();
    alice.play(&mut game, 2, 1, Direction::Up).unwrap();
    bob.play(&mut game, 0, 0, Direction::Right).unwrap();
    alice.play(&mut game, 1, 0, Direction::Up).unwrap();

    // Fourth side of the bottom left box: bob keeps the turn
    bob.play(&mut game, 0, 1, Direction::Right).unwrap();
    assert_eq!(game.board.owner(BoxCoord::new(0, 0)), Some(Seat::Two));
    assert_eq!(alice.play(&mut game, 1, 1, Direction::Right), Err(GameError::NotYourTurn));

    bob.play(&mut game, 1, 1, Direction::Right).unwrap();
    alice.play(&mut game, 0, 1, Direction::Up).unwrap();
    bob.play(&mut game, 1, 0, Direction::Right).unwrap();
    alice.play(&mut game, 2, 0, Direction::Up).unwrap();
    alice.play(&mut game, 1, 1, Direction::Up).unwrap();
    bob.play(&mut game, 0, 2, Direction::Right).unwrap();
    assert_eq!(game.status, GameStatus::InProgress);
    bob.play(&mut game, 1, 2, Direction::Right).unwrap();

    assert_eq!(game.status, GameStatus::Finished);
    assert!(game.board.all_boxes_owned());
    assert_eq!(game.scores(), (1, 3));
    assert_eq!(game.moves.len(), 12);
    assert_eq!(game.board.drawn_count(), game.board.line_count());

    // Nothing left to draw
    assert!(matches!(
        bob.play(&mut game, 0, 0, Direction::Up),
        Err(GameError::AlreadyDrawn { .. })
    ));
}

#[test]
fn larger_board_sizes_are_supported() {
    let (alice, bob) = (Agent::new("alice"), Agent::new("bob"));
    let mut game = GameSession::create(GameEntry {
        player_1: alice.address.clone(),
        player_2: bob.address.clone(),
        created_at: 5,
        board_size: 5,
    })
    .unwrap();

    assert_eq!(game.board.box_count(), 16);
    assert!(bob.play(&mut game, 4, 3, Direction::Up).is_ok());
    assert_eq!(
        alice.play(&mut game, 4, 0, Direction::Right).unwrap_err().kind(),
        "OutOfRange"
    );
}
