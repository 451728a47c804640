// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process conductor.
//!   * hosts agents that share one game store
//!   * create_game / make_move / get_state / render_state / valid_moves
//!   * broadcast ConductorEvent via tokio::sync::broadcast

use crate::agent::Agent;
use crate::config::ConductorConfig;
use crate::rpc::{self, CallError, CreateGameParams, Function, GameAddressParams, MakeMoveParams};
use crate::store::GameStore;
use crate::GameId;
use anyhow::Result;
use dots_core::{Address, GameEntry, GameError, GameSession, MoveEntry, MoveInput, MoveType};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Events emitted by the conductor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConductorEvent {
    /// A new game was committed
    GameCreated {
        game_id: GameId,
        player_1: Address,
        player_2: Address,
    },
    /// A move was accepted
    MoveMade {
        game_id: GameId,
        author: Address,
        move_type: MoveType,
        /// Boxes completed by the move
        completed: usize,
        /// Agent to move next
        next_player: Address,
    },
    /// The last box of a game was claimed
    GameFinished {
        game_id: GameId,
        player1_boxes: usize,
        player2_boxes: usize,
    },
}

/// Host for agents and their shared games
#[derive(Clone)]
pub struct Conductor {
    config: Arc<ConductorConfig>,
    store: GameStore,
    agents: Arc<RwLock<HashMap<String, Arc<Agent>>>>,
    events_tx: broadcast::Sender<ConductorEvent>,
}

impl Conductor {
    /// Create a conductor and start the agents named in the config
    pub fn new(config: ConductorConfig) -> Result<Self> {
        let _span = tracing::info_span!("network.conductor", op = "new").entered();
        config.validate()?;

        let (events_tx, _) = broadcast::channel(config.event_buffer_size);
        let conductor = Self {
            config: Arc::new(config),
            store: GameStore::new(),
            agents: Arc::new(RwLock::new(HashMap::new())),
            events_tx,
        };

        for name in conductor.config.agents.clone() {
            conductor.add_agent(&name);
        }

        tracing::info!(
            board_size = conductor.config.board_size,
            agents = conductor.config.agents.len(),
            "Conductor started"
        );
        Ok(conductor)
    }

    pub fn config(&self) -> &ConductorConfig {
        &self.config
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// Get a receiver for conductor events
    pub fn subscribe(&self) -> broadcast::Receiver<ConductorEvent> {
        self.events_tx.subscribe()
    }

    /// Start an agent, or return the running one with that name
    pub fn add_agent(&self, name: &str) -> AgentHandle {
        let agent = {
            let mut agents = self.agents.write();
            agents
                .entry(name.to_string())
                .or_insert_with(|| {
                    let agent = Agent::new(name);
                    tracing::debug!(agent = name, address = %agent.address(), "Agent started");
                    Arc::new(agent)
                })
                .clone()
        };
        self.handle(agent)
    }

    /// Look up an agent by name
    pub fn agent(&self, name: &str) -> Option<AgentHandle> {
        let agent = self.agents.read().get(name).cloned()?;
        Some(self.handle(agent))
    }

    /// Look up an agent by address
    pub fn agent_by_address(&self, address: &Address) -> Option<AgentHandle> {
        let agent = self
            .agents
            .read()
            .values()
            .find(|agent| agent.address() == address)
            .cloned()?;
        Some(self.handle(agent))
    }

    /// All agents, sorted by name
    pub fn agents(&self) -> Vec<AgentHandle> {
        let mut agents: Vec<Arc<Agent>> = self.agents.read().values().cloned().collect();
        agents.sort_by(|a, b| a.name().cmp(b.name()));
        agents.into_iter().map(|agent| self.handle(agent)).collect()
    }

    fn handle(&self, agent: Arc<Agent>) -> AgentHandle {
        AgentHandle {
            agent,
            conductor: self.clone(),
        }
    }

    fn publish(&self, event: ConductorEvent) {
        // Nobody listening is fine
        if self.events_tx.send(event).is_err() {
            tracing::trace!("No event subscribers");
        }
    }
}

/// An agent's view of the conductor; every call is made on its behalf
#[derive(Clone)]
pub struct AgentHandle {
    agent: Arc<Agent>,
    conductor: Conductor,
}

impl std::fmt::Debug for AgentHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AgentHandle").field(&self.agent).finish()
    }
}

impl AgentHandle {
    pub fn name(&self) -> &str {
        self.agent.name()
    }

    pub fn address(&self) -> &Address {
        self.agent.address()
    }

    /// Create a game against `opponent`, who moves first.
    ///
    /// Committing the same players and timestamp again returns the existing game.
    pub fn create_game(&self, opponent: &Address, timestamp: u64) -> Result<GameId, GameError> {
        let _span =
            tracing::info_span!("network.conductor", op = "create_game", agent = self.name()).entered();

        let entry = GameEntry {
            player_1: self.address().clone(),
            player_2: opponent.clone(),
            created_at: timestamp,
            board_size: self.conductor.config.board_size,
        };
        let session = GameSession::create(entry)?;
        let (game_id, created) = self.conductor.store.insert(session);

        if created {
            tracing::info!(game_id = %game_id, opponent = %opponent.short(), "Game created");
            self.conductor.publish(ConductorEvent::GameCreated {
                game_id: game_id.clone(),
                player_1: self.address().clone(),
                player_2: opponent.clone(),
            });
        } else {
            tracing::debug!(game_id = %game_id, "Game entry already committed");
        }

        Ok(game_id)
    }

    /// Author, sign and apply a move. Returns the address of the new game state.
    pub fn make_move(&self, input: MoveInput) -> Result<Address, GameError> {
        let _span =
            tracing::info_span!("network.conductor", op = "make_move", agent = self.name()).entered();

        // Published under the write lock: event order is move log order
        let result = self.conductor.store.update(&input.game, |session| {
            let entry = MoveEntry {
                game: input.game.clone(),
                author: self.address().clone(),
                move_type: input.move_type.clone(),
                timestamp: input.timestamp,
                previous_move: session.last_move_address().cloned(),
            };
            let record = self.agent.sign(entry)?;
            let outcome = session.apply(record)?;
            let digest = session.digest()?;

            self.conductor.publish(ConductorEvent::MoveMade {
                game_id: session.id.clone(),
                author: self.address().clone(),
                move_type: input.move_type.clone(),
                completed: outcome.completed.len(),
                next_player: session.current_player().clone(),
            });
            if session.is_finished() {
                let (player1_boxes, player2_boxes) = session.scores();
                self.conductor.publish(ConductorEvent::GameFinished {
                    game_id: session.id.clone(),
                    player1_boxes,
                    player2_boxes,
                });
            }
            Ok(digest)
        });

        if let Err(e) = &result {
            tracing::debug!(game_id = %input.game.short(), error = %e, "Move rejected");
        }
        result
    }

    /// Owned snapshot of a game
    pub fn get_state(&self, game_address: &GameId) -> Result<GameSession, GameError> {
        self.conductor.store.snapshot(game_address)
    }

    /// Text rendering of a game
    pub fn render_state(&self, game_address: &GameId) -> Result<String, GameError> {
        self.conductor.store.read(game_address, |session| session.render())
    }

    /// One example of every move variant
    pub fn valid_moves(&self) -> Vec<MoveType> {
        MoveType::describe()
    }

    /// Games this agent plays in
    pub fn my_games(&self) -> Vec<GameId> {
        self.conductor.store.games_for(self.address())
    }

    /// Call a function by name with JSON parameters, answering with an Ok/Err envelope
    pub fn call(&self, function: &str, params: Value) -> Value {
        let response = self.try_call(function, params);
        if let Err(e) = &response {
            tracing::debug!(agent = self.name(), function, error = %e, "Call failed");
        }
        rpc::envelope(response)
    }

    /// Call a function by name with JSON parameters
    pub fn try_call(&self, function: &str, params: Value) -> Result<Value, CallError> {
        let to_value = |v: Result<Value, serde_json::Error>| {
            v.map_err(|e| CallError::Game(GameError::Encoding(e.to_string())))
        };

        match function.parse::<Function>()? {
            Function::CreateGame => {
                let p: CreateGameParams = rpc::parse_params(params)?;
                to_value(serde_json::to_value(self.create_game(&p.opponent, p.timestamp)?))
            }
            Function::MakeMove => {
                let p: MakeMoveParams = rpc::parse_params(params)?;
                to_value(serde_json::to_value(self.make_move(p.new_move)?))
            }
            Function::GetState => {
                let p: GameAddressParams = rpc::parse_params(params)?;
                to_value(serde_json::to_value(self.get_state(&p.game_address)?))
            }
            Function::RenderState => {
                let p: GameAddressParams = rpc::parse_params(params)?;
                Ok(Value::String(self.render_state(&p.game_address)?))
            }
            Function::ValidMoves => to_value(serde_json::to_value(self.valid_moves())),
        }
    }
}
