// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared game store
//!
//! Every game sits behind its own read-write lock. The map lock is only
//! held long enough to look a game up or insert one, so moves on different
//! games never contend.

use crate::GameId;
use dots_core::{Address, GameError, GameSession};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub type SharedSession = Arc<RwLock<GameSession>>;

/// In-memory store of all games known to a conductor
#[derive(Clone, Default)]
pub struct GameStore {
    games: Arc<RwLock<HashMap<GameId, SharedSession>>>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new session. If a game with the same id exists, it is kept
    /// and `false` is returned.
    pub fn insert(&self, session: GameSession) -> (GameId, bool) {
        let id = session.id.clone();
        let mut games = self.games.write();
        if games.contains_key(&id) {
            return (id, false);
        }
        games.insert(id.clone(), Arc::new(RwLock::new(session)));
        (id, true)
    }

    /// Handle to a game
    pub fn get(&self, id: &GameId) -> Result<SharedSession, GameError> {
        self.games
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| GameError::GameNotFound(id.clone()))
    }

    /// Owned copy of a game taken under its read lock
    pub fn snapshot(&self, id: &GameId) -> Result<GameSession, GameError> {
        let session = self.get(id)?;
        let guard = session.read();
        Ok(guard.clone())
    }

    /// Run a read-only closure against a game
    pub fn read<R>(&self, id: &GameId, f: impl FnOnce(&GameSession) -> R) -> Result<R, GameError> {
        let session = self.get(id)?;
        let guard = session.read();
        Ok(f(&guard))
    }

    /// Run a mutation against a game while holding its write lock
    pub fn update<R>(
        &self,
        id: &GameId,
        f: impl FnOnce(&mut GameSession) -> Result<R, GameError>,
    ) -> Result<R, GameError> {
        let session = self.get(id)?;
        let mut guard = session.write();
        f(&mut guard)
    }

    /// Ids of all games
    pub fn list(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self.games.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Ids of games an agent plays in
    pub fn games_for(&self, agent: &Address) -> Vec<GameId> {
        let games = self.games.read();
        let mut ids: Vec<GameId> = games
            .iter()
            .filter(|(_, session)| session.read().seat_of(agent).is_some())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
