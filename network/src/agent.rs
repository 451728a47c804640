// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent identities

use dots_core::{
    entry::{agent_address, signing_key_for},
    Address, GameError, MoveEntry, MoveRecord,
};
use ed25519_dalek::SigningKey;
use std::fmt;

/// A named player with a signing key. The key is derived from the name,
/// so an agent keeps its address across conductor restarts.
pub struct Agent {
    name: String,
    key: SigningKey,
    address: Address,
}

impl Agent {
    pub fn new(name: &str) -> Self {
        let key = signing_key_for(name);
        let address = agent_address(&key.verifying_key());
        Self {
            name: name.to_string(),
            key,
            address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Sign a move entry authored by this agent
    pub fn sign(&self, entry: MoveEntry) -> Result<MoveRecord, GameError> {
        debug_assert_eq!(entry.author, self.address);
        MoveRecord::sign(entry, &self.key)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("address", &self.address)
            .finish()
    }
}
