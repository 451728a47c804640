// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entries committed by agents: games and signed moves
//!
//! Entries are encoded with CBOR before hashing or signing so that every
//! agent derives the same bytes, and therefore the same address, for the
//! same content.

use crate::{Address, GameError, MoveType};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

/// The entry that defines a game; its address is the game id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    /// Creator of the game
    pub player_1: Address,
    /// Invited opponent, who moves first
    pub player_2: Address,
    /// Caller-supplied creation timestamp
    pub created_at: u64,
    /// Dots per side
    pub board_size: u8,
}

impl GameEntry {
    pub fn address(&self) -> Result<Address, GameError> {
        Address::of(self)
    }
}

/// A move authored by an agent, chained to the previous move of the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub game: Address,
    pub author: Address,
    pub move_type: MoveType,
    pub timestamp: u64,
    /// Address of the move this one follows, `None` for the opening move
    pub previous_move: Option<Address>,
}

impl MoveEntry {
    /// Canonical CBOR bytes, the payload that gets signed
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        serde_cbor::to_vec(self).map_err(|e| GameError::Encoding(e.to_string()))
    }

    pub fn address(&self) -> Result<Address, GameError> {
        Ok(Address::from_bytes(&self.to_bytes()?))
    }
}

/// A move entry with its author's signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub entry: MoveEntry,
    /// Public key of the signer
    pub signer: VerifyingKey,
    /// Signature over the CBOR encoding of `entry`
    pub signature: Signature,
}

impl MoveRecord {
    /// Sign an entry
    pub fn sign(entry: MoveEntry, key: &SigningKey) -> Result<Self, GameError> {
        let signature = key.sign(&entry.to_bytes()?);
        Ok(Self {
            entry,
            signer: key.verifying_key(),
            signature,
        })
    }

    /// Check the signature and that the signer is the entry's author
    pub fn verify(&self) -> Result<(), GameError> {
        if agent_address(&self.signer) != self.entry.author {
            tracing::debug!(author = %self.entry.author, "Signer does not match move author");
            return Err(GameError::InvalidSignature);
        }

        self.signer
            .verify(&self.entry.to_bytes()?, &self.signature)
            .map_err(|_| GameError::InvalidSignature)
    }
}

/// Address of an agent: the content address of its public key
pub fn agent_address(key: &VerifyingKey) -> Address {
    Address::from_bytes(key.as_bytes())
}

/// Deterministic signing key for a named agent
pub fn signing_key_for(name: &str) -> SigningKey {
    let seed = blake3::derive_key("dots-and-boxes agent key v1", name.as_bytes());
    SigningKey::from_bytes(&seed)
}
