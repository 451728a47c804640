// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content addresses for games, moves, agents and state snapshots
//!
//! An address is the BLAKE3 digest of an entry's CBOR encoding, truncated
//! to 23 bytes and hex encoded, which gives the 46 character identifiers
//! callers see for every game.

use crate::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of an address string
pub const ADDRESS_LEN: usize = 46;

const DIGEST_BYTES: usize = ADDRESS_LEN / 2;

/// Content-derived identifier
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Address of a serializable entry
    pub fn of<T: Serialize>(entry: &T) -> Result<Self, GameError> {
        let bytes = serde_cbor::to_vec(entry).map_err(|e| GameError::Encoding(e.to_string()))?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Address of raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let digest = blake3::hash(bytes);
        Self(hex::encode(&digest.as_bytes()[..DIGEST_BYTES]))
    }

    /// Parse and validate an address string
    pub fn parse(s: &str) -> Result<Self, GameError> {
        let s = s.trim();
        if s.len() != ADDRESS_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GameError::InvalidAddress(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Check whether a string looks like an address
    pub fn is_address(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, for log lines and prompts
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl FromStr for Address {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}
