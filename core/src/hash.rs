// Trial Registry
// Copyright (C) 2026 Trial Registry developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Ledger hashes and the hashing algorithm computing them.
//!
//! Transactions and block headers are identified by the BLAKE3 digest of
//! their SCALE encoding. Not to be confused with [crate::ContentHash] which
//! references the external content store.

use std::fmt;
use std::str::FromStr;

use codec::{Decode, Encode};
use thiserror::Error as ThisError;

/// A 32 byte ledger hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct Hash([u8; 32]);

impl Hash {
    pub const fn zero() -> Self {
        Hash([0u8; 32])
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Random hash for use in tests and generated fixtures.
    pub fn random() -> Self {
        Hash(rand::random())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}

/// Error parsing a [Hash] from a string.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("invalid hash, expected 64 hex characters")]
pub struct InvalidHashError;

impl FromStr for Hash {
    type Err = InvalidHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| InvalidHashError)?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| InvalidHashError)?;
        Ok(Hash(bytes))
    }
}

/// The hashing algorithm the ledger uses.
pub struct Hashing;

impl Hashing {
    pub fn hash(data: &[u8]) -> Hash {
        Hash(*blake3::hash(data).as_bytes())
    }

    /// Hash of the SCALE encoding of `value`.
    pub fn hash_of<T: Encode>(value: &T) -> Hash {
        Self::hash(&value.encode())
    }
}
