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

//! Ed25519 key pairs, public keys and signatures.
//!
//! Transactions are authored by signing their payload with [Pair] and
//! verified against the author's [Public] key.

use std::fmt;
use std::str::FromStr;

use codec::{Decode, Encode};
use ed25519_dalek::Signer as _;
use thiserror::Error as ThisError;

/// Length of the seed a key pair is derived from.
pub const SEED_LENGTH: usize = 32;

/// An Ed25519 public key.
///
/// Displayed and parsed as 64 hex characters with an optional `0x` prefix.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct Public(pub [u8; 32]);

impl Public {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Public {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Public {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Public({})", self)
    }
}

/// Error parsing a [Public] key from a string.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("invalid account address, expected 64 hex characters")]
pub struct InvalidPublicError;

impl FromStr for Public {
    type Err = InvalidPublicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|_| InvalidPublicError)?;
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| InvalidPublicError)?;
        Ok(Public(bytes))
    }
}

/// An Ed25519 signature over a transaction payload.
#[derive(Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct Signature(pub [u8; 64]);

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Signature(0x{})", hex::encode(&self.0[..]))
    }
}

/// An Ed25519 key pair used to author transactions.
#[derive(Clone)]
pub struct Pair {
    signing_key: ed25519_dalek::SigningKey,
}

/// Error returned when a development phrase is malformed.
///
/// See [Pair::from_string].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("invalid development phrase, expected a string starting with \"//\"")]
pub struct InvalidPhrase;

impl Pair {
    /// Create a key pair from random seed data.
    pub fn generate() -> Self {
        let seed: [u8; SEED_LENGTH] = rand::random();
        Self::from_seed(&seed)
    }

    /// Deterministically create a key pair from seed data.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        Pair {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// Create a key pair from a development phrase like `//Alice`.
    ///
    /// The seed is the BLAKE3 digest of the whole phrase. The development
    /// chain initializes its genesis state from accounts derived this way.
    pub fn from_string(s: &str) -> Result<Self, InvalidPhrase> {
        if !s.starts_with("//") {
            return Err(InvalidPhrase);
        }
        let seed = *blake3::hash(s.as_bytes()).as_bytes();
        Ok(Self::from_seed(&seed))
    }

    pub fn public(&self) -> Public {
        Public(self.signing_key.verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pair({})", self.public())
    }
}

/// Verify that `signature` is valid for `message` under `public`.
///
/// Returns `false` for signatures that do not verify and for public keys
/// that are not valid curve points.
pub fn verify(signature: &Signature, message: &[u8], public: &Public) -> bool {
    let key = match ed25519_dalek::VerifyingKey::from_bytes(&public.0) {
        Ok(key) => key,
        Err(_) => return false,
    };
    let signature = ed25519_dalek::Signature::from_bytes(&signature.0);
    key.verify_strict(message, &signature).is_ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let pair = Pair::generate();
        let message = b"trial registry";
        let signature = pair.sign(message);
        assert!(verify(&signature, message, &pair.public()));
    }

    #[test]
    fn verify_rejects_tampered_message() {
        let pair = Pair::generate();
        let signature = pair.sign(b"trial registry");
        assert!(!verify(&signature, b"trial registrY", &pair.public()));
    }

    #[test]
    fn verify_rejects_other_author() {
        let pair = Pair::generate();
        let other = Pair::generate();
        let message = b"trial registry";
        let signature = pair.sign(message);
        assert!(!verify(&signature, message, &other.public()));
    }

    #[test]
    fn from_string_is_deterministic() {
        let alice = Pair::from_string("//Alice").unwrap();
        let alice_again = Pair::from_string("//Alice").unwrap();
        let bob = Pair::from_string("//Bob").unwrap();
        assert_eq!(alice.public(), alice_again.public());
        assert_ne!(alice.public(), bob.public());
    }

    #[test]
    fn from_string_requires_prefix() {
        assert_eq!(Pair::from_string("Alice").unwrap_err(), InvalidPhrase);
    }

    #[test]
    fn public_display_parse_roundtrip() {
        let public = Pair::generate().public();
        let parsed = Public::from_str(&public.to_string()).unwrap();
        assert_eq!(public, parsed);
    }

    #[test]
    fn public_parse_rejects_bad_input() {
        assert!(Public::from_str("0xnothex").is_err());
        assert!(Public::from_str("0xab").is_err());
    }
}
