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

//! Basic types used in the Trial Registry.

pub mod ed25519;
pub mod message;
pub mod state;

pub mod content_hash;
pub use content_hash::ContentHash;

pub mod patient_id;
pub use patient_id::PatientId;

mod error;
pub use error::RegistryError;

mod hash;
pub use hash::{Hash, Hashing};

pub use state::TrialStatus;

/// Identifier for accounts, an Ed25519 public key.
///
/// Each account has an associated transaction counter, see
/// [TransactionIndex].
pub type AccountId = ed25519::Public;

/// Identifier of a trial record.
///
/// Assigned by the registry sequentially starting at 1. Zero never
/// identifies a trial.
pub type TrialId = u64;

/// Ledger time in milliseconds since the Unix epoch.
///
/// Set by the block author and strictly increasing from one block to the
/// next.
pub type Moment = u64;

/// Counts the transactions an account has submitted.
///
/// Used as the transaction nonce.
pub type TransactionIndex = u32;
