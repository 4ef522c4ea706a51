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

//! The ledger state machine hosting the trial registry contract.
//!
//! The [Ledger] applies signed [extrinsic::UncheckedExtrinsic]s one block at
//! a time, dispatching their calls to the [registry] module and recording
//! the emitted [Event]s per transaction. Both the in-process emulator and
//! the development node drive the same [Ledger]; the client only ever sees
//! its storage bytes, headers and transaction statuses.

use codec::{Decode, Encode};

use trial_registry_core::{Hash, Hashing, Moment};

pub mod event;
pub mod extrinsic;
pub mod genesis;
pub mod ledger;
pub mod registry;
pub mod storage;

pub use event::{Event, SystemEvent};
pub use extrinsic::{SignedExtra, UncheckedExtrinsic};
pub use genesis::GenesisConfig;
pub use ledger::{InvalidTransaction, Ledger, TransactionStatus};
pub use registry::Event as RegistryEvent;
pub use storage::Storage;

/// Height of a block in the chain. The genesis block has number 0.
pub type BlockNumber = u32;

/// A block header.
///
/// There is no state root; the development chain does not prove state, it
/// serves it.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct Header {
    pub parent_hash: Hash,
    pub number: BlockNumber,
    /// Hash of the list of transaction hashes included in the block.
    pub extrinsics_root: Hash,
    pub timestamp: Moment,
}

impl Header {
    pub fn hash(&self) -> Hash {
        Hashing::hash_of(self)
    }
}

/// The calls the runtime can dispatch, one variant per module.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub enum Call {
    Registry(registry::Call),
}

impl From<registry::Call> for Call {
    fn from(call: registry::Call) -> Self {
        Call::Registry(call)
    }
}

/// Identifies the runtime a node executes.
///
/// Clients check this on connect and refuse nodes running an incompatible
/// runtime.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct RuntimeVersion {
    pub spec_name: String,
    pub spec_version: u32,
}

/// The version of the runtime in this crate.
pub fn version() -> RuntimeVersion {
    RuntimeVersion {
        spec_name: "trial-registry".to_string(),
        spec_version: 1,
    }
}
