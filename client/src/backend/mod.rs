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

//! Define trait for client backends and provide emulator and remote node
//! implementations.

pub use trial_registry_runtime::UncheckedExtrinsic;

use crate::interface::*;

mod emulator;
mod remote_node;

pub use emulator::Emulator;
pub use remote_node::RemoteNode;

/// Indicator that a transaction has been included in a block and has run in
/// the runtime.
///
/// Obtained after a transaction has been submitted and processed.
pub struct TransactionApplied {
    pub tx_hash: TxHash,
    /// The hash of the block the transaction is included in.
    pub block: BlockHash,
    /// Events emitted by this transaction.
    pub events: Vec<Event>,
}

/// Backend for talking to the registry ledger.
///
/// The interface is low-level and mostly agnostic of the runtime code. The
/// events attached to [TransactionApplied] mark an exception.
#[async_trait::async_trait]
pub trait Backend {
    /// Submit a signed transaction to the ledger.
    ///
    /// Succeeds when the transaction has been accepted for inclusion. The
    /// returned [Response] resolves when it has been included in a block.
    async fn submit(
        &self,
        xt: UncheckedExtrinsic,
    ) -> Result<Response<TransactionApplied, Error>, Error>;

    /// Fetch a value from the ledger state storage.
    async fn fetch(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Error>;

    /// Fetch all storage keys starting with the given prefix.
    async fn fetch_keys(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>, Error>;

    /// Fetch the header of the latest block.
    async fn block_header_best_chain(&self) -> Result<Header, Error>;

    /// Fetch the version of the runtime the backend executes.
    async fn onchain_runtime_version(&self) -> Result<RuntimeVersion, Error>;

    /// Get the genesis hash of the chain. This must be obtained on backend
    /// creation.
    fn genesis_hash(&self) -> Hash;
}
