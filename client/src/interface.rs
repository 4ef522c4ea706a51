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

//! Provides the [ClientT] trait and re-exports the types it builds on.

use futures::future::BoxFuture;

pub use trial_registry_core::{
    ed25519, message, state, AccountId, ContentHash, Hash, Hashing, Moment, PatientId,
    RegistryError, TransactionIndex, TrialId, TrialStatus,
};
pub use trial_registry_runtime::{Event, Header, RegistryEvent, RuntimeVersion, SystemEvent};

pub use crate::error::Error;
pub use crate::message::Message;
pub use crate::transaction::{Transaction, TransactionExtra};

/// The hash of a signed transaction, used to identify it in a pool or block.
pub type TxHash = Hash;

/// The hash of a ledger block.
pub type BlockHash = Hash;

/// Result of a transaction that has been included in a block.
pub struct TransactionIncluded<Message_: Message> {
    pub tx_hash: TxHash,
    /// The hash of the block the transaction is included in.
    pub block: BlockHash,
    /// The events emitted by this transaction.
    pub events: Vec<Event>,
    /// The result of applying the transaction message to the ledger state.
    ///
    /// [Err] means the transaction was included in a block but its message
    /// was rejected by the registry and the state is unchanged.
    pub result: Result<Message_::Output, RegistryError>,
}

/// Boxed future of the eventual response to a two-phase call.
///
/// The first phase resolves when the transaction has been accepted into the
/// node's pool, the [Response] when it has been included in a block.
pub type Response<T, Error> = BoxFuture<'static, Result<T, Error>>;

/// Trait for ledger clients.
#[async_trait::async_trait]
pub trait ClientT {
    /// Submit a signed transaction.
    ///
    /// Succeeds if the transaction has been accepted by the node. The returned
    /// [Response] resolves once the transaction is included in a block, with
    /// the outcome of applying its message.
    async fn submit_transaction<Message_: Message>(
        &self,
        transaction: Transaction<Message_>,
    ) -> Result<Response<TransactionIncluded<Message_>, Error>, Error>;

    /// Sign a message with the given author and submit it as a transaction.
    ///
    /// Fetches the author's next nonce from the node. Care must be taken not
    /// to submit two transactions for the same author concurrently, the
    /// second would reuse the nonce and be rejected.
    async fn sign_and_submit_message<Message_: Message>(
        &self,
        author: &ed25519::Pair,
        message: Message_,
    ) -> Result<Response<TransactionIncluded<Message_>, Error>, Error>;

    /// List the accounts the ledger knows, in the byte order of their public
    /// keys. An account is known once it has transacted or was seeded at
    /// genesis.
    async fn list_accounts(&self) -> Result<Vec<AccountId>, Error>;

    /// The nonce the next transaction of this account must carry.
    async fn account_nonce(&self, account_id: &AccountId) -> Result<TransactionIndex, Error>;

    /// Fetch a trial by id. Returns [None] if no trial with this id has been
    /// registered.
    async fn get_trial(&self, id: TrialId) -> Result<Option<state::Trial>, Error>;

    /// The number of trials registered so far. Trial ids run from 1 to this
    /// count without gaps.
    async fn trial_count(&self) -> Result<TrialId, Error>;

    /// Whether the account is currently an authorized researcher.
    async fn is_researcher_authorized(&self, account_id: &AccountId) -> Result<bool, Error>;

    /// Fetch the header of the latest block.
    async fn block_header_best_chain(&self) -> Result<Header, Error>;

    /// Fetch the version of the runtime the node is running.
    async fn onchain_runtime_version(&self) -> Result<RuntimeVersion, Error>;

    /// The genesis hash of the chain the client talks to.
    fn genesis_hash(&self) -> Hash;
}
