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

//! Clients for the trial registry.
//!
//! The registry is a ledger that records clinical trials, who runs them and
//! where their payloads live in the content-addressed store. This crate
//! provides typed access to it: [ClientT] is the interface, [Client] the
//! implementation.
//!
//! A client is backed either by a remote node reached over HTTP
//! ([Client::create]) or by an in-memory emulator for development and
//! testing ([Client::new_emulator]).
//!
//! ```no_run
//! # use trial_registry_client::*;
//! # async fn example() -> Result<(), Error> {
//! let client = Client::create(url::Url::parse("http://127.0.0.1:9933").unwrap()).await?;
//! let alice = ed25519::Pair::from_string("//Alice").unwrap();
//!
//! let submitted = client
//!     .sign_and_submit_message(
//!         &alice,
//!         message::CreateTrial {
//!             patient_id: "P1".parse().unwrap(),
//!             data_hash: ContentHash::empty(),
//!         },
//!     )
//!     .await?;
//! let included = submitted.await?;
//! let trial_id = included.result.unwrap();
//! # Ok(()) }
//! ```

use std::sync::Arc;

use futures::future::FutureExt as _;
use parity_scale_codec::Decode;

pub mod backend;
mod error;
mod interface;
mod transaction;

pub mod message;

pub use backend::{Backend, Emulator, RemoteNode};
pub use error::Error;
pub use interface::*;
pub use message::Message;
pub use transaction::{Transaction, TransactionExtra};

use trial_registry_runtime::{ledger, registry};

/// Client to interact with the registry ledger via a [Backend].
///
/// Implements [ClientT] for interacting with the ledger.
#[derive(Clone)]
pub struct Client {
    backend: Arc<dyn Backend + Send + Sync>,
}

impl Client {
    fn new(backend: impl Backend + Send + Sync + 'static) -> Self {
        Client {
            backend: Arc::new(backend),
        }
    }

    /// Connect to a node over HTTP.
    ///
    /// Fails if the node cannot be reached or runs an incompatible runtime.
    pub async fn create(url: url::Url) -> Result<Self, Error> {
        Ok(Self::new(RemoteNode::create(url).await?))
    }

    /// Create a client backed by an in-memory ledger emulator with the
    /// development genesis config.
    ///
    /// See [Emulator] for the differences from a real node.
    pub fn new_emulator() -> Self {
        Self::new(Emulator::new())
    }

    /// Create a client from an existing backend.
    ///
    /// Used by tests that tune backend parameters, for example
    /// [RemoteNode::with_finality_timeout].
    pub fn from_backend(backend: impl Backend + Send + Sync + 'static) -> Self {
        Self::new(backend)
    }

    async fn fetch_value<T: Decode>(&self, key: &[u8]) -> Result<Option<T>, Error> {
        match self.backend.fetch(key).await? {
            None => Ok(None),
            Some(bytes) => {
                let value = T::decode(&mut &bytes[..])?;
                Ok(Some(value))
            }
        }
    }
}

#[async_trait::async_trait]
impl ClientT for Client {
    async fn submit_transaction<Message_: Message>(
        &self,
        transaction: Transaction<Message_>,
    ) -> Result<Response<TransactionIncluded<Message_>, Error>, Error> {
        let tx_hash = transaction.hash();
        let inclusion = self.backend.submit(transaction.into_extrinsic()).await?;
        Ok(async move {
            let applied = inclusion.await?;
            let result = Message_::result_from_events(&applied.events)
                .map_err(|error| Error::EventExtraction { error, tx_hash })?;
            Ok(TransactionIncluded {
                tx_hash,
                block: applied.block,
                events: applied.events,
                result,
            })
        }
        .boxed())
    }

    async fn sign_and_submit_message<Message_: Message>(
        &self,
        author: &ed25519::Pair,
        message: Message_,
    ) -> Result<Response<TransactionIncluded<Message_>, Error>, Error> {
        let account_nonce = self.account_nonce(&author.public()).await?;
        let transaction = Transaction::new_signed(
            author,
            message,
            TransactionExtra {
                nonce: account_nonce,
                genesis_hash: self.genesis_hash(),
            },
        );
        self.submit_transaction(transaction).await
    }

    async fn list_accounts(&self) -> Result<Vec<AccountId>, Error> {
        let keys = self
            .backend
            .fetch_keys(ledger::store::ACCOUNTS_PREFIX)
            .await?;
        keys.iter()
            .map(|key| {
                ledger::store::account_from_key(key).ok_or_else(|| {
                    Error::Other(format!(
                        "invalid account storage key 0x{}",
                        hex::encode(key)
                    ))
                })
            })
            .collect()
    }

    async fn account_nonce(&self, account_id: &AccountId) -> Result<TransactionIndex, Error> {
        let nonce = self
            .fetch_value(&ledger::store::account_key(account_id))
            .await?;
        Ok(nonce.unwrap_or(0))
    }

    async fn get_trial(&self, id: TrialId) -> Result<Option<state::Trial>, Error> {
        self.fetch_value(&registry::store::trial_key(id)).await
    }

    async fn trial_count(&self) -> Result<TrialId, Error> {
        let count = self
            .fetch_value(registry::store::TRIAL_COUNT_KEY)
            .await?;
        Ok(count.unwrap_or(0))
    }

    async fn is_researcher_authorized(&self, account_id: &AccountId) -> Result<bool, Error> {
        let authorized = self
            .fetch_value(&registry::store::authorized_researcher_key(account_id))
            .await?;
        Ok(authorized.unwrap_or(false))
    }

    async fn block_header_best_chain(&self) -> Result<Header, Error> {
        self.backend.block_header_best_chain().await
    }

    async fn onchain_runtime_version(&self) -> Result<RuntimeVersion, Error> {
        self.backend.onchain_runtime_version().await
    }

    fn genesis_hash(&self) -> Hash {
        self.backend.genesis_hash()
    }
}
