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

//! Provides the [Emulator] backend to run the registry ledger in memory.

use std::sync::{Arc, Mutex};

use trial_registry_runtime::{ledger, GenesisConfig, Ledger, TransactionStatus};

use crate::backend;
use crate::interface::*;

/// [backend::Backend] implementation that runs a [Ledger] in process, for
/// tests and local development.
///
/// # Differences with a real node
///
/// * Every [backend::Backend::submit] call seals a new block that only
///   contains the submitted transaction.
///
/// * A refused transaction fails the submission itself instead of the
///   returned inclusion future; there is no pool for it to wait in.
#[derive(Clone)]
pub struct Emulator {
    ledger: Arc<Mutex<Ledger>>,
    genesis_hash: Hash,
}

impl Emulator {
    /// Create an emulator over [GenesisConfig::dev].
    pub fn new() -> Self {
        Self::from_genesis(GenesisConfig::dev())
    }

    pub fn from_genesis(genesis: GenesisConfig) -> Self {
        let ledger = Ledger::new(genesis);
        let genesis_hash = ledger.genesis_hash();
        Emulator {
            ledger: Arc::new(Mutex::new(ledger)),
            genesis_hash,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.ledger.lock().expect("emulator ledger lock poisoned")
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl backend::Backend for Emulator {
    async fn submit(
        &self,
        xt: backend::UncheckedExtrinsic,
    ) -> Result<Response<backend::TransactionApplied, Error>, Error> {
        let tx_hash = xt.hash();
        let mut ledger = self.lock();
        ledger.check_transaction(&xt).map_err(|reason| {
            Error::InvalidTransaction {
                reason: reason.to_string(),
            }
        })?;
        ledger.author_block(ledger::unix_timestamp_now(), vec![xt]);

        let applied = match ledger.transaction_status(tx_hash) {
            Some(TransactionStatus::Included { block, events }) => backend::TransactionApplied {
                tx_hash,
                block: *block,
                events: events.clone(),
            },
            _ => {
                return Err(Error::Other(format!(
                    "transaction {} missing from the block it was sealed into",
                    tx_hash
                )))
            }
        };
        Ok(Box::pin(futures::future::ready(Ok(applied))))
    }

    async fn fetch(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.lock().fetch(key))
    }

    async fn fetch_keys(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>, Error> {
        Ok(self.lock().fetch_keys(prefix))
    }

    async fn block_header_best_chain(&self) -> Result<Header, Error> {
        Ok(self.lock().tip_header().clone())
    }

    async fn onchain_runtime_version(&self) -> Result<RuntimeVersion, Error> {
        Ok(trial_registry_runtime::version())
    }

    fn genesis_hash(&self) -> Hash {
        self.genesis_hash
    }
}
