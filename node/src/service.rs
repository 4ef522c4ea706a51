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

//! Node service: the ledger, the transaction pool and the sealing strategy.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use trial_registry_core::Hash;
use trial_registry_runtime::{
    ledger, Event, GenesisConfig, Header, InvalidTransaction, Ledger, TransactionStatus,
    UncheckedExtrinsic,
};

use crate::rpc;

/// Configuration for a development node.
pub struct NodeConfig {
    /// Address to bind the JSON-RPC server to. Port 0 picks a free port.
    pub bind: SocketAddr,
    /// Seal blocks at this interval from the transaction pool instead of
    /// sealing one block per submitted transaction.
    pub block_time: Option<Duration>,
    pub genesis: GenesisConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            bind: ([127, 0, 0, 1], 9933).into(),
            block_time: None,
            genesis: GenesisConfig::dev(),
        }
    }
}

/// A running development node.
///
/// The RPC server and the block sealer run as background tasks. Dropping the
/// node stops them.
pub struct Node {
    local_addr: SocketAddr,
    service: Arc<Service>,
    server: tokio::task::JoinHandle<()>,
    sealer: Option<tokio::task::JoinHandle<()>>,
}

impl Node {
    /// Bind the RPC server and start the node tasks.
    pub async fn start(config: NodeConfig) -> Result<Self, std::io::Error> {
        let service = Arc::new(Service::new(config.genesis, config.block_time));

        let listener = tokio::net::TcpListener::bind(config.bind).await?;
        let local_addr = listener.local_addr()?;
        let router = rpc::router(Arc::clone(&service));
        let server = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, router).await {
                log::error!("RPC server terminated: {}", error);
            }
        });

        let sealer = config.block_time.map(|block_time| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(block_time);
                interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                loop {
                    interval.tick().await;
                    service.seal_pending();
                }
            })
        });

        Ok(Node {
            local_addr,
            service,
            server,
            sealer,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The RPC endpoint of this node.
    pub fn url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    pub fn genesis_hash(&self) -> Hash {
        self.service.genesis_hash()
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        self.server.abort();
        if let Some(sealer) = &self.sealer {
            sealer.abort();
        }
    }
}

/// What the node knows about a transaction hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionState {
    /// Never seen by this node.
    Unknown,
    /// Waiting in the pool for the next sealed block.
    Pending,
    Included {
        block: Hash,
        events: Vec<Event>,
    },
    Invalid {
        reason: String,
    },
}

/// The ledger behind the RPC server.
///
/// The pool is only populated with a block time configured; instant sealing
/// never leaves a transaction waiting.
pub struct Service {
    ledger: Mutex<Ledger>,
    pool: Mutex<Vec<UncheckedExtrinsic>>,
    block_time: Option<Duration>,
}

impl Service {
    pub fn new(genesis: GenesisConfig, block_time: Option<Duration>) -> Self {
        let ledger = Ledger::new(genesis);
        log::info!("genesis hash {}", ledger.genesis_hash());
        Service {
            ledger: Mutex::new(ledger),
            pool: Mutex::new(Vec::new()),
            block_time,
        }
    }

    /// Accept a transaction for inclusion and return its hash.
    ///
    /// The validity check gives early feedback only; it runs again when the
    /// block is sealed and a transaction that went stale in the pool is
    /// recorded as invalid there.
    pub fn submit(&self, xt: UncheckedExtrinsic) -> Result<Hash, InvalidTransaction> {
        let tx_hash = xt.hash();
        match self.block_time {
            None => {
                let mut ledger = self.ledger.lock();
                ledger.check_transaction(&xt)?;
                let header = ledger.author_block(ledger::unix_timestamp_now(), vec![xt]);
                log::info!("sealed block #{} {}", header.number, header.hash());
            }
            Some(_) => {
                self.ledger.lock().check_transaction(&xt)?;
                self.pool.lock().push(xt);
                log::debug!("transaction {} queued for the next block", tx_hash);
            }
        }
        Ok(tx_hash)
    }

    /// Seal a block with everything in the pool. Does nothing when the pool
    /// is empty.
    pub fn seal_pending(&self) {
        let extrinsics: Vec<UncheckedExtrinsic> = {
            let mut pool = self.pool.lock();
            pool.drain(..).collect()
        };
        if extrinsics.is_empty() {
            return;
        }
        let count = extrinsics.len();
        let header = self
            .ledger
            .lock()
            .author_block(ledger::unix_timestamp_now(), extrinsics);
        log::info!(
            "sealed block #{} {} with {} transaction(s)",
            header.number,
            header.hash(),
            count
        );
    }

    pub fn transaction_state(&self, tx_hash: Hash) -> TransactionState {
        if let Some(status) = self.ledger.lock().transaction_status(tx_hash) {
            return match status {
                TransactionStatus::Included { block, events } => TransactionState::Included {
                    block: *block,
                    events: events.clone(),
                },
                TransactionStatus::Invalid(reason) => TransactionState::Invalid {
                    reason: reason.to_string(),
                },
            };
        }
        if self.pool.lock().iter().any(|xt| xt.hash() == tx_hash) {
            TransactionState::Pending
        } else {
            TransactionState::Unknown
        }
    }

    pub fn fetch(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.ledger.lock().fetch(key)
    }

    pub fn fetch_keys(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.ledger.lock().fetch_keys(prefix)
    }

    pub fn tip_header(&self) -> Header {
        self.ledger.lock().tip_header().clone()
    }

    pub fn header(&self, hash: Hash) -> Option<Header> {
        self.ledger.lock().header(hash).cloned()
    }

    pub fn genesis_hash(&self) -> Hash {
        self.ledger.lock().genesis_hash()
    }
}
