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

//! The chain: storage, headers and block authoring.
//!
//! A [Ledger] is driven by a block author (the emulator or the development
//! node) that decides when to seal a block and with which transactions.
//! Applying a block is the only way state changes.

use std::collections::HashMap;

use codec::Decode;
use thiserror::Error as ThisError;

use crate::{registry, Call, Event, GenesisConfig, Header, Storage, SystemEvent};
use crate::extrinsic::UncheckedExtrinsic;
use trial_registry_core::{AccountId, Hash, Hashing, Moment, TransactionIndex};

/// Minimum distance between consecutive block timestamps.
///
/// Guarantees that `last_updated` and `start_date` observed in different
/// blocks differ even when the blocks are sealed within one millisecond of
/// wall time.
pub const MINIMUM_TIMESTAMP_INTERVAL: Moment = 1;

/// Milliseconds since the Unix epoch, for block authors sealing with wall
/// clock time.
pub fn unix_timestamp_now() -> Moment {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock is set after the Unix epoch")
        .as_millis() as Moment
}

/// Storage keys of the account state maintained by the harness.
///
/// Every account known to the chain has an entry holding its next expected
/// nonce. The account id can be recovered from the storage key, which is
/// how account enumeration works.
pub mod store {
    use super::*;
    use codec::Encode;

    pub const ACCOUNTS_PREFIX: &[u8] = b"system:accounts:";

    pub fn account_key(account: &AccountId) -> Vec<u8> {
        let mut key = ACCOUNTS_PREFIX.to_vec();
        key.extend(account.encode());
        key
    }

    pub fn account_from_key(key: &[u8]) -> Option<AccountId> {
        let suffix = key.strip_prefix(ACCOUNTS_PREFIX)?;
        AccountId::decode(&mut &suffix[..]).ok()
    }

    pub fn account_nonce(storage: &Storage, account: &AccountId) -> TransactionIndex {
        storage.get(&account_key(account)).unwrap_or(0)
    }

    pub fn put_account_nonce(
        storage: &mut Storage,
        account: &AccountId,
        nonce: TransactionIndex,
    ) {
        storage.put(account_key(account), &nonce);
    }
}

/// Why a transaction was refused by the block author.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum InvalidTransaction {
    #[error("invalid transaction signature")]
    BadSignature,

    #[error("transaction was signed for a different chain (genesis hash mismatch)")]
    BadGenesisHash,

    #[error("invalid account nonce, expected {expected} but transaction carries {got}")]
    BadNonce {
        expected: TransactionIndex,
        got: TransactionIndex,
    },
}

/// What became of a transaction the ledger has seen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Included in the block with the given header hash. The events were
    /// emitted while applying it, ending with the [SystemEvent] for its
    /// dispatch result.
    Included { block: Hash, events: Vec<Event> },
    /// Refused by the block author and dropped.
    Invalid(InvalidTransaction),
}

/// The chain state: storage, headers, and the fate of every transaction.
pub struct Ledger {
    storage: Storage,
    headers: HashMap<Hash, Header>,
    tip_hash: Hash,
    genesis_hash: Hash,
    transactions: HashMap<Hash, TransactionStatus>,
}

impl Ledger {
    /// Create a chain with the genesis block sealed over `genesis` state.
    pub fn new(genesis: GenesisConfig) -> Self {
        let mut storage = Storage::new();
        for account in &genesis.authorized_researchers {
            registry::store::put_authorized(&mut storage, account, true);
        }
        for account in &genesis.accounts {
            store::put_account_nonce(&mut storage, account, 0);
        }

        let genesis_header = Header {
            parent_hash: Hash::zero(),
            number: 0,
            extrinsics_root: Hashing::hash_of(&Vec::<Hash>::new()),
            timestamp: 0,
        };
        let genesis_hash = genesis_header.hash();

        let mut headers = HashMap::new();
        headers.insert(genesis_hash, genesis_header);

        Ledger {
            storage,
            headers,
            tip_hash: genesis_hash,
            genesis_hash,
            transactions: HashMap::new(),
        }
    }

    pub fn genesis_hash(&self) -> Hash {
        self.genesis_hash
    }

    pub fn tip_header(&self) -> &Header {
        self.headers
            .get(&self.tip_hash)
            .expect("the tip header is always stored")
    }

    pub fn header(&self, hash: Hash) -> Option<&Header> {
        self.headers.get(&hash)
    }

    pub fn transaction_status(&self, tx_hash: Hash) -> Option<&TransactionStatus> {
        self.transactions.get(&tx_hash)
    }

    /// Raw storage read, as served to clients.
    pub fn fetch(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.storage.get_raw(key)
    }

    /// Raw storage key enumeration, as served to clients.
    pub fn fetch_keys(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.storage.keys_with_prefix(prefix)
    }

    /// Validity checks a block author runs before including a transaction:
    /// signature, chain identity and nonce.
    pub fn check_transaction(
        &self,
        xt: &UncheckedExtrinsic,
    ) -> Result<(), InvalidTransaction> {
        if !xt.verify_signature() {
            return Err(InvalidTransaction::BadSignature);
        }
        if xt.extra.genesis_hash != self.genesis_hash {
            return Err(InvalidTransaction::BadGenesisHash);
        }
        let expected = store::account_nonce(&self.storage, &xt.author);
        if xt.extra.nonce != expected {
            return Err(InvalidTransaction::BadNonce {
                expected,
                got: xt.extra.nonce,
            });
        }
        Ok(())
    }

    /// Seal a block containing `extrinsics` on top of the current tip.
    ///
    /// Transactions failing [Ledger::check_transaction] are dropped and
    /// recorded as [TransactionStatus::Invalid]; all others are applied in
    /// order, each atomically. The block timestamp is `now`, clamped so it
    /// strictly exceeds the parent's.
    pub fn author_block(&mut self, now: Moment, extrinsics: Vec<UncheckedExtrinsic>) -> Header {
        let parent = self.tip_header().clone();
        let timestamp = now.max(parent.timestamp + MINIMUM_TIMESTAMP_INTERVAL);

        let mut included = Vec::new();
        let mut outcomes = Vec::new();
        for xt in extrinsics {
            let tx_hash = xt.hash();
            if let Err(reason) = self.check_transaction(&xt) {
                // A replayed hash keeps its first recorded outcome.
                self.transactions
                    .entry(tx_hash)
                    .or_insert(TransactionStatus::Invalid(reason));
                continue;
            }

            let nonce = store::account_nonce(&self.storage, &xt.author);
            store::put_account_nonce(&mut self.storage, &xt.author, nonce + 1);

            let events = self.apply_call(xt.author, xt.call, timestamp);
            included.push(tx_hash);
            outcomes.push((tx_hash, events));
        }

        let header = Header {
            parent_hash: parent.hash(),
            number: parent.number + 1,
            extrinsics_root: Hashing::hash_of(&included),
            timestamp,
        };
        let block_hash = header.hash();
        self.headers.insert(block_hash, header.clone());
        self.tip_hash = block_hash;

        for (tx_hash, events) in outcomes {
            self.transactions.insert(
                tx_hash,
                TransactionStatus::Included {
                    block: block_hash,
                    events,
                },
            );
        }
        header
    }

    fn apply_call(&mut self, origin: AccountId, call: Call, now: Moment) -> Vec<Event> {
        let result = match call {
            Call::Registry(call) => registry::dispatch(&mut self.storage, origin, call, now),
        };
        match result {
            Ok(registry_events) => registry_events
                .into_iter()
                .map(Event::Registry)
                .chain(std::iter::once(SystemEvent::ExtrinsicSuccess.into()))
                .collect(),
            Err(error) => vec![SystemEvent::ExtrinsicFailed(error).into()],
        }
    }
}
