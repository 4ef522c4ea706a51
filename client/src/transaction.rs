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

//! Provides [Transaction] and [TransactionExtra].

use core::marker::PhantomData;

use crate::{ed25519, message::Message, TxHash};
use trial_registry_runtime::{SignedExtra, UncheckedExtrinsic};

/// Transaction that can be submitted to the ledger.
///
/// A transaction includes
/// * the author
/// * the runtime message
/// * extra data like the genesis hash and account nonce
/// * a valid signature
///
/// The transaction type is generic over the runtime message parameter which
/// must implement [Message].
///
/// A transaction can be created with [Transaction::new_signed]. The necessary
/// transaction data must be obtained from the client with
/// [crate::ClientT::account_nonce] and [crate::ClientT::genesis_hash].
#[derive(Clone, Debug)]
pub struct Transaction<Message_: Message> {
    _phantom_data: PhantomData<Message_>,
    pub(crate) extrinsic: UncheckedExtrinsic,
}

impl<Message_: Message> Transaction<Message_> {
    /// Create and sign a transaction for the given message.
    pub fn new_signed(
        signer: &ed25519::Pair,
        message: Message_,
        transaction_extra: TransactionExtra,
    ) -> Self {
        let extrinsic = UncheckedExtrinsic::new_signed(
            signer,
            message.into_runtime_call(),
            transaction_extra,
        );
        Transaction {
            _phantom_data: PhantomData,
            extrinsic,
        }
    }

    pub fn hash(&self) -> TxHash {
        self.extrinsic.hash()
    }

    pub(crate) fn into_extrinsic(self) -> UncheckedExtrinsic {
        self.extrinsic
    }
}

/// The data that is required from the ledger state to create a valid
/// transaction.
///
/// This is the [SignedExtra] the runtime expects: the author's next account
/// nonce and the genesis hash of the chain the transaction is meant for.
pub type TransactionExtra = SignedExtra;

#[cfg(test)]
mod test {
    use super::*;
    use crate::message;
    use trial_registry_core::{ContentHash, Hash, PatientId};

    #[test]
    /// Check that a signed transaction's hash equals its extrinsic's hash.
    fn check_transaction_hash() {
        let alice = ed25519::Pair::from_string("//Alice").unwrap();
        let signed_tx = Transaction::new_signed(
            &alice,
            message::CreateTrial {
                patient_id: "P1".parse::<PatientId>().unwrap(),
                data_hash: ContentHash::empty(),
            },
            TransactionExtra {
                nonce: 0,
                genesis_hash: Hash::random(),
            },
        );
        let extrinsic_hash = signed_tx.extrinsic.hash();

        assert_eq!(signed_tx.hash(), extrinsic_hash);
    }

    #[test]
    /// The signed extrinsic passes the runtime's signature check.
    fn signed_transaction_verifies() {
        let author = ed25519::Pair::generate();
        let tx = Transaction::new_signed(
            &author,
            message::AuthorizeResearcher {
                researcher: author.public(),
            },
            TransactionExtra {
                nonce: 3,
                genesis_hash: Hash::random(),
            },
        );
        assert!(tx.extrinsic.verify_signature());
    }
}
