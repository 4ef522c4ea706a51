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

//! The transaction format the ledger accepts.

use codec::{Decode, Encode};

use crate::Call;
use trial_registry_core::{ed25519, AccountId, Hash, Hashing, TransactionIndex};

/// Additional data covered by the transaction signature.
///
/// The nonce prevents replaying a transaction on the same chain; the
/// genesis hash prevents replaying it on a different chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
pub struct SignedExtra {
    pub nonce: TransactionIndex,
    pub genesis_hash: Hash,
}

/// A transaction as submitted to the ledger: a [Call] signed by its author.
///
/// "Unchecked" because signature, nonce and genesis hash are only verified
/// when a block author picks the transaction up, see
/// [crate::Ledger::check_transaction].
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct UncheckedExtrinsic {
    pub author: AccountId,
    pub signature: ed25519::Signature,
    pub extra: SignedExtra,
    pub call: Call,
}

impl UncheckedExtrinsic {
    /// Build and sign a transaction with the author's key pair.
    pub fn new_signed(author: &ed25519::Pair, call: Call, extra: SignedExtra) -> Self {
        let signature = author.sign(&signing_payload(&call, &extra));
        UncheckedExtrinsic {
            author: author.public(),
            signature,
            extra,
            call,
        }
    }

    /// The hash identifying this transaction.
    pub fn hash(&self) -> Hash {
        Hashing::hash_of(self)
    }

    pub fn verify_signature(&self) -> bool {
        ed25519::verify(
            &self.signature,
            &signing_payload(&self.call, &self.extra),
            &self.author,
        )
    }
}

/// The bytes the author signs: the SCALE encoding of call and extra.
pub fn signing_payload(call: &Call, extra: &SignedExtra) -> Vec<u8> {
    (call, extra).encode()
}

#[cfg(test)]
mod test {
    use super::*;
    use trial_registry_core::message;

    fn call() -> Call {
        Call::Registry(crate::registry::Call::AuthorizeResearcher(
            message::AuthorizeResearcher {
                researcher: ed25519::Pair::generate().public(),
            },
        ))
    }

    fn extra() -> SignedExtra {
        SignedExtra {
            nonce: 0,
            genesis_hash: Hash::random(),
        }
    }

    #[test]
    fn signed_extrinsic_verifies() {
        let author = ed25519::Pair::generate();
        let xt = UncheckedExtrinsic::new_signed(&author, call(), extra());
        assert!(xt.verify_signature());
    }

    #[test]
    fn tampered_call_does_not_verify() {
        let author = ed25519::Pair::generate();
        let mut xt = UncheckedExtrinsic::new_signed(&author, call(), extra());
        xt.call = call();
        assert!(!xt.verify_signature());
    }

    #[test]
    fn foreign_signature_does_not_verify() {
        let author = ed25519::Pair::generate();
        let mut xt = UncheckedExtrinsic::new_signed(&author, call(), extra());
        xt.author = ed25519::Pair::generate().public();
        assert!(!xt.verify_signature());
    }

    #[test]
    fn decode_after_encode_is_identity() {
        let author = ed25519::Pair::generate();
        let xt = UncheckedExtrinsic::new_signed(&author, call(), extra());
        let decoded = UncheckedExtrinsic::decode(&mut &xt.encode()[..]).unwrap();
        assert_eq!(xt, decoded);
        assert!(decoded.verify_signature());
    }
}
