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

//! Miscellaneous helpers used throughout registry tests.

use rand::distributions::Alphanumeric;
use rand::Rng;

use trial_registry_client::*;

/// Submit a transaction and wait for it to be included in a block.
///
/// Panics if submission errors.
pub async fn submit_ok<Message_: Message>(
    client: &Client,
    author: &ed25519::Pair,
    message: Message_,
) -> TransactionIncluded<Message_> {
    client
        .sign_and_submit_message(author, message)
        .await
        .unwrap()
        .await
        .unwrap()
}

pub fn key_pair_from_string(value: impl AsRef<str>) -> ed25519::Pair {
    ed25519::Pair::from_string(format!("//{}", value.as_ref()).as_str()).unwrap()
}

/// The development chain account that is an authorized researcher at genesis.
pub fn genesis_researcher() -> ed25519::Pair {
    key_pair_from_string("Alice")
}

/// Create a key pair from a random phrase.
pub fn random_key_pair() -> ed25519::Pair {
    key_pair_from_string(random_alnum_string(8))
}

/// Create a key pair and have the genesis researcher authorize it.
pub async fn authorized_key_pair(client: &Client) -> ed25519::Pair {
    let key_pair = random_key_pair();
    let tx_included = submit_ok(
        client,
        &genesis_researcher(),
        message::AuthorizeResearcher {
            researcher: key_pair.public(),
        },
    )
    .await;
    assert_eq!(tx_included.result, Ok(()));
    key_pair
}

pub fn random_patient_id() -> PatientId {
    let size = rand::thread_rng().gen_range(1..33);
    PatientId::try_from(format!("P-{}", random_alnum_string(size))).unwrap()
}

/// A random content store reference in the shape the store hands out.
pub fn random_content_hash() -> ContentHash {
    ContentHash::try_from(format!("Qm{}", random_alnum_string(44))).unwrap()
}

/// Create a [message::CreateTrial] with random parameters.
pub fn random_create_trial_message() -> message::CreateTrial {
    message::CreateTrial {
        patient_id: random_patient_id(),
        data_hash: random_content_hash(),
    }
}

/// Register a random trial and return it from the chain state.
pub async fn create_trial(client: &Client, author: &ed25519::Pair) -> state::Trial {
    let tx_included = submit_ok(client, author, random_create_trial_message()).await;
    let id = tx_included.result.unwrap();
    client.get_trial(id).await.unwrap().unwrap()
}

pub fn random_alnum_string(size: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .map(char::from)
        .collect::<String>()
}
