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

//! High-level runtime tests that use the client emulator and treat the
//! runtime as a black box.
//!
//! The tests in this module concern trial registration.

use trial_registry_client::*;
use trial_registry_runtime::ledger::MINIMUM_TIMESTAMP_INTERVAL;
use trial_registry_test_utils::*;

#[async_std::test]
async fn create_trial() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();
    let create_message = random_create_trial_message();

    let tx_included = submit_ok(&client, &alice, create_message.clone()).await;
    let trial_id = tx_included.result.unwrap();
    assert_eq!(trial_id, 1);
    assert!(tx_included.events.contains(
        &RegistryEvent::TrialCreated(
            trial_id,
            create_message.patient_id.clone(),
            create_message.data_hash.clone(),
            TrialStatus::Active,
            alice.public(),
        )
        .into()
    ));

    let trial = client.get_trial(trial_id).await.unwrap().unwrap();
    assert_eq!(trial.id, trial_id);
    assert_eq!(trial.patient_id, create_message.patient_id);
    assert_eq!(trial.data_hash, create_message.data_hash);
    assert_eq!(trial.status, TrialStatus::Active);
    assert_eq!(trial.researcher, alice.public());
    assert_eq!(trial.start_date, trial.last_updated);

    assert_eq!(client.trial_count().await.unwrap(), 1);
}

#[async_std::test]
async fn trial_ids_are_sequential() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();

    for expected_id in 1..=3 {
        let tx_included = submit_ok(&client, &alice, random_create_trial_message()).await;
        assert_eq!(tx_included.result, Ok(expected_id));
    }
    assert_eq!(client.trial_count().await.unwrap(), 3);
}

#[async_std::test]
async fn start_dates_strictly_increase() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();

    let first = trial_registry_test_utils::create_trial(&client, &alice).await;
    let second = trial_registry_test_utils::create_trial(&client, &alice).await;

    // Back-to-back registrations land in different blocks and never share
    // a start date.
    assert!(second.start_date > first.start_date);
}

#[async_std::test]
async fn block_timestamps_respect_the_minimum_interval() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();

    let mut previous = client.block_header_best_chain().await.unwrap();
    for _ in 0..3 {
        submit_ok(&client, &alice, random_create_trial_message()).await;
        let header = client.block_header_best_chain().await.unwrap();
        assert!(header.timestamp >= previous.timestamp + MINIMUM_TIMESTAMP_INTERVAL);
        assert_eq!(header.number, previous.number + 1);
        previous = header;
    }
}

#[async_std::test]
async fn create_trial_without_payload() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();

    let tx_included = submit_ok(
        &client,
        &alice,
        message::CreateTrial {
            patient_id: random_patient_id(),
            data_hash: ContentHash::empty(),
        },
    )
    .await;
    let trial_id = tx_included.result.unwrap();

    // An empty data hash is a valid registration without payload, not an
    // error.
    let trial = client.get_trial(trial_id).await.unwrap().unwrap();
    assert!(trial.data_hash.is_empty());
}

#[async_std::test]
async fn unauthorized_author_cannot_create() {
    let client = Client::new_emulator();
    let outsider = random_key_pair();

    let tx_included = submit_ok(&client, &outsider, random_create_trial_message()).await;

    assert_eq!(tx_included.result, Err(RegistryError::Unauthorized));
    assert_eq!(client.trial_count().await.unwrap(), 0);
    assert_eq!(client.get_trial(1).await.unwrap(), None);
}

#[async_std::test]
async fn created_id_comes_from_the_event() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();
    let researcher = authorized_key_pair(&client).await;

    let first = submit_ok(&client, &alice, random_create_trial_message())
        .await
        .result
        .unwrap();
    let second = submit_ok(&client, &researcher, random_create_trial_message())
        .await
        .result
        .unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(
        client.get_trial(second).await.unwrap().unwrap().researcher,
        researcher.public()
    );
}
