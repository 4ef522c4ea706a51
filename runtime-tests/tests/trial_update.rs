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
//! The tests in this module concern trial updates.

use trial_registry_client::*;
use trial_registry_test_utils::*;

#[async_std::test]
async fn update_trial() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();
    let trial = create_trial(&client, &alice).await;

    let new_hash = random_content_hash();
    let tx_included = submit_ok(
        &client,
        &alice,
        message::UpdateTrial {
            id: trial.id,
            data_hash: new_hash.clone(),
            status: TrialStatus::Completed,
        },
    )
    .await;

    assert_eq!(tx_included.result, Ok(()));
    assert!(tx_included.events.contains(
        &RegistryEvent::TrialUpdated(trial.id, new_hash.clone(), TrialStatus::Completed).into()
    ));

    let updated = client.get_trial(trial.id).await.unwrap().unwrap();
    assert_eq!(updated.data_hash, new_hash);
    assert_eq!(updated.status, TrialStatus::Completed);
    assert!(updated.last_updated > trial.last_updated);

    // Identity fields never change.
    assert_eq!(updated.id, trial.id);
    assert_eq!(updated.patient_id, trial.patient_id);
    assert_eq!(updated.researcher, trial.researcher);
    assert_eq!(updated.start_date, trial.start_date);
}

#[async_std::test]
async fn any_authorized_researcher_can_update() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();
    let other = authorized_key_pair(&client).await;
    let trial = create_trial(&client, &alice).await;

    let tx_included = submit_ok(
        &client,
        &other,
        message::UpdateTrial {
            id: trial.id,
            data_hash: random_content_hash(),
            status: TrialStatus::Suspended,
        },
    )
    .await;
    assert_eq!(tx_included.result, Ok(()));

    // Updating does not transfer the trial to the updating researcher.
    let updated = client.get_trial(trial.id).await.unwrap().unwrap();
    assert_eq!(updated.researcher, alice.public());
    assert_eq!(updated.status, TrialStatus::Suspended);
}

#[async_std::test]
async fn all_status_transitions_are_allowed() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();
    let trial = create_trial(&client, &alice).await;

    for status in [
        TrialStatus::Completed,
        TrialStatus::Active,
        TrialStatus::Suspended,
        TrialStatus::Completed,
    ] {
        let tx_included = submit_ok(
            &client,
            &alice,
            message::UpdateTrial {
                id: trial.id,
                data_hash: trial.data_hash.clone(),
                status,
            },
        )
        .await;
        assert_eq!(tx_included.result, Ok(()));
        assert_eq!(
            client.get_trial(trial.id).await.unwrap().unwrap().status,
            status
        );
    }
}

#[async_std::test]
async fn update_with_invalid_id_fails() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();
    create_trial(&client, &alice).await;

    for invalid_id in [0, 2, 1000] {
        let tx_included = submit_ok(
            &client,
            &alice,
            message::UpdateTrial {
                id: invalid_id,
                data_hash: random_content_hash(),
                status: TrialStatus::Completed,
            },
        )
        .await;
        assert_eq!(tx_included.result, Err(RegistryError::InvalidId));
    }
}

#[async_std::test]
async fn unauthorized_author_cannot_update() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();
    let outsider = random_key_pair();
    let trial = create_trial(&client, &alice).await;

    let tx_included = submit_ok(
        &client,
        &outsider,
        message::UpdateTrial {
            id: trial.id,
            data_hash: random_content_hash(),
            status: TrialStatus::Suspended,
        },
    )
    .await;

    assert_eq!(tx_included.result, Err(RegistryError::Unauthorized));
    assert_eq!(client.get_trial(trial.id).await.unwrap(), Some(trial));
}

#[async_std::test]
async fn deauthorized_researcher_cannot_update_own_trial() {
    let client = Client::new_emulator();
    let researcher = authorized_key_pair(&client).await;
    let trial = create_trial(&client, &researcher).await;
    assert_eq!(trial.researcher, researcher.public());

    submit_ok(
        &client,
        &genesis_researcher(),
        message::DeauthorizeResearcher {
            researcher: researcher.public(),
        },
    )
    .await;

    let tx_included = submit_ok(
        &client,
        &researcher,
        message::UpdateTrial {
            id: trial.id,
            data_hash: random_content_hash(),
            status: TrialStatus::Completed,
        },
    )
    .await;

    assert_eq!(tx_included.result, Err(RegistryError::Unauthorized));
    assert_eq!(client.get_trial(trial.id).await.unwrap(), Some(trial));
}

#[async_std::test]
async fn update_can_clear_the_payload() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();
    let trial = create_trial(&client, &alice).await;
    assert!(!trial.data_hash.is_empty());

    let tx_included = submit_ok(
        &client,
        &alice,
        message::UpdateTrial {
            id: trial.id,
            data_hash: ContentHash::empty(),
            status: trial.status,
        },
    )
    .await;
    assert_eq!(tx_included.result, Ok(()));

    let updated = client.get_trial(trial.id).await.unwrap().unwrap();
    assert!(updated.data_hash.is_empty());
}

#[async_std::test]
async fn last_updated_strictly_increases() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();
    let trial = create_trial(&client, &alice).await;

    let mut last_updated = trial.last_updated;
    for _ in 0..3 {
        submit_ok(
            &client,
            &alice,
            message::UpdateTrial {
                id: trial.id,
                data_hash: random_content_hash(),
                status: TrialStatus::Active,
            },
        )
        .await;
        let updated = client.get_trial(trial.id).await.unwrap().unwrap();
        assert!(updated.last_updated > last_updated);
        last_updated = updated.last_updated;
    }
}
