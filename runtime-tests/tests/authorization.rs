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
//! The tests in this module concern researcher authorization.

use trial_registry_client::*;
use trial_registry_test_utils::*;

#[async_std::test]
async fn authorize_researcher() {
    let client = Client::new_emulator();
    let researcher = random_key_pair();

    assert!(!client
        .is_researcher_authorized(&researcher.public())
        .await
        .unwrap());

    let tx_included = submit_ok(
        &client,
        &genesis_researcher(),
        message::AuthorizeResearcher {
            researcher: researcher.public(),
        },
    )
    .await;

    assert_eq!(tx_included.result, Ok(()));
    assert!(tx_included
        .events
        .contains(&RegistryEvent::ResearcherAuthorized(researcher.public()).into()));
    assert!(client
        .is_researcher_authorized(&researcher.public())
        .await
        .unwrap());
}

#[async_std::test]
async fn deauthorize_researcher() {
    let client = Client::new_emulator();
    let researcher = authorized_key_pair(&client).await;

    let tx_included = submit_ok(
        &client,
        &genesis_researcher(),
        message::DeauthorizeResearcher {
            researcher: researcher.public(),
        },
    )
    .await;

    assert_eq!(tx_included.result, Ok(()));
    assert!(tx_included
        .events
        .contains(&RegistryEvent::ResearcherDeauthorized(researcher.public()).into()));
    assert!(!client
        .is_researcher_authorized(&researcher.public())
        .await
        .unwrap());
}

#[async_std::test]
async fn unauthorized_author_cannot_authorize() {
    let client = Client::new_emulator();
    let outsider = random_key_pair();
    let target = random_key_pair();

    let tx_included = submit_ok(
        &client,
        &outsider,
        message::AuthorizeResearcher {
            researcher: target.public(),
        },
    )
    .await;

    assert_eq!(tx_included.result, Err(RegistryError::Unauthorized));
    assert!(!client
        .is_researcher_authorized(&target.public())
        .await
        .unwrap());
}

#[async_std::test]
async fn authorized_researcher_can_authorize_others() {
    let client = Client::new_emulator();
    let researcher = authorized_key_pair(&client).await;
    let next = random_key_pair();

    let tx_included = submit_ok(
        &client,
        &researcher,
        message::AuthorizeResearcher {
            researcher: next.public(),
        },
    )
    .await;

    assert_eq!(tx_included.result, Ok(()));
    assert!(client.is_researcher_authorized(&next.public()).await.unwrap());
}

#[async_std::test]
async fn repeated_authorization_is_idempotent() {
    let client = Client::new_emulator();
    let researcher = authorized_key_pair(&client).await;

    // A second authorization changes nothing but still emits the event.
    let tx_included = submit_ok(
        &client,
        &genesis_researcher(),
        message::AuthorizeResearcher {
            researcher: researcher.public(),
        },
    )
    .await;

    assert_eq!(tx_included.result, Ok(()));
    assert!(tx_included
        .events
        .contains(&RegistryEvent::ResearcherAuthorized(researcher.public()).into()));
    assert!(client
        .is_researcher_authorized(&researcher.public())
        .await
        .unwrap());
}

#[async_std::test]
async fn deauthorizing_a_stranger_is_idempotent() {
    let client = Client::new_emulator();
    let stranger = random_key_pair();

    let tx_included = submit_ok(
        &client,
        &genesis_researcher(),
        message::DeauthorizeResearcher {
            researcher: stranger.public(),
        },
    )
    .await;

    assert_eq!(tx_included.result, Ok(()));
    assert!(tx_included
        .events
        .contains(&RegistryEvent::ResearcherDeauthorized(stranger.public()).into()));
    assert!(!client
        .is_researcher_authorized(&stranger.public())
        .await
        .unwrap());
}

#[async_std::test]
async fn self_deauthorization_locks_the_registry() {
    let client = Client::new_emulator();
    let alice = genesis_researcher();

    let tx_included = submit_ok(
        &client,
        &alice,
        message::DeauthorizeResearcher {
            researcher: alice.public(),
        },
    )
    .await;
    assert_eq!(tx_included.result, Ok(()));
    assert!(!client
        .is_researcher_authorized(&alice.public())
        .await
        .unwrap());

    // The sole researcher is gone; every further mutation is refused.
    let tx_included = submit_ok(
        &client,
        &alice,
        message::AuthorizeResearcher {
            researcher: alice.public(),
        },
    )
    .await;
    assert_eq!(tx_included.result, Err(RegistryError::Unauthorized));
}

#[async_std::test]
async fn deauthorized_researcher_cannot_create() {
    let client = Client::new_emulator();
    let researcher = authorized_key_pair(&client).await;

    let trial = create_trial(&client, &researcher).await;

    submit_ok(
        &client,
        &genesis_researcher(),
        message::DeauthorizeResearcher {
            researcher: researcher.public(),
        },
    )
    .await;

    let tx_included = submit_ok(&client, &researcher, random_create_trial_message()).await;
    assert_eq!(tx_included.result, Err(RegistryError::Unauthorized));

    // The trial registered while authorized stays on the ledger.
    assert_eq!(
        client.get_trial(trial.id).await.unwrap(),
        Some(trial.clone())
    );
    assert_eq!(client.trial_count().await.unwrap(), trial.id);
}
