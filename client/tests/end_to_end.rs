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

//! Tests driving the client against an in-process node over HTTP.

use std::time::Duration;

use trial_registry_client::*;
use trial_registry_node::{Node, NodeConfig};
use trial_registry_test_utils as test_utils;

async fn start_node(block_time: Option<Duration>) -> Node {
    let _ = env_logger::try_init();
    let config = NodeConfig {
        bind: ([127, 0, 0, 1], 0).into(),
        block_time,
        ..NodeConfig::default()
    };
    Node::start(config).await.unwrap()
}

async fn connect(node: &Node) -> Client {
    let url = url::Url::parse(&node.url()).unwrap();
    Client::create(url).await.unwrap()
}

#[tokio::test]
async fn register_and_update_a_trial() {
    let node = start_node(None).await;
    let client = connect(&node).await;
    let alice = test_utils::genesis_researcher();

    let patient_id = test_utils::random_patient_id();
    let created = test_utils::submit_ok(
        &client,
        &alice,
        message::CreateTrial {
            patient_id: patient_id.clone(),
            data_hash: test_utils::random_content_hash(),
        },
    )
    .await;
    let trial_id = created.result.unwrap();
    assert_eq!(trial_id, 1);

    let new_hash = test_utils::random_content_hash();
    let updated = test_utils::submit_ok(
        &client,
        &alice,
        message::UpdateTrial {
            id: trial_id,
            data_hash: new_hash.clone(),
            status: TrialStatus::Completed,
        },
    )
    .await;
    assert_eq!(updated.result, Ok(()));

    let trial = client.get_trial(trial_id).await.unwrap().unwrap();
    assert_eq!(trial.patient_id, patient_id);
    assert_eq!(trial.data_hash, new_hash);
    assert_eq!(trial.status, TrialStatus::Completed);
    assert!(trial.last_updated > trial.start_date);
    assert_eq!(client.trial_count().await.unwrap(), 1);
}

#[tokio::test]
async fn interval_sealing_includes_pooled_transactions() {
    let node = start_node(Some(Duration::from_millis(100))).await;
    let client = connect(&node).await;
    let alice = test_utils::genesis_researcher();

    let included = test_utils::submit_ok(
        &client,
        &alice,
        test_utils::random_create_trial_message(),
    )
    .await;
    assert_eq!(included.result.unwrap(), 1);

    let tip = client.block_header_best_chain().await.unwrap();
    assert_eq!(tip.hash(), included.block);
}

#[tokio::test]
async fn slow_sealer_times_out() {
    let node = start_node(Some(Duration::from_secs(3600))).await;
    let url = url::Url::parse(&node.url()).unwrap();
    let remote = RemoteNode::create(url)
        .await
        .unwrap()
        .with_finality_timeout(Duration::from_millis(800));
    let client = Client::from_backend(remote);
    let alice = test_utils::genesis_researcher();

    let submitted = client
        .sign_and_submit_message(&alice, test_utils::random_create_trial_message())
        .await
        .unwrap();
    match submitted.await {
        Err(Error::Timeout { timeout, .. }) => assert_eq!(timeout, Duration::from_millis(800)),
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(included) => panic!("transaction included in block {}", included.block),
    }
}

#[tokio::test]
async fn wrong_genesis_hash_is_refused() {
    let node = start_node(None).await;
    let client = connect(&node).await;
    let alice = test_utils::genesis_researcher();

    let transaction = Transaction::new_signed(
        &alice,
        test_utils::random_create_trial_message(),
        TransactionExtra {
            nonce: 0,
            genesis_hash: Hash::random(),
        },
    );
    match client.submit_transaction(transaction).await {
        Err(Error::InvalidTransaction { reason }) => {
            assert!(reason.contains("genesis"), "unexpected reason: {}", reason)
        }
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("transaction for a different chain was accepted"),
    }
}

#[tokio::test]
async fn unauthorized_author_dispatch_error_flows_back() {
    let node = start_node(None).await;
    let client = connect(&node).await;
    let mallory = test_utils::random_key_pair();

    let included = test_utils::submit_ok(
        &client,
        &mallory,
        test_utils::random_create_trial_message(),
    )
    .await;
    assert_eq!(included.result, Err(RegistryError::Unauthorized));
    assert_eq!(client.trial_count().await.unwrap(), 0);
}

#[tokio::test]
async fn node_reports_runtime_version_and_genesis() {
    let node = start_node(None).await;
    let client = connect(&node).await;

    assert_eq!(client.genesis_hash(), node.genesis_hash());
    let version = client.onchain_runtime_version().await.unwrap();
    assert_eq!(version, trial_registry_runtime::version());
}

#[tokio::test]
async fn accounts_appear_after_transacting() {
    let node = start_node(None).await;
    let client = connect(&node).await;
    let alice = test_utils::genesis_researcher();

    assert_eq!(client.account_nonce(&alice.public()).await.unwrap(), 0);
    test_utils::submit_ok(
        &client,
        &alice,
        test_utils::random_create_trial_message(),
    )
    .await;
    assert_eq!(client.account_nonce(&alice.public()).await.unwrap(), 1);
    assert_eq!(client.list_accounts().await.unwrap(), vec![alice.public()]);
}
