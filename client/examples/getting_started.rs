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

//! Getting started with the client by registering a trial.
//!
//! We register a trial for a patient as //Alice and inspect the node state.
//!
//! To run this example you need a running dev node. You can start it with
//! `cargo run -p trial-registry-node`.

use trial_registry_client::*;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    // Create a key pair to author transactions from a development phrase.
    // This account is authorized as a researcher on the local development
    // chain.
    let alice = ed25519::Pair::from_string("//Alice").unwrap();
    println!("Registering a trial as //Alice ({})", alice.public());

    // Create and connect to a client on local host
    let node_url = url::Url::parse("http://127.0.0.1:9933").unwrap();
    println!("Connecting to node on {}", node_url);
    let client = Client::create(node_url).await?;

    // Show how many trials the registry holds
    let trial_count = client.trial_count().await?;
    println!("Registered trials: {}", trial_count);

    // Sign and submit the message. If successful, returns a future that
    // resolves when the transaction is included in a block.
    print!("Submitting trial registration... ");
    let create_submitted = client
        .sign_and_submit_message(
            &alice,
            message::CreateTrial {
                patient_id: "P-0001".parse().unwrap(),
                data_hash: ContentHash::empty(),
            },
        )
        .await?;
    println!("done");

    print!("Waiting for transaction to be included in a block... ");
    let create_included = create_submitted.await?;
    println!("done");

    // We can use the [TransactionIncluded] struct to get the block.
    println!("Transaction included in block {}", create_included.block);

    // We can also use it to get the result of applying the transaction in
    // the ledger. This fails for example if the author is not an authorized
    // researcher. On success it carries the id the registry assigned.
    match create_included.result {
        Ok(trial_id) => {
            println!("Trial {} registered!", trial_id);
            let trial = client.get_trial(trial_id).await?;
            println!("Trial state: {:?}", trial);
        }
        Err(err) => println!("Failed to register trial: {}", err),
    }

    // Show the new trial count
    let trial_count = client.trial_count().await?;
    println!("Registered trials: {}", trial_count);

    Ok(())
}
