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

//! Define the commands supported by the CLI related to trials.

use std::path::{Path, PathBuf};

use super::*;
use crate::record::{self, Record};

/// Trial related commands
#[derive(StructOpt, Clone)]
pub enum Command {
    Create(Create),
    Update(Update),
    Show(Show),
    List(List),
    Export(Export),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Create(cmd) => cmd.run().await,
            Command::Update(cmd) => cmd.run().await,
            Command::Show(cmd) => cmd.run().await,
            Command::List(cmd) => cmd.run().await,
            Command::Export(cmd) => cmd.run().await,
        }
    }
}

#[derive(StructOpt, Clone)]
/// Register a new trial for a patient.
///
/// With `--data-file` the record is stored in the content store first and
/// the trial references it; without it the trial is registered with no
/// payload.
pub struct Create {
    /// Pseudonymous patient identifier.
    #[structopt(value_name = "patient-id")]
    patient_id: PatientId,

    /// Path to the trial record as CSV with a header row and one value row.
    #[structopt(long, value_name = "file")]
    data_file: Option<PathBuf>,

    #[structopt(flatten)]
    network_options: NetworkOptions,

    #[structopt(flatten)]
    store_options: StoreOptions,

    #[structopt(flatten)]
    tx_options: TxOptions,
}

#[async_trait::async_trait]
impl CommandT for Create {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.network_options.client().await?;

        let data_hash = match &self.data_file {
            Some(path) => {
                let bytes = load_payload(path)?;
                let store = self.store_options.store()?;
                let hash = store.add(bytes).await?;
                println!("Payload stored under {}.", hash);
                hash
            }
            None => ContentHash::empty(),
        };

        let create_fut = client
            .sign_and_submit_message(
                &self.tx_options.author,
                message::CreateTrial {
                    patient_id: self.patient_id.clone(),
                    data_hash,
                },
            )
            .await?;
        announce_tx("Registering trial...");

        let created = create_fut.await?;
        let block = created.block;
        let trial_id = transaction_applied_ok(created)?;
        println!(
            "Trial {} registered for patient {} in block {}.",
            trial_id, self.patient_id, block
        );
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
/// Update an existing trial's payload and status.
///
/// Fields not named are kept as they are: without `--data-file` the trial
/// keeps its payload, without `--status` its status.
pub struct Update {
    /// Id of the trial to update.
    #[structopt(value_name = "trial-id")]
    trial_id: TrialId,

    /// New status for the trial: active, completed or suspended.
    #[structopt(long, value_name = "status")]
    status: Option<TrialStatus>,

    /// Path to the new trial record as CSV with a header row and one value
    /// row.
    #[structopt(long, value_name = "file")]
    data_file: Option<PathBuf>,

    /// Detach the payload, leaving the trial with no data.
    #[structopt(long, conflicts_with = "data-file")]
    clear_data: bool,

    #[structopt(flatten)]
    network_options: NetworkOptions,

    #[structopt(flatten)]
    store_options: StoreOptions,

    #[structopt(flatten)]
    tx_options: TxOptions,
}

#[async_trait::async_trait]
impl CommandT for Update {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.network_options.client().await?;
        let trial =
            client
                .get_trial(self.trial_id)
                .await?
                .ok_or(CommandError::TrialNotFound {
                    trial_id: self.trial_id,
                })?;

        let data_hash = if self.clear_data {
            ContentHash::empty()
        } else {
            match &self.data_file {
                Some(path) => {
                    let bytes = load_payload(path)?;
                    let store = self.store_options.store()?;
                    let hash = store.add(bytes).await?;
                    println!("Payload stored under {}.", hash);
                    hash
                }
                None => trial.data_hash.clone(),
            }
        };
        let status = self.status.unwrap_or(trial.status);

        let update_fut = client
            .sign_and_submit_message(
                &self.tx_options.author,
                message::UpdateTrial {
                    id: self.trial_id,
                    data_hash,
                    status,
                },
            )
            .await?;
        announce_tx("Updating trial...");

        let updated = update_fut.await?;
        let block = updated.block;
        transaction_applied_ok(updated)?;
        println!("Trial {} updated in block {}.", self.trial_id, block);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Show a trial's ledger fields and its payload.
pub struct Show {
    /// Id of the trial.
    #[structopt(value_name = "trial-id")]
    trial_id: TrialId,

    #[structopt(flatten)]
    network_options: NetworkOptions,

    #[structopt(flatten)]
    store_options: StoreOptions,
}

#[async_trait::async_trait]
impl CommandT for Show {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.network_options.client().await?;
        let trial =
            client
                .get_trial(self.trial_id)
                .await?
                .ok_or(CommandError::TrialNotFound {
                    trial_id: self.trial_id,
                })?;

        println!("id: {}", trial.id);
        println!("patient_id: {}", trial.patient_id);
        println!("data_hash: {}", trial.data_hash);
        println!("status: {}", trial.status);
        println!("researcher: {}", trial.researcher);
        println!("start_date: {}", format_moment(trial.start_date));
        println!("last_updated: {}", format_moment(trial.last_updated));

        if trial.data_hash.is_empty() {
            println!("No data available for this trial. The data hash is empty.");
            return Ok(());
        }

        let store = self.store_options.store()?;
        let bytes = store.cat(&trial.data_hash).await?;
        match Record::parse(&bytes) {
            Ok(record) => {
                warn_on_missing_columns(&record);
                println!();
                for (column, value) in record.fields() {
                    println!("{}: {}", column, value);
                }
            }
            Err(error) => {
                println!("Warning: payload is not a single-row record: {}", error);
                print!("{}", String::from_utf8_lossy(&bytes));
            }
        }
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// List all trials in the registry
pub struct List {
    #[structopt(flatten)]
    network_options: NetworkOptions,
}

#[async_trait::async_trait]
impl CommandT for List {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.network_options.client().await?;
        let count = client.trial_count().await?;
        println!("TRIALS ({})", count);
        for id in 1..=count {
            let trial = client
                .get_trial(id)
                .await?
                .ok_or(CommandError::TrialNotFound { trial_id: id })?;
            println!(
                "{}: patient {}, {}, started {}",
                trial.id,
                trial.patient_id,
                trial.status,
                format_moment(trial.start_date)
            );
        }
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Export all trial records into one CSV file.
///
/// Trials without a payload and payloads that cannot be retrieved are
/// skipped with a warning. The exported table is the union of all record
/// columns plus ledger metadata per row.
pub struct Export {
    /// Path of the CSV file to write.
    #[structopt(value_name = "file", default_value = "all_trials.csv")]
    output: PathBuf,

    #[structopt(flatten)]
    network_options: NetworkOptions,

    #[structopt(flatten)]
    store_options: StoreOptions,
}

#[async_trait::async_trait]
impl CommandT for Export {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.network_options.client().await?;
        let store = self.store_options.store()?;
        let count = client.trial_count().await?;

        let [id_column, status_column, researcher_column, start_column, updated_column] =
            record::LEDGER_COLUMNS;

        let mut records = Vec::new();
        for id in 1..=count {
            let trial = client
                .get_trial(id)
                .await?
                .ok_or(CommandError::TrialNotFound { trial_id: id })?;
            if trial.data_hash.is_empty() {
                println!("Warning: no data available for trial {}", id);
                continue;
            }
            let bytes = match store.cat(&trial.data_hash).await {
                Ok(bytes) => bytes,
                Err(error) => {
                    println!("Warning: could not retrieve data for trial {}: {}", id, error);
                    continue;
                }
            };
            let mut record = match Record::parse(&bytes) {
                Ok(record) => record,
                Err(error) => {
                    println!("Warning: could not parse data for trial {}: {}", id, error);
                    continue;
                }
            };

            record.set(id_column, trial.id.to_string());
            record.set(status_column, trial.status.to_string());
            record.set(researcher_column, trial.researcher.to_string());
            record.set(start_column, format_moment(trial.start_date));
            record.set(updated_column, format_moment(trial.last_updated));
            records.push(record);
        }

        if records.is_empty() {
            println!("No trial data available to export.");
            return Ok(());
        }

        let csv = record::merge_to_csv(&records);
        std::fs::write(&self.output, csv).map_err(|error| CommandError::FileIo {
            path: self.output.clone(),
            error,
        })?;
        println!(
            "Exported {} trial records to {}.",
            records.len(),
            self.output.display()
        );
        Ok(())
    }
}

/// Read and validate a trial record file, returning its raw bytes.
///
/// The bytes are uploaded as they are so that the content hash matches the
/// file; validation only checks that the store will hold a readable record.
fn load_payload(path: &Path) -> Result<Vec<u8>, CommandError> {
    let bytes = std::fs::read(path).map_err(|error| CommandError::FileIo {
        path: path.to_path_buf(),
        error,
    })?;
    let record = Record::parse(&bytes)?;
    warn_on_missing_columns(&record);
    Ok(bytes)
}

fn warn_on_missing_columns(record: &Record) {
    let missing = record.missing_common_columns();
    if !missing.is_empty() {
        println!(
            "Warning: record is missing common columns: {}",
            missing.join(", ")
        );
    }
}
