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

//! Define the command line parser and interface.

#![allow(clippy::large_enum_variant)]

use structopt::StructOpt;
use thiserror::Error as ThisError;
use trial_registry_client::*;
use trial_registry_content_store::ContentStore;

pub mod account_storage;
pub mod record;

mod command;
use command::{account, dataset, other, researcher, trial};

/// The type that captures the command line.
#[derive(StructOpt, Clone)]
#[structopt(name = "trial-registry-cli", max_term_width = 80)]
pub struct CommandLine {
    #[structopt(subcommand)]
    pub command: Command,
}

impl CommandLine {
    pub async fn run(self) -> Result<(), CommandError> {
        self.command.run().await
    }
}

/// Network-related command-line options
#[derive(StructOpt, Clone, Debug)]
pub struct NetworkOptions {
    /// URL of the node's HTTP RPC endpoint
    #[structopt(
        long,
        default_value = "http://127.0.0.1:9933",
        env = "TRIAL_NODE_URL",
        value_name = "url",
        parse(try_from_str = url::Url::parse),
    )]
    pub node_url: url::Url,
}

impl NetworkOptions {
    pub async fn client(&self) -> Result<Client, Error> {
        Client::create(self.node_url.clone()).await
    }
}

/// Content-store-related command-line options
#[derive(StructOpt, Clone, Debug)]
pub struct StoreOptions {
    /// URL of the content store's HTTP API
    #[structopt(
        long,
        default_value = "http://127.0.0.1:5001",
        env = "TRIAL_STORE_URL",
        value_name = "url",
        parse(try_from_str = url::Url::parse),
    )]
    pub store_url: url::Url,
}

impl StoreOptions {
    pub fn store(&self) -> Result<ContentStore, trial_registry_content_store::Error> {
        ContentStore::new(self.store_url.clone())
    }
}

/// Transaction-related command-line options
#[derive(StructOpt, Clone)]
pub struct TxOptions {
    /// The transaction author: the name of a stored account or a development
    /// phrase starting with `//`.
    #[structopt(
        long,
        env = "TRIAL_AUTHOR",
        value_name = "account",
        parse(try_from_str = lookup_author)
    )]
    pub author: ed25519::Pair,
}

fn lookup_author(name: &str) -> Result<ed25519::Pair, String> {
    if name.starts_with("//") {
        return ed25519::Pair::from_string(name).map_err(|e| format!("{}", e));
    }
    account_storage::get(name)
        .map(|account| ed25519::Pair::from_seed(&account.seed))
        .map_err(|e| format!("{}", e))
}

/// The supported [CommandLine] commands.
/// The commands are grouped by domain.
#[derive(StructOpt, Clone)]
pub enum Command {
    Account(account::Command),
    Researcher(researcher::Command),
    Trial(trial::Command),
    Dataset(dataset::Command),

    #[structopt(flatten)]
    Other(other::Command),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Account(cmd) => cmd.run().await,
            Command::Researcher(cmd) => cmd.run().await,
            Command::Trial(cmd) => cmd.run().await,
            Command::Dataset(cmd) => cmd.run().await,
            Command::Other(cmd) => cmd.run().await,
        }
    }
}

/// The trait that every command must implement.
#[async_trait::async_trait]
pub trait CommandT {
    async fn run(self) -> Result<(), CommandError>;
}

/// Error returned by [CommandT::run].
///
/// Implements [From] for client, record, account storage and content store
/// errors.
#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error("client error")]
    ClientError(#[from] Error),

    #[error("transaction failed in block {block}: {error}")]
    FailedTransaction {
        error: RegistryError,
        block: BlockHash,
    },

    #[error("cannot find trial {trial_id}")]
    TrialNotFound { trial_id: TrialId },

    #[error("cannot access {}", path.display())]
    FileIo {
        path: std::path::PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error(transparent)]
    InvalidRecord(#[from] record::ParseError),

    #[error(transparent)]
    AccountStorageError(#[from] account_storage::Error),

    #[error("content store error")]
    ContentStoreError(#[from] trial_registry_content_store::Error),
}
