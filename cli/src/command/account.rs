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

//! Define the commands supported by the CLI related to accounts.

use super::*;
use crate::account_storage;

/// Account related commands
#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    Generate(Generate),
    List(List),
    Address(ShowAddress),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Generate(cmd) => cmd.run().await,
            Command::List(cmd) => cmd.run().await,
            Command::Address(cmd) => cmd.run().await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Generate a new account with a random seed and store it on this machine.
pub struct Generate {
    /// The name under which the account is stored.
    name: String,
}

#[async_trait::async_trait]
impl CommandT for Generate {
    async fn run(self) -> Result<(), CommandError> {
        let seed: account_storage::Seed = rand::random();
        account_storage::add(self.name.clone(), account_storage::AccountData { seed })?;
        let public = ed25519::Pair::from_seed(&seed).public();
        println!("Account {} generated", self.name);
        println!("Address: {}", public);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// List all accounts stored on this machine.
pub struct List {}

#[async_trait::async_trait]
impl CommandT for List {
    async fn run(self) -> Result<(), CommandError> {
        let accounts = account_storage::list()?;
        let mut accounts: Vec<_> = accounts.into_iter().collect();
        accounts.sort_by(|(a, _), (b, _)| a.cmp(b));

        println!("ACCOUNTS ({})", accounts.len());
        for (name, data) in accounts {
            let public = ed25519::Pair::from_seed(&data.seed).public();
            println!("{}: {}", name, public);
        }
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Show the address of a stored account or of a development phrase.
pub struct ShowAddress {
    /// The name of a stored account or a development phrase starting
    /// with `//`.
    #[structopt(value_name = "account", parse(try_from_str = crate::lookup_author))]
    author: ed25519::Pair,
}

#[async_trait::async_trait]
impl CommandT for ShowAddress {
    async fn run(self) -> Result<(), CommandError> {
        println!("{}", self.author.public());
        Ok(())
    }
}
