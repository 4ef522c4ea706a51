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

//! Define the commands supported by the CLI related to researcher
//! authorization.

use super::*;

/// Researcher authorization related commands
#[derive(StructOpt, Clone)]
pub enum Command {
    Authorize(Authorize),
    Deauthorize(Deauthorize),
    Status(Status),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Authorize(cmd) => cmd.run().await,
            Command::Deauthorize(cmd) => cmd.run().await,
            Command::Status(cmd) => cmd.run().await,
        }
    }
}

#[derive(StructOpt, Clone)]
/// Authorize a researcher to create and update trials.
///
/// The author must be an authorized researcher.
pub struct Authorize {
    /// Address of the researcher to authorize, as 64 hex characters.
    #[structopt(value_name = "address")]
    researcher: AccountId,

    #[structopt(flatten)]
    network_options: NetworkOptions,

    #[structopt(flatten)]
    tx_options: TxOptions,
}

#[async_trait::async_trait]
impl CommandT for Authorize {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.network_options.client().await?;
        let authorize_fut = client
            .sign_and_submit_message(
                &self.tx_options.author,
                message::AuthorizeResearcher {
                    researcher: self.researcher,
                },
            )
            .await?;
        announce_tx("Authorizing researcher...");

        let authorized = authorize_fut.await?;
        transaction_applied_ok(authorized)?;
        println!("Researcher {} is now authorized.", self.researcher);
        Ok(())
    }
}

#[derive(StructOpt, Clone)]
/// Revoke a researcher's authorization.
///
/// The author must be an authorized researcher. Revoking the last
/// authorized researcher leaves the registry without anyone able to
/// mutate it.
pub struct Deauthorize {
    /// Address of the researcher to deauthorize, as 64 hex characters.
    #[structopt(value_name = "address")]
    researcher: AccountId,

    #[structopt(flatten)]
    network_options: NetworkOptions,

    #[structopt(flatten)]
    tx_options: TxOptions,
}

#[async_trait::async_trait]
impl CommandT for Deauthorize {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.network_options.client().await?;
        let deauthorize_fut = client
            .sign_and_submit_message(
                &self.tx_options.author,
                message::DeauthorizeResearcher {
                    researcher: self.researcher,
                },
            )
            .await?;
        announce_tx("Deauthorizing researcher...");

        let deauthorized = deauthorize_fut.await?;
        transaction_applied_ok(deauthorized)?;
        println!("Researcher {} is no longer authorized.", self.researcher);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Show whether an account is an authorized researcher.
pub struct Status {
    /// Address of the researcher, as 64 hex characters.
    #[structopt(value_name = "address")]
    researcher: AccountId,

    #[structopt(flatten)]
    network_options: NetworkOptions,
}

#[async_trait::async_trait]
impl CommandT for Status {
    async fn run(self) -> Result<(), CommandError> {
        let client = self.network_options.client().await?;
        let authorized = client.is_researcher_authorized(&self.researcher).await?;
        if authorized {
            println!("{} is an authorized researcher.", self.researcher);
        } else {
            println!("{} is not an authorized researcher.", self.researcher);
        }
        Ok(())
    }
}
