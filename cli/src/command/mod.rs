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

//! Define the commands supported by the CLI.

use structopt::StructOpt;
use trial_registry_client::*;

use crate::{CommandError, CommandT, NetworkOptions, StoreOptions, TxOptions};

pub mod account;
pub mod dataset;
pub mod other;
pub mod researcher;
pub mod trial;

fn announce_tx(msg: &str) {
    println!("{}", msg);
    println!("⏳ Transactions might take a while to be processed. Please wait...");
}

/// Extract the typed output of an included transaction, failing with
/// [CommandError::FailedTransaction] if the registry rejected the message.
fn transaction_applied_ok<Message_: Message>(
    tx_included: TransactionIncluded<Message_>,
) -> Result<Message_::Output, CommandError> {
    match tx_included.result {
        Ok(output) => Ok(output),
        Err(error) => Err(CommandError::FailedTransaction {
            error,
            block: tx_included.block,
        }),
    }
}

/// Render a ledger timestamp for humans. Falls back to the raw millisecond
/// value if it does not fit a calendar date.
fn format_moment(moment: Moment) -> String {
    match chrono::DateTime::<chrono::Utc>::from_timestamp_millis(moment as i64) {
        Some(utc) => utc.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("{} ms", moment),
    }
}
