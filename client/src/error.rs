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

use std::time::Duration;

use parity_scale_codec::Error as CodecError;

use crate::message::EventExtractionError;

/// Error that may be returned by any of the [crate::ClientT] methods
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Decoding the received data failed
    #[error("Decoding the received data failed")]
    Codec(#[from] CodecError),

    /// Error from the underlying RPC connection
    #[error("Error from the underlying RPC connection")]
    Rpc(#[from] reqwest::Error),

    /// The node refused the transaction before including it in a block
    #[error("Invalid transaction: {reason}")]
    InvalidTransaction { reason: String },

    /// The transaction was accepted but not included within the finality
    /// timeout
    #[error("Transaction {tx_hash} was not included in a block within {timeout:?}")]
    Timeout {
        tx_hash: crate::TxHash,
        timeout: Duration,
    },

    /// Node is running an incompatible runtime
    #[error("Node is running incompatible runtime {spec_name} v{spec_version}")]
    IncompatibleRuntimeVersion {
        spec_name: String,
        spec_version: u32,
    },

    /// Failed to extract required events for a transaction
    #[error("Failed to extract required events for transaction {tx_hash}")]
    EventExtraction {
        error: EventExtractionError,
        tx_hash: crate::TxHash,
    },

    /// Other error
    #[error("Other error: {0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Other(error)
    }
}

impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error::Other(error.into())
    }
}
