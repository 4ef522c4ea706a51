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

//! Development node for the trial registry.
//!
//! Runs a [trial_registry_runtime::Ledger] in memory and serves it over HTTP
//! JSON-RPC. Blocks are sealed instantly on every submitted transaction or,
//! with a block time configured, at a fixed interval from a transaction
//! pool. State is not persisted; a restart starts a fresh chain from
//! genesis.
//!
//! [Node::start] is used by integration tests to run a node in process; the
//! `trial-registry-node` binary wraps it for the command line.

pub mod rpc;
mod service;

pub use service::{Node, NodeConfig, Service, TransactionState};
