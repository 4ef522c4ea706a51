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

//! Events emitted while applying transactions.
//!
//! Every included transaction ends with exactly one [SystemEvent] telling
//! whether its dispatch succeeded; the registry events it emitted precede
//! it. Clients extract typed transaction results from this list.

use codec::{Decode, Encode};

use crate::registry;
use trial_registry_core::RegistryError;

/// An event emitted while applying a transaction, from any runtime module.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub enum Event {
    System(SystemEvent),
    Registry(registry::Event),
}

/// Events emitted by the ledger harness itself.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub enum SystemEvent {
    /// The call dispatch succeeded.
    ExtrinsicSuccess,
    /// The call dispatch failed; no state was changed.
    ExtrinsicFailed(RegistryError),
}

impl From<SystemEvent> for Event {
    fn from(event: SystemEvent) -> Self {
        Event::System(event)
    }
}

impl From<registry::Event> for Event {
    fn from(event: registry::Event) -> Self {
        Event::Registry(event)
    }
}
