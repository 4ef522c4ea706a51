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

//! Messages that can be submitted to the ledger as transactions.
//!
//! Every message is dispatched with the verified transaction author as the
//! origin. All messages require the origin to be an authorized researcher.

use codec::{Decode, Encode};

use crate::{AccountId, ContentHash, PatientId, TrialId, TrialStatus};

/// Grant `researcher` the authorization to create and update trials and to
/// manage researcher authorization.
///
/// Succeeds and emits `ResearcherAuthorized` even when `researcher` is
/// already authorized.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct AuthorizeResearcher {
    pub researcher: AccountId,
}

/// Revoke the authorization of `researcher`.
///
/// The origin may revoke its own authorization. Succeeds and emits
/// `ResearcherDeauthorized` even when `researcher` is not authorized.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct DeauthorizeResearcher {
    pub researcher: AccountId,
}

/// Register a new trial.
///
/// The registry assigns the next sequential [TrialId], stores an `Active`
/// record with the origin as researcher and the block timestamp as both
/// `start_date` and `last_updated`, and emits `TrialCreated` carrying the
/// assigned id. The id in the event is authoritative; clients must not
/// derive it from the trial count.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct CreateTrial {
    pub patient_id: PatientId,
    /// Reference to the trial payload in the content store. May be the
    /// empty sentinel for a trial without payload.
    pub data_hash: ContentHash,
}

/// Replace the payload reference and status of the trial identified by `id`
/// and advance its `last_updated` timestamp.
///
/// Fails with `InvalidId` when `id` is outside `1..=trial_count`. Any
/// authorized researcher may update any trial, not only its creator, and
/// any status may be set from any other status.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct UpdateTrial {
    pub id: TrialId,
    pub data_hash: ContentHash,
    pub status: TrialStatus,
}
