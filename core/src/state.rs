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

//! Types for state stored on the ledger.

use std::fmt;
use std::str::FromStr;

use codec::{Decode, Encode};
use thiserror::Error as ThisError;

use crate::{AccountId, ContentHash, Moment, PatientId, TrialId};

/// Lifecycle status of a [Trial].
///
/// The wire encoding is the SCALE variant index: 0 = Active, 1 = Completed,
/// 2 = Suspended. Any status may be set from any other status by any
/// authorized researcher; the registry imposes no transition restrictions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
pub enum TrialStatus {
    Active,
    Completed,
    Suspended,
}

impl fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrialStatus::Active => f.write_str("Active"),
            TrialStatus::Completed => f.write_str("Completed"),
            TrialStatus::Suspended => f.write_str("Suspended"),
        }
    }
}

/// Error parsing a [TrialStatus] from a string.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("unknown trial status {0:?}, expected active, completed or suspended")]
pub struct InvalidTrialStatus(pub String);

impl FromStr for TrialStatus {
    type Err = InvalidTrialStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(TrialStatus::Active),
            "completed" => Ok(TrialStatus::Completed),
            "suspended" => Ok(TrialStatus::Suspended),
            _ => Err(InvalidTrialStatus(s.to_string())),
        }
    }
}

/// A clinical trial record.
///
/// # Storage
///
/// Trials are stored as a map from [TrialId] to [Trial] under the registry
/// storage prefix, with the number of registered trials kept alongside.
///
/// # Invariants
///
/// * `id` is assigned sequentially starting at 1, with no gaps and no reuse.
/// * `patient_id`, `researcher` and `start_date` never change after
///   creation.
/// * `last_updated >= start_date`, and `last_updated` strictly increases
///   with every update.
/// * `data_hash` may be empty, meaning the trial carries no payload.
///
/// # Relevant messages
///
/// * [crate::message::CreateTrial]
/// * [crate::message::UpdateTrial]
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct Trial {
    pub id: TrialId,
    pub patient_id: PatientId,
    pub data_hash: ContentHash,
    pub status: TrialStatus,
    /// The account that created the trial. Not necessarily the author of
    /// the latest update.
    pub researcher: AccountId,
    pub start_date: Moment,
    pub last_updated: Moment,
}

impl Trial {
    /// The record [crate::message::CreateTrial] stores: a new trial is
    /// `Active` and both timestamps equal the creation time.
    pub fn new(
        id: TrialId,
        patient_id: PatientId,
        data_hash: ContentHash,
        researcher: AccountId,
        now: Moment,
    ) -> Self {
        Trial {
            id,
            patient_id,
            data_hash,
            status: TrialStatus::Active,
            researcher,
            start_date: now,
            last_updated: now,
        }
    }

    /// The record after [crate::message::UpdateTrial]: payload reference and
    /// status replaced, `last_updated` advanced, everything else untouched.
    pub fn with_update(self, data_hash: ContentHash, status: TrialStatus, now: Moment) -> Self {
        Trial {
            data_hash,
            status,
            last_updated: now,
            ..self
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn status_parse_accepts_any_case() {
        assert_eq!(TrialStatus::from_str("active").unwrap(), TrialStatus::Active);
        assert_eq!(
            TrialStatus::from_str("Completed").unwrap(),
            TrialStatus::Completed
        );
        assert_eq!(
            TrialStatus::from_str("SUSPENDED").unwrap(),
            TrialStatus::Suspended
        );
        assert!(TrialStatus::from_str("archived").is_err());
    }

    #[test]
    fn status_wire_encoding_is_variant_index() {
        assert_eq!(TrialStatus::Active.encode(), vec![0]);
        assert_eq!(TrialStatus::Completed.encode(), vec![1]);
        assert_eq!(TrialStatus::Suspended.encode(), vec![2]);
    }

    #[test]
    fn update_preserves_immutable_fields() {
        let researcher = crate::ed25519::Pair::generate().public();
        let trial = Trial::new(
            1,
            PatientId::try_from("P1").unwrap(),
            ContentHash::try_from("hash-one").unwrap(),
            researcher,
            1000,
        );
        let updated = trial.clone().with_update(
            ContentHash::try_from("hash-two").unwrap(),
            TrialStatus::Completed,
            2000,
        );
        assert_eq!(updated.id, trial.id);
        assert_eq!(updated.patient_id, trial.patient_id);
        assert_eq!(updated.researcher, trial.researcher);
        assert_eq!(updated.start_date, 1000);
        assert_eq!(updated.last_updated, 2000);
        assert_eq!(updated.status, TrialStatus::Completed);
        assert_eq!(updated.data_hash.as_str(), "hash-two");
    }
}
