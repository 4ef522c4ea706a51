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

//! The trial registry contract.
//!
//! Holds the set of authorized researchers and the registered trials.
//! All calls require the origin to be an authorized researcher; dispatch is
//! all-or-nothing, a failed call changes no state.

use codec::{Decode, Encode};

use crate::Storage;
use trial_registry_core::{
    message, state, AccountId, ContentHash, Moment, PatientId, RegistryError, TrialId,
    TrialStatus,
};

/// The calls the registry module dispatches.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub enum Call {
    AuthorizeResearcher(message::AuthorizeResearcher),
    DeauthorizeResearcher(message::DeauthorizeResearcher),
    CreateTrial(message::CreateTrial),
    UpdateTrial(message::UpdateTrial),
}

/// The events the registry module emits.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub enum Event {
    /// A trial was registered: id, patient id, payload reference, status and
    /// the researcher that created it. The id is the authoritative source
    /// for the trial's identity.
    TrialCreated(TrialId, PatientId, ContentHash, TrialStatus, AccountId),
    /// A trial was updated: id, new payload reference and new status.
    TrialUpdated(TrialId, ContentHash, TrialStatus),
    ResearcherAuthorized(AccountId),
    ResearcherDeauthorized(AccountId),
}

/// Storage keys and typed accessors of the registry state.
///
/// * `TrialCount` under [store::TRIAL_COUNT_KEY], the number of registered
///   trials.
/// * `Trials` map under [store::TRIALS_PREFIX], keyed by the SCALE encoded
///   [TrialId]. The id can be recovered from the storage key.
/// * `AuthorizedResearchers` map under
///   [store::AUTHORIZED_RESEARCHERS_PREFIX], keyed by the SCALE encoded
///   [AccountId]. Deauthorized accounts keep an entry with value `false`.
pub mod store {
    use super::*;

    pub const TRIAL_COUNT_KEY: &[u8] = b"registry:trial_count";
    pub const TRIALS_PREFIX: &[u8] = b"registry:trials:";
    pub const AUTHORIZED_RESEARCHERS_PREFIX: &[u8] = b"registry:authorized_researchers:";

    pub fn trial_key(id: TrialId) -> Vec<u8> {
        let mut key = TRIALS_PREFIX.to_vec();
        key.extend(id.encode());
        key
    }

    pub fn authorized_researcher_key(account: &AccountId) -> Vec<u8> {
        let mut key = AUTHORIZED_RESEARCHERS_PREFIX.to_vec();
        key.extend(account.encode());
        key
    }

    pub fn trial_count(storage: &Storage) -> TrialId {
        storage.get(TRIAL_COUNT_KEY).unwrap_or(0)
    }

    pub fn get_trial(storage: &Storage, id: TrialId) -> Option<state::Trial> {
        storage.get(&trial_key(id))
    }

    pub fn put_trial(storage: &mut Storage, trial: &state::Trial) {
        storage.put(trial_key(trial.id), trial);
    }

    pub fn is_authorized(storage: &Storage, account: &AccountId) -> bool {
        storage
            .get(&authorized_researcher_key(account))
            .unwrap_or(false)
    }

    pub fn put_authorized(storage: &mut Storage, account: &AccountId, authorized: bool) {
        storage.put(authorized_researcher_key(account), &authorized);
    }
}

/// Apply `call` to the registry state on behalf of `origin`.
///
/// `now` is the timestamp of the block the transaction is included in. On
/// success the emitted registry events are returned in order; on failure
/// nothing was written.
pub fn dispatch(
    storage: &mut Storage,
    origin: AccountId,
    call: Call,
    now: Moment,
) -> Result<Vec<Event>, RegistryError> {
    ensure_authorized(storage, &origin)?;
    match call {
        Call::AuthorizeResearcher(message) => {
            store::put_authorized(storage, &message.researcher, true);
            Ok(vec![Event::ResearcherAuthorized(message.researcher)])
        }
        Call::DeauthorizeResearcher(message) => {
            store::put_authorized(storage, &message.researcher, false);
            Ok(vec![Event::ResearcherDeauthorized(message.researcher)])
        }
        Call::CreateTrial(message) => {
            let id = store::trial_count(storage) + 1;
            let trial =
                state::Trial::new(id, message.patient_id, message.data_hash, origin, now);
            storage.put(store::TRIAL_COUNT_KEY.to_vec(), &id);
            store::put_trial(storage, &trial);
            Ok(vec![Event::TrialCreated(
                id,
                trial.patient_id,
                trial.data_hash,
                trial.status,
                trial.researcher,
            )])
        }
        Call::UpdateTrial(message) => {
            if message.id == 0 || message.id > store::trial_count(storage) {
                return Err(RegistryError::InvalidId);
            }
            let trial = store::get_trial(storage, message.id)
                .expect("registered trial ids have no gaps");
            let updated =
                trial.with_update(message.data_hash.clone(), message.status, now);
            store::put_trial(storage, &updated);
            Ok(vec![Event::TrialUpdated(
                message.id,
                message.data_hash,
                message.status,
            )])
        }
    }
}

fn ensure_authorized(storage: &Storage, origin: &AccountId) -> Result<(), RegistryError> {
    if store::is_authorized(storage, origin) {
        Ok(())
    } else {
        Err(RegistryError::Unauthorized)
    }
}

/// View: the trial registered under `id`.
///
/// Fails with `InvalidId` when `id` is outside `1..=trial_count`. The
/// returned record is a snapshot; later updates do not affect it.
pub fn get_trial(storage: &Storage, id: TrialId) -> Result<state::Trial, RegistryError> {
    if id == 0 || id > store::trial_count(storage) {
        return Err(RegistryError::InvalidId);
    }
    Ok(store::get_trial(storage, id).expect("registered trial ids have no gaps"))
}

/// View: the number of registered trials.
pub fn trial_count(storage: &Storage) -> TrialId {
    store::trial_count(storage)
}

/// View: whether `account` is currently an authorized researcher.
pub fn is_authorized(storage: &Storage, account: &AccountId) -> bool {
    store::is_authorized(storage, account)
}
