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

//! Defines the [Message] trait and implementations for all messages in
//! [trial_registry_core::message].

pub use trial_registry_core::message::*;
use trial_registry_core::*;
use trial_registry_runtime::{registry, Call as RuntimeCall, Event, SystemEvent};

#[derive(thiserror::Error, Debug)]
pub enum EventExtractionError {
    #[error("ExtrinsicSuccess or ExtrinsicFailed event not found")]
    ExtrinsicStatusMissing,
    #[error("Required event is missing")]
    EventMissing,
}

/// Trait implemented for every runtime message
///
/// For every registry call that is exposed to the user we implement [Message]
/// for the parameters struct of the call.
pub trait Message: Send + 'static {
    /// Output of a successfully applied message.
    ///
    /// This value is extracted from the events that are dispatched when the
    /// message is executed in a block.
    type Output: Send + 'static;

    /// Parse all events emitted by the message and return the appropriate
    /// message result.
    ///
    /// Returns an error if the event list is not well formed. For example if
    /// an expected event is missing.
    fn result_from_events(
        events: &[Event],
    ) -> Result<Result<Self::Output, RegistryError>, EventExtractionError>;

    fn into_runtime_call(self) -> RuntimeCall;
}

impl Message for message::AuthorizeResearcher {
    type Output = ();

    fn result_from_events(
        events: &[Event],
    ) -> Result<Result<Self::Output, RegistryError>, EventExtractionError> {
        extract_registry_result(events, |event| match event {
            registry::Event::ResearcherAuthorized(_) => Some(()),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> RuntimeCall {
        registry::Call::AuthorizeResearcher(self).into()
    }
}

impl Message for message::DeauthorizeResearcher {
    type Output = ();

    fn result_from_events(
        events: &[Event],
    ) -> Result<Result<Self::Output, RegistryError>, EventExtractionError> {
        extract_registry_result(events, |event| match event {
            registry::Event::ResearcherDeauthorized(_) => Some(()),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> RuntimeCall {
        registry::Call::DeauthorizeResearcher(self).into()
    }
}

impl Message for message::CreateTrial {
    /// The id assigned to the new trial, taken from the
    /// [registry::Event::TrialCreated] event. This is the only authoritative
    /// source for the id; deriving it from the trial count races with
    /// concurrent registrations.
    type Output = TrialId;

    fn result_from_events(
        events: &[Event],
    ) -> Result<Result<Self::Output, RegistryError>, EventExtractionError> {
        extract_registry_result(events, |event| match event {
            registry::Event::TrialCreated(id, _, _, _, _) => Some(*id),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> RuntimeCall {
        registry::Call::CreateTrial(self).into()
    }
}

impl Message for message::UpdateTrial {
    type Output = ();

    fn result_from_events(
        events: &[Event],
    ) -> Result<Result<Self::Output, RegistryError>, EventExtractionError> {
        extract_registry_result(events, |event| match event {
            registry::Event::TrialUpdated(_, _, _) => Some(()),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> RuntimeCall {
        registry::Call::UpdateTrial(self).into()
    }
}

/// Run `f` on all events to extract a potential output after
/// [get_dispatch_result] is successful. If `f` returns `None` for all events
/// an [EventExtractionError::EventMissing] error is returned.
fn extract_registry_result<T>(
    events: &[Event],
    f: impl Fn(&registry::Event) -> Option<T>,
) -> Result<Result<T, RegistryError>, EventExtractionError> {
    let dispatch_result = get_dispatch_result(events)?;
    match dispatch_result {
        Ok(()) => {
            let output = events
                .iter()
                .find_map(|event| match event {
                    Event::Registry(registry_event) => f(registry_event),
                    _ => None,
                })
                .ok_or(EventExtractionError::EventMissing)?;
            Ok(Ok(output))
        }
        Err(dispatch_error) => Ok(Err(dispatch_error)),
    }
}

/// Looks for [SystemEvent::ExtrinsicSuccess] and [SystemEvent::ExtrinsicFailed]
/// in the events and constructs the inner result accordingly. Returns an
/// [EventExtractionError::ExtrinsicStatusMissing] error if none of these
/// events is found.
fn get_dispatch_result(
    events: &[Event],
) -> Result<Result<(), RegistryError>, EventExtractionError> {
    events
        .iter()
        .find_map(|event| match event {
            Event::System(SystemEvent::ExtrinsicSuccess) => Some(Ok(())),
            Event::System(SystemEvent::ExtrinsicFailed(dispatch_error)) => {
                Some(Err(*dispatch_error))
            }
            _ => None,
        })
        .ok_or(EventExtractionError::ExtrinsicStatusMissing)
}
