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

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use codec::{Decode, Encode, Input};
use thiserror::Error as ThisError;

/// Opaque patient identifier attached to a trial at creation, limited to
/// [PatientId::MAXIMUM_SUPPORTED_LENGTH] bytes.
///
/// The registry imposes no structure beyond the length bound. The identifier
/// is immutable for the lifetime of the trial.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Encode)]
pub struct PatientId(String);

impl PatientId {
    pub const MAXIMUM_SUPPORTED_LENGTH: usize = 64;

    /// Smart constructor, failing if `s` exceeds
    /// [PatientId::MAXIMUM_SUPPORTED_LENGTH] bytes.
    pub fn from_string(s: String) -> Result<Self, InordinatePatientIdError> {
        if s.len() > Self::MAXIMUM_SUPPORTED_LENGTH {
            Err(InordinatePatientIdError {
                actual_length: s.len(),
            })
        } else {
            Ok(PatientId(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error when a patient id exceeds the supported length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
#[error("patient id of {actual_length} bytes exceeds the supported maximum of 64 bytes")]
pub struct InordinatePatientIdError {
    pub actual_length: usize,
}

impl TryFrom<String> for PatientId {
    type Error = InordinatePatientIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PatientId::from_string(s)
    }
}

impl TryFrom<&str> for PatientId {
    type Error = InordinatePatientIdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        PatientId::from_string(s.to_string())
    }
}

impl FromStr for PatientId {
    type Err = InordinatePatientIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatientId::try_from(s)
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PatientId({:?})", self.0)
    }
}

impl Decode for PatientId {
    fn decode<I: Input>(input: &mut I) -> Result<Self, codec::Error> {
        let decoded: String = String::decode(input)?;
        PatientId::from_string(decoded)
            .map_err(|_| codec::Error::from("patient id length violation"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_strings_within_bounds() {
        PatientId::try_from("P-2026-0001").unwrap();
        PatientId::from_string("a".repeat(PatientId::MAXIMUM_SUPPORTED_LENGTH)).unwrap();
    }

    #[test]
    fn rejects_inordinate_strings() {
        let error = PatientId::from_string(
            "a".repeat(PatientId::MAXIMUM_SUPPORTED_LENGTH + 1),
        )
        .unwrap_err();
        assert_eq!(error.actual_length, PatientId::MAXIMUM_SUPPORTED_LENGTH + 1);
    }

    #[test]
    fn decode_after_encode_is_identity() {
        let patient_id = PatientId::try_from("P1").unwrap();
        let decoded = PatientId::decode(&mut &patient_id.encode()[..]).unwrap();
        assert_eq!(patient_id, decoded);
    }

    #[test]
    fn decode_revalidates() {
        let inordinate = "a".repeat(PatientId::MAXIMUM_SUPPORTED_LENGTH + 1);
        assert!(PatientId::decode(&mut &inordinate.encode()[..]).is_err());
    }
}
