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

/// Reference into the content-addressed store, limited to
/// [ContentHash::MAXIMUM_SUPPORTED_LENGTH] bytes.
///
/// The registry stores the reference opaquely; only the content store can
/// resolve it. The empty string is a valid value and means a trial carries
/// no payload. Readers must treat it as "no payload" rather than as an
/// error, see [ContentHash::is_empty].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Encode)]
pub struct ContentHash(String);

impl ContentHash {
    pub const MAXIMUM_SUPPORTED_LENGTH: usize = 128;

    /// The "no payload" sentinel.
    pub const fn empty() -> Self {
        ContentHash(String::new())
    }

    /// Smart constructor, failing if `s` exceeds
    /// [ContentHash::MAXIMUM_SUPPORTED_LENGTH] bytes.
    pub fn from_string(s: String) -> Result<Self, InordinateStringError> {
        if s.len() > Self::MAXIMUM_SUPPORTED_LENGTH {
            Err(InordinateStringError {
                actual_length: s.len(),
            })
        } else {
            Ok(ContentHash(s))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error when a content hash exceeds the supported length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
#[error(
    "content hash of {actual_length} bytes exceeds the supported maximum of 128 bytes"
)]
pub struct InordinateStringError {
    pub actual_length: usize,
}

impl TryFrom<String> for ContentHash {
    type Error = InordinateStringError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ContentHash::from_string(s)
    }
}

impl TryFrom<&str> for ContentHash {
    type Error = InordinateStringError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        ContentHash::from_string(s.to_string())
    }
}

impl FromStr for ContentHash {
    type Err = InordinateStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentHash::try_from(s)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ContentHash({:?})", self.0)
    }
}

impl Decode for ContentHash {
    fn decode<I: Input>(input: &mut I) -> Result<Self, codec::Error> {
        let decoded: String = String::decode(input)?;
        ContentHash::from_string(decoded)
            .map_err(|_| codec::Error::from("content hash length violation"))
    }
}
