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

use codec::{Decode, Encode};
use thiserror::Error as ThisError;

/// Errors the registry dispatch can fail with.
///
/// A failed dispatch leaves all registry state unchanged. The error is
/// recorded in the block's `ExtrinsicFailed` event and carried back to the
/// transaction author as the typed transaction result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, ThisError)]
pub enum RegistryError {
    /// The transaction author is not an authorized researcher.
    #[error("the author is not an authorized researcher")]
    Unauthorized,

    /// The referenced trial id is outside the range of registered trials.
    #[error("the trial id is outside the range of registered trials")]
    InvalidId,
}

impl From<RegistryError> for &'static str {
    fn from(error: RegistryError) -> &'static str {
        match error {
            RegistryError::Unauthorized => "not an authorized researcher",
            RegistryError::InvalidId => "invalid trial id",
        }
    }
}
