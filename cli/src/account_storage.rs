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

//! Manages accounts stored in the filesystem,
//! providing ways to store and retrieve them.

use std::collections::HashMap;
use std::fs::File;
use std::io::Error as IoError;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// The data that is stored in the filesystem relative
/// to an account. The account name is used as the key
/// to this value, therefore not included here.
#[derive(Serialize, Deserialize)]
pub struct AccountData {
    pub seed: Seed,
}

/// The seed from which an account's key pair
/// can be deterministically generated.
pub type Seed = [u8; 32];

#[derive(Debug, ThisError)]
pub enum Error {
    /// An account with the given name already exists
    #[error("an account named {0} already exists")]
    AlreadyExists(String),

    /// No account with the given name is stored
    #[error("no stored account named {0}")]
    NotFound(String),

    /// Failed to write to the accounts file
    #[error("failed to write to the accounts file: {0}")]
    FailedWrite(#[from] WritingError),

    /// Failed to read the accounts file
    #[error("failed to read the accounts file: {0}")]
    FailedRead(#[from] ReadingError),
}

/// Possible errors when writing to the accounts file.
#[derive(Debug, ThisError)]
pub enum WritingError {
    #[error(transparent)]
    IO(IoError),

    #[error(transparent)]
    Serialization(serde_json::Error),
}

/// Possible errors when reading the accounts file.
#[derive(Debug, ThisError)]
pub enum ReadingError {
    #[error(transparent)]
    IO(IoError),

    #[error(transparent)]
    Deserialization(serde_json::Error),
}

/// Add an account to the storage.
///
/// Fails if an account with the given `name` already exists.
/// It can also fail from IO and Serde Json errors.
pub fn add(name: String, data: AccountData) -> Result<(), Error> {
    add_to(&file_path()?, name, data)
}

/// List all the stored accounts.
///
/// It can fail from IO and Serde Json errors.
pub fn list() -> Result<HashMap<String, AccountData>, Error> {
    list_from(&file_path()?)
}

/// Look up a stored account by name.
pub fn get(name: &str) -> Result<AccountData, Error> {
    get_from(&file_path()?, name)
}

fn add_to(path: &Path, name: String, data: AccountData) -> Result<(), Error> {
    let mut accounts = list_from(path)?;
    if accounts.contains_key(&name) {
        return Err(Error::AlreadyExists(name));
    }

    accounts.insert(name, data);
    let new_content = serde_json::to_string(&accounts).map_err(WritingError::Serialization)?;
    std::fs::write(path, new_content.as_bytes()).map_err(WritingError::IO)?;
    Ok(())
}

fn list_from(path: &Path) -> Result<HashMap<String, AccountData>, Error> {
    ensure_exists(path)?;
    let file = File::open(path).map_err(ReadingError::IO)?;
    let accounts: HashMap<String, AccountData> =
        serde_json::from_reader(&file).map_err(ReadingError::Deserialization)?;
    Ok(accounts)
}

fn get_from(path: &Path, name: &str) -> Result<AccountData, Error> {
    let mut accounts = list_from(path)?;
    accounts
        .remove(name)
        .ok_or_else(|| Error::NotFound(name.to_string()))
}

const FILE: &str = "accounts.json";

// Get the path to the accounts file on disk, creating the
// containing directory if needed.
fn file_path() -> Result<PathBuf, Error> {
    let base_dirs = BaseDirs::new().ok_or_else(|| {
        WritingError::IO(IoError::new(
            std::io::ErrorKind::NotFound,
            "no home directory",
        ))
    })?;
    let dir = base_dirs.data_dir().join("trial-registry-cli");
    std::fs::create_dir_all(&dir).map_err(WritingError::IO)?;
    Ok(dir.join(FILE))
}

// If the file does not yet exist, create it and initialize
// it with an empty object so that it can be deserialized
// as an empty HashMap<String, AccountData>.
fn ensure_exists(path: &Path) -> Result<(), Error> {
    if !path.exists() {
        std::fs::write(path, b"{}").map_err(WritingError::IO)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_then_get_returns_the_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE);
        let seed = [7u8; 32];
        add_to(&path, "research-lead".to_string(), AccountData { seed }).unwrap();
        let account = get_from(&path, "research-lead").unwrap();
        assert_eq!(account.seed, seed);
    }

    #[test]
    fn add_refuses_duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE);
        add_to(&path, "lab".to_string(), AccountData { seed: [1; 32] }).unwrap();
        let result = add_to(&path, "lab".to_string(), AccountData { seed: [2; 32] });
        assert!(matches!(result, Err(Error::AlreadyExists(name)) if name == "lab"));
        // The original seed is untouched.
        assert_eq!(get_from(&path, "lab").unwrap().seed, [1; 32]);
    }

    #[test]
    fn get_unknown_name_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE);
        let result = get_from(&path, "nobody");
        assert!(matches!(result, Err(Error::NotFound(name)) if name == "nobody"));
    }

    #[test]
    fn storage_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE);
        assert!(list_from(&path).unwrap().is_empty());
    }
}
