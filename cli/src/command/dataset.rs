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

//! Define the commands supported by the CLI related to raw datasets in the
//! content store.
//!
//! Unlike trial payloads, datasets are arbitrary files; they are moved in
//! and out of the store without being interpreted.

use std::path::PathBuf;

use super::*;

/// Dataset related commands
#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    Upload(Upload),
    Fetch(Fetch),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(self) -> Result<(), CommandError> {
        match self {
            Command::Upload(cmd) => cmd.run().await,
            Command::Fetch(cmd) => cmd.run().await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Upload a dataset file to the content store and print its hash.
pub struct Upload {
    /// Path of the file to upload.
    #[structopt(value_name = "file")]
    file: PathBuf,

    #[structopt(flatten)]
    store_options: StoreOptions,
}

#[async_trait::async_trait]
impl CommandT for Upload {
    async fn run(self) -> Result<(), CommandError> {
        let bytes = std::fs::read(&self.file).map_err(|error| CommandError::FileIo {
            path: self.file.clone(),
            error,
        })?;
        let store = self.store_options.store()?;
        let hash = store.add(bytes).await?;
        println!("Dataset stored under {}.", hash);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Fetch a dataset from the content store by its hash.
pub struct Fetch {
    /// Hash of the dataset to fetch.
    #[structopt(value_name = "hash")]
    hash: ContentHash,

    /// Path of the file to write. Without it the dataset goes to stdout.
    #[structopt(value_name = "file")]
    output: Option<PathBuf>,

    #[structopt(flatten)]
    store_options: StoreOptions,
}

#[async_trait::async_trait]
impl CommandT for Fetch {
    async fn run(self) -> Result<(), CommandError> {
        let store = self.store_options.store()?;
        let bytes = store.cat(&self.hash).await?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, &bytes).map_err(|error| CommandError::FileIo {
                    path: path.clone(),
                    error,
                })?;
                println!("Wrote {} bytes to {}.", bytes.len(), path.display());
            }
            None => print!("{}", String::from_utf8_lossy(&bytes)),
        }
        Ok(())
    }
}
