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

//! Client for the content-addressed store holding trial payloads.
//!
//! The ledger only records a [ContentHash] per trial; the bytes behind it
//! live in an external store with an IPFS-style HTTP API. [ContentStore::add]
//! uploads a payload and returns the hash to put on the ledger,
//! [ContentStore::cat] resolves a hash back to bytes.
//!
//! There is no retry policy here; callers decide how to handle an
//! unavailable store.

use std::time::Duration;

use trial_registry_core::ContentHash;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Error returned by [ContentStore] operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store could not be reached or failed to serve the request.
    #[error("content store unavailable: {reason}")]
    Unavailable { reason: String },

    /// The store holds no content under the hash.
    #[error("no content stored under hash {0:?}")]
    NotFound(ContentHash),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Unavailable {
            reason: error.to_string(),
        }
    }
}

/// HTTP client for a content store endpoint.
#[derive(Clone)]
pub struct ContentStore {
    http: reqwest::Client,
    base_url: url::Url,
}

impl ContentStore {
    /// Create a client for the store at `base_url`, for example
    /// `http://127.0.0.1:5001`.
    pub fn new(base_url: url::Url) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(ContentStore { http, base_url })
    }

    /// Upload a payload and return the hash under which the store serves it.
    pub async fn add(&self, bytes: Vec<u8>) -> Result<ContentHash, Error> {
        let size = bytes.len();
        let part = reqwest::multipart::Part::bytes(bytes).file_name("payload");
        let form = reqwest::multipart::Form::new().part("file", part);

        let response: AddResponse = self
            .http
            .post(self.endpoint("api/v0/add")?)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let hash = ContentHash::from_string(response.hash).map_err(|error| Error::Unavailable {
            reason: format!("store returned an unusable hash: {}", error),
        })?;
        log::debug!("stored {} bytes under {}", size, hash);
        Ok(hash)
    }

    /// Fetch the payload stored under `hash`.
    ///
    /// The empty hash means a trial carries no payload; it is answered with
    /// [Error::NotFound] without asking the store.
    pub async fn cat(&self, hash: &ContentHash) -> Result<Vec<u8>, Error> {
        if hash.is_empty() {
            return Err(Error::NotFound(hash.clone()));
        }

        let mut url = self.endpoint("api/v0/cat")?;
        url.query_pairs_mut().append_pair("arg", hash.as_str());

        let response = self.http.post(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(hash.clone()));
        }
        let bytes = response.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }

    fn endpoint(&self, path: &str) -> Result<url::Url, Error> {
        self.base_url.join(path).map_err(|error| Error::Unavailable {
            reason: format!("invalid store endpoint: {}", error),
        })
    }
}

#[derive(serde::Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

#[cfg(test)]
mod test {
    use super::*;

    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Multipart, Query, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};

    type Blobs = Arc<Mutex<HashMap<String, Vec<u8>>>>;

    async fn add_handler(State(blobs): State<Blobs>, mut multipart: Multipart) -> Json<serde_json::Value> {
        let field = multipart.next_field().await.unwrap().unwrap();
        let data = field.bytes().await.unwrap().to_vec();
        let hash = format!("Qm{}", hex::encode(blake3::hash(&data).as_bytes()));
        blobs.lock().unwrap().insert(hash.clone(), data);
        Json(serde_json::json!({ "Hash": hash }))
    }

    async fn cat_handler(
        State(blobs): State<Blobs>,
        Query(params): Query<HashMap<String, String>>,
    ) -> axum::response::Response {
        let arg = params.get("arg").cloned().unwrap_or_default();
        match blobs.lock().unwrap().get(&arg) {
            Some(bytes) => bytes.clone().into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn spawn_stub_store() -> SocketAddr {
        let blobs: Blobs = Arc::new(Mutex::new(HashMap::new()));
        let router = Router::new()
            .route("/api/v0/add", post(add_handler))
            .route("/api/v0/cat", post(cat_handler))
            .with_state(blobs);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn store_at(addr: SocketAddr) -> ContentStore {
        ContentStore::new(format!("http://{}", addr).parse().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn add_then_cat_round_trip() {
        let store = store_at(spawn_stub_store().await);
        let payload = b"patient_id,visit,value\nP-1,1,7.3\n".to_vec();

        let hash = store.add(payload.clone()).await.unwrap();
        assert!(!hash.is_empty());

        let fetched = store.cat(&hash).await.unwrap();
        assert_eq!(fetched, payload);
    }

    #[tokio::test]
    async fn cat_unknown_hash_is_not_found() {
        let store = store_at(spawn_stub_store().await);
        let hash = ContentHash::from_string("QmUnknown".to_string()).unwrap();
        let error = store.cat(&hash).await.unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn cat_empty_hash_never_hits_the_network() {
        // An unroutable endpoint; reaching it would fail with Unavailable.
        let store = ContentStore::new("http://127.0.0.1:1".parse().unwrap()).unwrap();
        let error = store.cat(&ContentHash::empty()).await.unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn unreachable_store_is_unavailable() {
        let store = ContentStore::new("http://127.0.0.1:1".parse().unwrap()).unwrap();
        let hash = ContentHash::from_string("QmSomething".to_string()).unwrap();
        let error = store.cat(&hash).await.unwrap_err();
        assert!(matches!(error, Error::Unavailable { .. }));

        let error = store.add(b"payload".to_vec()).await.unwrap_err();
        assert!(matches!(error, Error::Unavailable { .. }));
    }
}
