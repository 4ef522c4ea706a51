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

//! [backend::Backend] implementation for a remote node reached over HTTP
//! JSON-RPC.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::FutureExt as _;
use parity_scale_codec::{Decode, Encode as _};
use serde::de::DeserializeOwned;

use trial_registry_runtime::RuntimeVersion;

use crate::backend::{self, Backend as _};
use crate::interface::*;

/// How long [RemoteNode::submit] responses wait for a transaction to be
/// included in a block before giving up with [Error::Timeout].
pub const DEFAULT_FINALITY_TIMEOUT: Duration = Duration::from_secs(60);

const POLL_INTERVAL: Duration = Duration::from_millis(300);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct RemoteNode {
    http: reqwest::Client,
    url: url::Url,
    next_request_id: Arc<AtomicU64>,
    genesis_hash: Hash,
    finality_timeout: Duration,
}

impl RemoteNode {
    /// Connect to the node at `url` and fetch the chain identity.
    ///
    /// Fails if the node is unreachable or runs a runtime this client was
    /// not built against.
    pub async fn create(url: url::Url) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let mut node = RemoteNode {
            http,
            url,
            next_request_id: Arc::new(AtomicU64::new(1)),
            genesis_hash: Hash::zero(),
            finality_timeout: DEFAULT_FINALITY_TIMEOUT,
        };

        let genesis_hash: String = node.rpc("chain_genesisHash", serde_json::json!([])).await?;
        node.genesis_hash = parse_hash(&genesis_hash)?;

        let version = node.onchain_runtime_version().await?;
        let ours = trial_registry_runtime::version();
        if version != ours {
            return Err(Error::IncompatibleRuntimeVersion {
                spec_name: version.spec_name,
                spec_version: version.spec_version,
            });
        }
        log::debug!(
            "connected to node {} on chain {}",
            node.url,
            node.genesis_hash
        );
        Ok(node)
    }

    /// Change how long submissions wait for block inclusion.
    pub fn with_finality_timeout(mut self, timeout: Duration) -> Self {
        self.finality_timeout = timeout;
        self
    }

    async fn rpc<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, Error> {
        match self.rpc_raw(method, params).await? {
            Ok(result) => Ok(result),
            Err(error) => Err(Error::Other(format!(
                "node RPC error {}: {}",
                error.code, error.message
            ))),
        }
    }

    /// Perform a JSON-RPC call, separating transport failures (outer [Err])
    /// from errors the node itself reports (inner [Err]).
    async fn rpc_raw<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<Result<T, RpcErrorObject>, Error> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_request_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        let response: RpcResponse<T> = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        match (response.result, response.error) {
            (Some(result), None) => Ok(Ok(result)),
            (None, Some(error)) => Ok(Err(error)),
            _ => Err(Error::Other(format!(
                "malformed JSON-RPC response for method {}",
                method
            ))),
        }
    }

    /// Poll the node until the transaction is included in a block or the
    /// finality timeout elapses.
    async fn wait_for_inclusion(
        &self,
        tx_hash: TxHash,
    ) -> Result<backend::TransactionApplied, Error> {
        let deadline = Instant::now() + self.finality_timeout;
        loop {
            let status: TransactionStatusResponse = self
                .rpc(
                    "chain_transactionStatus",
                    serde_json::json!([tx_hash.to_string()]),
                )
                .await?;
            match status.status.as_str() {
                "included" => {
                    let block = parse_hash(&required_field(status.block, "block")?)?;
                    let events_bytes = parse_hex(&required_field(status.events, "events")?)?;
                    let events = Vec::<Event>::decode(&mut &events_bytes[..])?;
                    return Ok(backend::TransactionApplied {
                        tx_hash,
                        block,
                        events,
                    });
                }
                "invalid" => {
                    return Err(Error::InvalidTransaction {
                        reason: status
                            .reason
                            .unwrap_or_else(|| "no reason given".to_string()),
                    })
                }
                "pending" | "unknown" => {
                    if Instant::now() >= deadline {
                        return Err(Error::Timeout {
                            tx_hash,
                            timeout: self.finality_timeout,
                        });
                    }
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                other => {
                    return Err(Error::Other(format!(
                        "unknown transaction status {:?} for {}",
                        other, tx_hash
                    )))
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl backend::Backend for RemoteNode {
    async fn submit(
        &self,
        xt: backend::UncheckedExtrinsic,
    ) -> Result<Response<backend::TransactionApplied, Error>, Error> {
        let tx_hash = xt.hash();
        let submission: Result<String, RpcErrorObject> = self
            .rpc_raw(
                "author_submitExtrinsic",
                serde_json::json!([to_hex(&xt.encode())]),
            )
            .await?;
        if let Err(error) = submission {
            return Err(Error::InvalidTransaction {
                reason: error.message,
            });
        }

        let this = self.clone();
        Ok(async move { this.wait_for_inclusion(tx_hash).await }.boxed())
    }

    async fn fetch(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        let value: Option<String> = self
            .rpc("state_getStorage", serde_json::json!([to_hex(key)]))
            .await?;
        value.as_deref().map(parse_hex).transpose()
    }

    async fn fetch_keys(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>, Error> {
        let keys: Vec<String> = self
            .rpc("state_getKeys", serde_json::json!([to_hex(prefix)]))
            .await?;
        keys.iter().map(|key| parse_hex(key)).collect()
    }

    async fn block_header_best_chain(&self) -> Result<Header, Error> {
        let header_hex: String = self.rpc("chain_header", serde_json::json!([])).await?;
        let bytes = parse_hex(&header_hex)?;
        Ok(Header::decode(&mut &bytes[..])?)
    }

    async fn onchain_runtime_version(&self) -> Result<RuntimeVersion, Error> {
        let version: RuntimeVersionResponse =
            self.rpc("system_version", serde_json::json!([])).await?;
        Ok(RuntimeVersion {
            spec_name: version.spec_name,
            spec_version: version.spec_version,
        })
    }

    fn genesis_hash(&self) -> Hash {
        self.genesis_hash
    }
}

#[derive(serde::Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(serde::Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(serde::Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(serde::Deserialize)]
struct TransactionStatusResponse {
    status: String,
    block: Option<String>,
    events: Option<String>,
    reason: Option<String>,
}

#[derive(serde::Deserialize)]
struct RuntimeVersionResponse {
    spec_name: String,
    spec_version: u32,
}

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn parse_hex(value: &str) -> Result<Vec<u8>, Error> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(stripped).map_err(|error| Error::Other(format!("invalid hex from node: {}", error)))
}

fn parse_hash(value: &str) -> Result<Hash, Error> {
    value
        .parse()
        .map_err(|error| Error::Other(format!("invalid hash from node: {}", error)))
}

fn required_field(value: Option<String>, name: &str) -> Result<String, Error> {
    value.ok_or_else(|| {
        Error::Other(format!(
            "field {:?} missing from included transaction status",
            name
        ))
    })
}
