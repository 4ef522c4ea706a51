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

//! JSON-RPC 2.0 surface of the development node.
//!
//! All methods are served via `POST /`. Binary payloads (SCALE encoded
//! extrinsics, headers, events and storage values) travel as 0x-prefixed hex
//! strings.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use parity_scale_codec::{Decode as _, Encode as _};
use serde_json::json;

use trial_registry_core::Hash;
use trial_registry_runtime::UncheckedExtrinsic;

use crate::service::{Service, TransactionState};

/// Error code the node answers with when a submitted transaction fails the
/// validity check.
pub const INVALID_TRANSACTION_CODE: i64 = 1010;

const METHOD_NOT_FOUND_CODE: i64 = -32601;
const INVALID_PARAMS_CODE: i64 = -32602;

pub fn router(service: Arc<Service>) -> Router {
    Router::new().route("/", post(handle)).with_state(service)
}

#[derive(serde::Deserialize)]
struct RpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: serde_json::Value,
    method: String,
    #[serde(default)]
    params: serde_json::Value,
}

#[derive(serde::Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    id: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, serde::Serialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn invalid_params(message: impl std::fmt::Display) -> Self {
        RpcError {
            code: INVALID_PARAMS_CODE,
            message: message.to_string(),
        }
    }
}

async fn handle(
    State(service): State<Arc<Service>>,
    Json(request): Json<RpcRequest>,
) -> Json<RpcResponse> {
    let result = dispatch(&service, &request.method, &request.params);
    if let Err(error) = &result {
        log::debug!("{} failed: {}", request.method, error.message);
    }
    let (result, error) = match result {
        Ok(value) => (Some(value), None),
        Err(error) => (None, Some(error)),
    };
    Json(RpcResponse {
        jsonrpc: "2.0",
        id: request.id,
        result,
        error,
    })
}

fn dispatch(
    service: &Service,
    method: &str,
    params: &serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    match method {
        "author_submitExtrinsic" => author_submit_extrinsic(service, params),
        "chain_transactionStatus" => chain_transaction_status(service, params),
        "chain_genesisHash" => Ok(json!(service.genesis_hash().to_string())),
        "chain_header" => chain_header(service, params),
        "state_getStorage" => state_get_storage(service, params),
        "state_getKeys" => state_get_keys(service, params),
        "system_version" => {
            let version = trial_registry_runtime::version();
            Ok(json!({
                "spec_name": version.spec_name,
                "spec_version": version.spec_version,
            }))
        }
        _ => Err(RpcError {
            code: METHOD_NOT_FOUND_CODE,
            message: format!("method {:?} not found", method),
        }),
    }
}

fn author_submit_extrinsic(
    service: &Service,
    params: &serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let bytes = parse_hex(&single_string_param(params)?)?;
    let xt = UncheckedExtrinsic::decode(&mut &bytes[..])
        .map_err(|error| RpcError::invalid_params(format!("undecodable extrinsic: {}", error)))?;
    let tx_hash = service.submit(xt).map_err(|reason| RpcError {
        code: INVALID_TRANSACTION_CODE,
        message: reason.to_string(),
    })?;
    Ok(json!(tx_hash.to_string()))
}

fn chain_transaction_status(
    service: &Service,
    params: &serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let tx_hash = parse_hash(&single_string_param(params)?)?;
    let status = match service.transaction_state(tx_hash) {
        TransactionState::Unknown => json!({ "status": "unknown" }),
        TransactionState::Pending => json!({ "status": "pending" }),
        TransactionState::Included { block, events } => json!({
            "status": "included",
            "block": block.to_string(),
            "events": to_hex(&events.encode()),
        }),
        TransactionState::Invalid { reason } => json!({
            "status": "invalid",
            "reason": reason,
        }),
    };
    Ok(status)
}

fn chain_header(
    service: &Service,
    params: &serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    match params.as_array().map(Vec::as_slice) {
        None | Some([]) => Ok(json!(to_hex(&service.tip_header().encode()))),
        Some([serde_json::Value::String(hash)]) => {
            let header = service.header(parse_hash(hash)?);
            Ok(match header {
                Some(header) => json!(to_hex(&header.encode())),
                None => serde_json::Value::Null,
            })
        }
        _ => Err(RpcError::invalid_params(
            "expected no parameters or a single block hash",
        )),
    }
}

fn state_get_storage(
    service: &Service,
    params: &serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let key = parse_hex(&single_string_param(params)?)?;
    Ok(match service.fetch(&key) {
        Some(value) => json!(to_hex(&value)),
        None => serde_json::Value::Null,
    })
}

fn state_get_keys(
    service: &Service,
    params: &serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let prefix = parse_hex(&single_string_param(params)?)?;
    let keys: Vec<String> = service
        .fetch_keys(&prefix)
        .iter()
        .map(|key| to_hex(key))
        .collect();
    Ok(json!(keys))
}

fn single_string_param(params: &serde_json::Value) -> Result<String, RpcError> {
    match params.as_array().map(Vec::as_slice) {
        Some([serde_json::Value::String(value)]) => Ok(value.clone()),
        _ => Err(RpcError::invalid_params(
            "expected a single string parameter",
        )),
    }
}

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn parse_hex(value: &str) -> Result<Vec<u8>, RpcError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(stripped).map_err(RpcError::invalid_params)
}

fn parse_hash(value: &str) -> Result<Hash, RpcError> {
    value.parse().map_err(RpcError::invalid_params)
}
