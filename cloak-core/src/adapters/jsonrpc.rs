//! JSON-RPC 2.0 provider over HTTP
//!
//! Just enough of a chain client to bind a provider from an RPC URL: one
//! request/response round trip per call, no batching, no retries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};
use crate::ports::ChainProvider;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: JsonValue,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<JsonValue>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// HTTP JSON-RPC provider
#[derive(Debug)]
pub struct JsonRpcProvider {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcProvider {
    /// Bind to an RPC endpoint; no request is made until first use
    pub fn new(url: &str) -> Result<Self> {
        let parsed = url::Url::parse(url)
            .map_err(|e| Error::not_connected(format!("Invalid RPC URL {:?}: {}", url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::not_connected(format!(
                "RPC URL must use http or https, got {:?}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::not_connected(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::backend(format!(
                "RPC request timed out after {} seconds",
                REQUEST_TIMEOUT_SECS
            ))
        } else if error.is_connect() {
            Error::backend(format!("Unable to connect to RPC endpoint {}", self.url))
        } else {
            Error::backend(format!("RPC request failed: {}", error))
        }
    }
}

#[async_trait]
impl ChainProvider for JsonRpcProvider {
    fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self, method: &str, params: JsonValue) -> Result<JsonValue> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::backend(format!(
                "RPC endpoint returned HTTP {} for {}",
                status.as_u16(),
                method
            )));
        }

        let parsed: RpcResponse = response
            .json()
            .await
            .map_err(|e| Error::backend(format!("Malformed RPC response for {}: {}", method, e)))?;

        if let Some(err) = parsed.error {
            return Err(Error::backend(format!(
                "RPC error {} from {}: {}",
                err.code, method, err.message
            )));
        }

        parsed
            .result
            .ok_or_else(|| Error::backend(format!("RPC response for {} has no result", method)))
    }
}
