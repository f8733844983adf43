//! Chain provider port
//!
//! A live connection to a chain node. Built from an RPC URL by the JSON-RPC
//! adapter, or injected by the host application (wallet extensions, embedded
//! nodes, test doubles).

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};

#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Endpoint description, for diagnostics only
    fn url(&self) -> &str;

    /// Issue one JSON-RPC request and return its `result` member
    async fn request(&self, method: &str, params: JsonValue) -> Result<JsonValue>;

    /// Chain id reported by the node (`eth_chainId`)
    async fn chain_id(&self) -> Result<u64> {
        let value = self.request("eth_chainId", JsonValue::Array(Vec::new())).await?;
        parse_quantity(&value)
    }
}

/// Parse a JSON-RPC quantity (`"0x1a"`) or a plain number
pub fn parse_quantity(value: &JsonValue) -> Result<u64> {
    match value {
        JsonValue::String(s) => {
            let digits = s
                .strip_prefix("0x")
                .ok_or_else(|| Error::backend(format!("Expected hex quantity, got {:?}", s)))?;
            u64::from_str_radix(digits, 16)
                .map_err(|e| Error::backend(format!("Invalid hex quantity {:?}: {}", s, e)))
        }
        JsonValue::Number(n) => n
            .as_u64()
            .ok_or_else(|| Error::backend(format!("Invalid quantity: {}", n))),
        other => Err(Error::backend(format!("Invalid quantity: {}", other))),
    }
}
