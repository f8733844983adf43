//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// Every variant is returned to the caller as-is. The core never logs or
/// recovers from these internally.
#[derive(Error, Debug)]
pub enum Error {
    /// A signing operation needs a provider the account does not have
    #[error("Not connected: {0}")]
    NotConnected(String),

    /// A confidential operation ran before `enable_confidentiality` succeeded
    #[error("Confidentiality is not enabled for this account; call enable_confidentiality first")]
    NotEnabled,

    /// A mutating operation was attempted with a read-only account
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The confidential-transfer backend or the RPC layer failed
    #[error("Backend failure: {0}")]
    Backend(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a not connected error
    pub fn not_connected(msg: impl Into<String>) -> Self {
        Self::NotConnected(msg.into())
    }

    /// Create an unsupported operation error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }

    /// Create a backend failure
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotConnected(_) => "not_connected",
            Self::NotEnabled => "not_enabled",
            Self::UnsupportedOperation(_) => "unsupported_operation",
            Self::Backend(_) => "backend_failure",
            Self::Validation(_) => "validation",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for JSON output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result carrying the error kind in `context.kind`
    pub fn fail(error: &Error) -> Self {
        let mut context = HashMap::new();
        context.insert("kind".to_string(), serde_json::Value::from(error.kind()));
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            context: Some(context),
        }
    }
}
