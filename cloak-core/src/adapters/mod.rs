//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest JSON-RPC client for the ChainProvider port
//! - Account capability resolution (signer construction)
//! - In-memory demo ledger for the ConfidentialBackend port

pub mod account;
pub mod demo;
pub mod jsonrpc;

#[cfg(test)]
pub mod rpc_mock;
