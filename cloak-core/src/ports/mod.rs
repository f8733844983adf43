//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core depends
//! only on these traits, not on concrete implementations.

mod backend;
mod protocol;
mod provider;

pub use backend::{BackendFactory, BackendParams, ConfidentialBackend};
pub use protocol::{ConfidentialProtocol, PublicLedger, TransferQuote};
pub use provider::{parse_quantity, ChainProvider};
