//! Service layer - protocol orchestration
//!
//! `ProtocolCore` owns enablement state and precondition checks; the
//! shape-specific protocols and the runtime network handle sit on top.

mod core;
pub mod logging;
mod network;
mod protocol;

pub use self::core::ProtocolCore;
pub use logging::{EntryPoint, EventStats, LogEntry, LogEvent, LoggingService};
pub use network::NetworkProtocol;
pub use protocol::{ChainProtocol, ContractProtocol, Protocol};
