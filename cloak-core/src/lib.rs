//! Cloak Core - confidential token operations for wallet accounts
//!
//! This crate follows a hexagonal architecture:
//!
//! - **domain**: Accounts, amounts, keys, requests and results
//! - **ports**: Trait definitions (ConfidentialBackend, ChainProvider, the protocol surfaces)
//! - **services**: Enablement state machine and the per-network protocols
//! - **adapters**: Concrete implementations (JSON-RPC, demo ledger)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use adapters::demo::DemoBackendFactory;
use config::{Config, NetworkSettings, NetworkShape};
use ports::BackendFactory;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult, Result};
pub use domain::{
    Account, Address, Amount, ConfidentialKeys, ReadOnlyAccount, SigningAccount,
};
pub use ports::{ConfidentialProtocol, PublicLedger, TransferQuote};
pub use services::{
    ChainProtocol, ContractProtocol, EntryPoint, LogEvent, LoggingService, NetworkProtocol, Protocol,
};

/// Main context for Cloak operations
///
/// Holds the configuration and the backend factories networks can name.
pub struct CloakContext {
    pub config: Config,
    cloak_dir: PathBuf,
    factories: HashMap<String, Arc<dyn BackendFactory>>,
}

impl CloakContext {
    /// Load configuration from `cloak_dir` and register the built-in demo backend
    pub fn new(cloak_dir: &Path) -> anyhow::Result<Self> {
        let config = Config::load(cloak_dir)?;
        Ok(Self::with_config(cloak_dir, config))
    }

    pub fn with_config(cloak_dir: &Path, config: Config) -> Self {
        let mut context = Self {
            config,
            cloak_dir: cloak_dir.to_path_buf(),
            factories: HashMap::new(),
        };
        context.register_backend(Arc::new(DemoBackendFactory::default()));
        context
    }

    pub fn cloak_dir(&self) -> &Path {
        &self.cloak_dir
    }

    /// Register a backend factory under its name, replacing any previous one
    pub fn register_backend(&mut self, factory: Arc<dyn BackendFactory>) {
        self.factories.insert(factory.name().to_string(), factory);
    }

    pub fn backend_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve a network by name (or the default) and its settings
    pub fn network(&self, name: Option<&str>) -> Result<(String, NetworkSettings)> {
        self.config.network(name)
    }

    /// Bind `account` to a configured network
    pub fn protocol_for(
        &self,
        network: Option<&str>,
        account: impl Into<Account>,
    ) -> Result<NetworkProtocol> {
        let (name, settings) = self.config.network(network)?;
        let factory = self.factories.get(&settings.backend).ok_or_else(|| {
            Error::config(format!(
                "Network '{}' uses unknown backend '{}'",
                name, settings.backend
            ))
        })?;

        Ok(match settings.shape {
            NetworkShape::Contract => NetworkProtocol::Contract(ContractProtocol::connect(
                account,
                settings.contract_config()?,
                factory.as_ref(),
            )?),
            NetworkShape::Chain => NetworkProtocol::Chain(ChainProtocol::connect(
                account,
                settings.chain_config()?,
                factory.as_ref(),
            )?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEMO_CHAIN_NETWORK, DEMO_NETWORK};
    use tempfile::TempDir;

    #[test]
    fn test_protocol_for_builtin_networks() {
        let dir = TempDir::new().unwrap();
        let context = CloakContext::with_config(dir.path(), Config::default());
        let address = Address::parse("0xA11CE").unwrap();

        let contract = context
            .protocol_for(Some(DEMO_NETWORK), Account::read_only(address.clone()))
            .unwrap();
        assert_eq!(contract.shape(), NetworkShape::Contract);

        let chain = context
            .protocol_for(Some(DEMO_CHAIN_NETWORK), Account::read_only(address))
            .unwrap();
        assert_eq!(chain.shape(), NetworkShape::Chain);
        assert_eq!(context.backend_names(), vec!["demo".to_string()]);
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config
            .set_network(
                "custom",
                NetworkSettings {
                    shape: NetworkShape::Chain,
                    rpc_url: "https://rpc.example".to_string(),
                    chain_id: 10,
                    contract_address: None,
                    backend: "zk-real".to_string(),
                },
            )
            .unwrap();
        let context = CloakContext::with_config(dir.path(), config);

        let err = context
            .protocol_for(
                Some("custom"),
                Account::read_only(Address::parse("0x1").unwrap()),
            )
            .err()
            .unwrap();
        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains("zk-real"));
    }
}
