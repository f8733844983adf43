//! Configuration management
//!
//! Reads `settings.json` from the cloak directory:
//! ```json
//! {
//!   "app": { "defaultNetwork": "demo" },
//!   "networks": {
//!     "sepolia": { "shape": "chain", "rpcUrl": "https://...", "chainId": 11155111, "backend": "demo" }
//!   }
//! }
//! ```
//! Fields the CLI does not manage are preserved on save.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::result::Error;
use crate::domain::{Address, ChainProtocolConfig, ContractProtocolConfig};

pub const DEMO_NETWORK: &str = "demo";
pub const DEMO_CHAIN_NETWORK: &str = "demo-chain";
const DEMO_RPC_URL: &str = "http://127.0.0.1:8545";
const DEMO_CHAIN_ID: u64 = 31337;
const DEMO_CONTRACT: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(default)]
    networks: BTreeMap<String, NetworkSettings>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_network: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Which protocol deployment a network uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkShape {
    Contract,
    Chain,
}

impl NetworkShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkShape::Contract => "contract",
            NetworkShape::Chain => "chain",
        }
    }
}

/// One configured network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSettings {
    pub shape: NetworkShape,
    pub rpc_url: String,
    pub chain_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<Address>,
    #[serde(default = "default_backend")]
    pub backend: String,
}

fn default_backend() -> String {
    DEMO_NETWORK.to_string()
}

impl NetworkSettings {
    /// Check URL, chain id and shape-specific fields
    pub fn validate(&self) -> crate::domain::result::Result<()> {
        let parsed = url::Url::parse(&self.rpc_url)
            .map_err(|e| Error::config(format!("Invalid RPC URL '{}': {}", self.rpc_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "RPC URL must use http or https: {}",
                self.rpc_url
            )));
        }
        if self.chain_id == 0 {
            return Err(Error::config("chainId must be non-zero"));
        }
        if self.shape == NetworkShape::Contract && self.contract_address.is_none() {
            return Err(Error::config("Contract networks need a contractAddress"));
        }
        if self.backend.trim().is_empty() {
            return Err(Error::config("backend must not be empty"));
        }
        Ok(())
    }

    pub fn contract_config(&self) -> crate::domain::result::Result<ContractProtocolConfig> {
        self.validate()?;
        let contract_address = self
            .contract_address
            .clone()
            .ok_or_else(|| Error::config("Contract networks need a contractAddress"))?;
        Ok(ContractProtocolConfig {
            rpc_url: self.rpc_url.clone(),
            chain_id: self.chain_id,
            contract_address,
        })
    }

    pub fn chain_config(&self) -> crate::domain::result::Result<ChainProtocolConfig> {
        self.validate()?;
        Ok(ChainProtocolConfig {
            rpc_url: self.rpc_url.clone(),
            chain_id: self.chain_id,
        })
    }
}

/// Cloak configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub default_network: String,
    pub networks: BTreeMap<String, NetworkSettings>,
    /// Default as stored on disk; `CLOAK_NETWORK` never reaches it
    saved_default_network: Option<String>,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_settings(SettingsFile::default(), None)
    }
}

impl Config {
    /// Load config from the cloak directory
    ///
    /// The default network can be overridden with `CLOAK_NETWORK`.
    pub fn load(cloak_dir: &Path) -> Result<Self> {
        let network_override = std::env::var("CLOAK_NETWORK")
            .ok()
            .filter(|v| !v.trim().is_empty());
        Self::load_with_override(cloak_dir, network_override)
    }

    pub fn load_with_override(cloak_dir: &Path, network_override: Option<String>) -> Result<Self> {
        let settings_path = cloak_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid {}: {}", settings_path.display(), e)))?
        } else {
            SettingsFile::default()
        };

        Ok(Self::from_settings(raw, network_override))
    }

    fn from_settings(raw: SettingsFile, network_override: Option<String>) -> Self {
        let mut networks = builtin_networks();
        networks.extend(raw.networks.clone());

        let default_network = network_override
            .or_else(|| raw.app.default_network.clone())
            .unwrap_or_else(|| DEMO_NETWORK.to_string());

        Self {
            default_network,
            networks,
            saved_default_network: raw.app.default_network.clone(),
            _raw_settings: raw,
        }
    }

    /// Save config to the cloak directory
    /// Built-in networks are only written once they have been customized
    pub fn save(&self, cloak_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(cloak_dir)?;
        let settings_path = cloak_dir.join("settings.json");

        // Load existing settings to preserve fields we don't manage
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            self._raw_settings.clone()
        };

        let builtins = builtin_networks();
        settings.app.default_network = self.saved_default_network.clone();
        settings.networks = self
            .networks
            .iter()
            .filter(|(name, network)| builtins.get(*name) != Some(*network))
            .map(|(name, network)| (name.clone(), network.clone()))
            .collect();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }

    /// Look up a network, falling back to the default when `name` is None
    pub fn network(&self, name: Option<&str>) -> crate::domain::result::Result<(String, NetworkSettings)> {
        let name = name.unwrap_or(&self.default_network);
        self.networks
            .get(name)
            .map(|n| (name.to_string(), n.clone()))
            .ok_or_else(|| Error::config(format!("Unknown network '{}'", name)))
    }

    /// Change the default network; it must exist
    pub fn set_default_network(&mut self, name: &str) -> crate::domain::result::Result<()> {
        if !self.networks.contains_key(name) {
            return Err(Error::config(format!("Unknown network '{}'", name)));
        }
        self.default_network = name.to_string();
        self.saved_default_network = Some(name.to_string());
        Ok(())
    }

    /// Add or replace a network after validating it
    pub fn set_network(
        &mut self,
        name: &str,
        network: NetworkSettings,
    ) -> crate::domain::result::Result<()> {
        network.validate()?;
        self.networks.insert(name.to_string(), network);
        Ok(())
    }
}

fn builtin_networks() -> BTreeMap<String, NetworkSettings> {
    let mut networks = BTreeMap::new();
    networks.insert(
        DEMO_NETWORK.to_string(),
        NetworkSettings {
            shape: NetworkShape::Contract,
            rpc_url: DEMO_RPC_URL.to_string(),
            chain_id: DEMO_CHAIN_ID,
            contract_address: Address::parse(DEMO_CONTRACT).ok(),
            backend: DEMO_NETWORK.to_string(),
        },
    );
    networks.insert(
        DEMO_CHAIN_NETWORK.to_string(),
        NetworkSettings {
            shape: NetworkShape::Chain,
            rpc_url: DEMO_RPC_URL.to_string(),
            chain_id: DEMO_CHAIN_ID,
            contract_address: None,
            backend: DEMO_NETWORK.to_string(),
        },
    );
    networks
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_include_demo_networks() {
        let config = Config::default();
        assert_eq!(config.default_network, DEMO_NETWORK);
        let (_, demo) = config.network(None).unwrap();
        assert_eq!(demo.shape, NetworkShape::Contract);
        assert!(demo.contract_config().is_ok());
        let (_, chain) = config.network(Some(DEMO_CHAIN_NETWORK)).unwrap();
        assert!(chain.chain_config().is_ok());
    }

    #[test]
    fn test_load_parses_networks_and_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{
                "app": { "defaultNetwork": "sepolia", "theme": "dark" },
                "networks": {
                    "sepolia": { "shape": "chain", "rpcUrl": "https://rpc.example", "chainId": 11155111 }
                }
            }"#,
        )
        .unwrap();

        let config = Config::load_with_override(dir.path(), None).unwrap();
        let (name, sepolia) = config.network(None).unwrap();
        assert_eq!(name, "sepolia");
        assert_eq!(sepolia.backend, "demo");
        assert_eq!(sepolia.chain_config().unwrap().chain_id, 11155111);

        let overridden =
            Config::load_with_override(dir.path(), Some(DEMO_NETWORK.to_string())).unwrap();
        assert_eq!(overridden.default_network, DEMO_NETWORK);
    }

    #[test]
    fn test_save_preserves_unknown_fields() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "app": { "theme": "dark" }, "wallets": ["a"] }"#,
        )
        .unwrap();

        let mut config = Config::load_with_override(dir.path(), None).unwrap();
        config.set_default_network(DEMO_CHAIN_NETWORK).unwrap();
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("settings.json")).unwrap())
                .unwrap();
        assert_eq!(saved["app"]["theme"], "dark");
        assert_eq!(saved["app"]["defaultNetwork"], DEMO_CHAIN_NETWORK);
        assert_eq!(saved["wallets"][0], "a");
        assert!(saved["networks"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_save_keeps_stored_default_under_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "app": { "defaultNetwork": "demo" } }"#,
        )
        .unwrap();

        let mut config =
            Config::load_with_override(dir.path(), Some(DEMO_CHAIN_NETWORK.to_string())).unwrap();
        assert_eq!(config.default_network, DEMO_CHAIN_NETWORK);
        config
            .set_network(
                "extra",
                NetworkSettings {
                    shape: NetworkShape::Chain,
                    rpc_url: "https://rpc.example".to_string(),
                    chain_id: 10,
                    contract_address: None,
                    backend: "demo".to_string(),
                },
            )
            .unwrap();
        config.save(dir.path()).unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("settings.json")).unwrap())
                .unwrap();
        assert_eq!(saved["app"]["defaultNetwork"], DEMO_NETWORK);
        assert_eq!(saved["networks"]["extra"]["chainId"], 10);

        let reloaded = Config::load_with_override(dir.path(), None).unwrap();
        assert_eq!(reloaded.default_network, DEMO_NETWORK);
    }

    #[test]
    fn test_validation_errors() {
        let mut network = NetworkSettings {
            shape: NetworkShape::Contract,
            rpc_url: "ftp://x".to_string(),
            chain_id: 1,
            contract_address: None,
            backend: "demo".to_string(),
        };
        assert_eq!(network.validate().unwrap_err().kind(), "config");

        network.rpc_url = "http://localhost:8545".to_string();
        assert!(network.contract_config().is_err());

        network.contract_address = Some(Address::parse("0xC0FFEE").unwrap());
        assert!(network.contract_config().is_ok());

        network.chain_id = 0;
        assert!(network.validate().is_err());
    }

    #[test]
    fn test_unknown_network() {
        let mut config = Config::default();
        assert!(config.network(Some("mainnet")).is_err());
        assert!(config.set_default_network("mainnet").is_err());
    }
}
