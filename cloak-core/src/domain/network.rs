//! Network bindings for the two protocol deployments

use serde::Serialize;

use super::address::Address;
use crate::ports::BackendParams;

/// A deployment shape: what a backend must be told to bind to a network
pub trait ProtocolShape: Send + Sync + 'static {
    /// Short shape name ("contract" or "chain")
    fn shape_name(&self) -> &'static str;

    fn rpc_url(&self) -> &str;

    fn chain_id(&self) -> u64;

    fn backend_params(&self) -> BackendParams;
}

/// Deployment with an explicit settlement contract address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractProtocolConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub contract_address: Address,
}

impl ProtocolShape for ContractProtocolConfig {
    fn shape_name(&self) -> &'static str {
        "contract"
    }

    fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn backend_params(&self) -> BackendParams {
        BackendParams {
            rpc_url: self.rpc_url.clone(),
            chain_id: self.chain_id,
            contract_address: Some(self.contract_address.clone()),
        }
    }
}

/// Deployment whose contract the backend resolves from the chain id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainProtocolConfig {
    pub rpc_url: String,
    pub chain_id: u64,
}

impl ProtocolShape for ChainProtocolConfig {
    fn shape_name(&self) -> &'static str {
        "chain"
    }

    fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn backend_params(&self) -> BackendParams {
        BackendParams {
            rpc_url: self.rpc_url.clone(),
            chain_id: self.chain_id,
            contract_address: None,
        }
    }
}
