//! Confidential transfer backend port
//!
//! The backend owns the cryptography (balance encryption, proofs) and the
//! contract calls. The core only validates, gates and normalizes around it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{
    Address, Amount, ConfidentialKeys, ConfidentialPrivateKey, FeeOptions, RawAmount, Signer,
    TxReceipt,
};

/// Network parameters a backend is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendParams {
    pub rpc_url: String,
    pub chain_id: u64,
    /// Settlement contract; `None` when the backend resolves it from the chain id
    pub contract_address: Option<Address>,
}

#[async_trait]
pub trait ConfidentialBackend: Send + Sync {
    /// Derive confidential keys for the signer and register the public key
    async fn ensure_account(&self, signer: &Signer) -> Result<ConfidentialKeys>;

    async fn confidential_deposit(
        &self,
        signer: &Signer,
        token: &Address,
        amount: &Amount,
    ) -> Result<TxReceipt>;

    async fn confidential_transfer(
        &self,
        signer: &Signer,
        recipient: &Address,
        token: &Address,
        amount: &Amount,
    ) -> Result<TxReceipt>;

    async fn withdraw(&self, signer: &Signer, token: &Address, amount: &Amount)
        -> Result<TxReceipt>;

    /// Decrypt the confidential balance of `address`
    async fn get_confidential_balance(
        &self,
        address: &Address,
        private_key: &ConfidentialPrivateKey,
        token: &Address,
    ) -> Result<RawAmount>;

    async fn get_public_balance(&self, address: &Address, token: &Address) -> Result<RawAmount>;

    /// Fee estimate in the fee token's base units
    ///
    /// `Ok(None)` means the backend cannot estimate.
    async fn estimate_fee(&self, _address: &Address, _options: &FeeOptions) -> Result<Option<Amount>> {
        Ok(None)
    }
}

/// Builds backends bound to a network
pub trait BackendFactory: Send + Sync {
    /// Backend name as used in settings (e.g., "demo")
    fn name(&self) -> &str;

    fn create(&self, params: &BackendParams) -> Result<Arc<dyn ConfidentialBackend>>;
}
