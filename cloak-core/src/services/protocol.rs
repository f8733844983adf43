//! Protocol adapters for the two deployment shapes
//!
//! `Protocol<C>` wraps a [`ProtocolCore`] and a network config. Both shapes
//! share the confidential surface; the public-ledger surface exists only for
//! contract deployments and the transfer quote only for chain deployments.

use std::sync::Arc;

use async_trait::async_trait;

use super::core::ProtocolCore;
use crate::domain::result::{Error, Result};
use crate::domain::{
    Account, Address, Amount, BalanceResult, ChainProtocolConfig, ConfidentialBalanceOptions,
    ConfidentialKeys, ContractProtocolConfig, DepositRequest, EnableOptions, FeeOptions, FeeQuote,
    ProtocolShape, PublicBalanceOptions, TransferRequest, TxReceipt, WithdrawRequest,
};
use crate::ports::{BackendFactory, ConfidentialBackend, ConfidentialProtocol, PublicLedger, TransferQuote};

pub struct Protocol<C: ProtocolShape> {
    config: C,
    core: ProtocolCore,
}

/// Deployment with an explicit contract address, public balance and fees
pub type ContractProtocol = Protocol<ContractProtocolConfig>;

/// Deployment resolved by chain id, with transfer quotes
pub type ChainProtocol = Protocol<ChainProtocolConfig>;

impl<C: ProtocolShape> Protocol<C> {
    /// Bind an account to a network through a backend factory
    pub fn connect(account: impl Into<Account>, config: C, factory: &dyn BackendFactory) -> Result<Self> {
        if config.chain_id() == 0 {
            return Err(Error::config("Chain id must be non-zero"));
        }
        let backend = factory.create(&config.backend_params())?;
        Ok(Self::with_backend(account, config, backend))
    }

    /// Bind with an already constructed backend
    pub fn with_backend(
        account: impl Into<Account>,
        config: C,
        backend: Arc<dyn ConfidentialBackend>,
    ) -> Self {
        Self {
            config,
            core: ProtocolCore::new(Arc::new(account.into()), backend),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn account(&self) -> &Account {
        self.core.account()
    }
}

#[async_trait]
impl<C: ProtocolShape> ConfidentialProtocol for Protocol<C> {
    fn address(&self) -> &Address {
        self.core.address()
    }

    fn is_enabled(&self) -> bool {
        self.core.is_enabled()
    }

    async fn enable_confidentiality(&self, options: EnableOptions) -> Result<ConfidentialKeys> {
        self.core.enable(options).await
    }

    async fn deposit_confidential(&self, request: DepositRequest) -> Result<TxReceipt> {
        self.core.deposit(request).await
    }

    async fn transfer_confidential(&self, request: TransferRequest) -> Result<TxReceipt> {
        self.core.transfer(request).await
    }

    async fn withdraw_confidential(&self, request: WithdrawRequest) -> Result<TxReceipt> {
        self.core.withdraw(request).await
    }

    async fn get_confidential_balance(
        &self,
        options: ConfidentialBalanceOptions,
    ) -> Result<BalanceResult> {
        self.core.confidential_balance(options).await
    }
}

#[async_trait]
impl PublicLedger for ContractProtocol {
    async fn get_public_balance(&self, options: PublicBalanceOptions) -> Result<Amount> {
        self.core.public_balance(options).await
    }

    async fn get_fee(&self, options: FeeOptions) -> Result<FeeQuote> {
        self.core.fee(options).await
    }
}

#[async_trait]
impl TransferQuote for ChainProtocol {
    async fn quote_transfer_confidential(&self, request: TransferRequest) -> Result<FeeQuote> {
        self.core.fee(FeeOptions::from(&request)).await
    }
}
