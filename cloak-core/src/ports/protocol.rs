//! Operation sets exposed to callers
//!
//! Every network type implements `ConfidentialProtocol`. On top of that a
//! network offers exactly one of `PublicLedger` (contract-addressed
//! deployments) or `TransferQuote` (chain-resolved deployments).

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::{
    Address, Amount, BalanceResult, ConfidentialBalanceOptions, ConfidentialKeys, DepositRequest,
    EnableOptions, FeeOptions, FeeQuote, PublicBalanceOptions, TransferRequest, TxReceipt,
    WithdrawRequest,
};

#[async_trait]
pub trait ConfidentialProtocol: Send + Sync {
    /// Address of the bound account
    fn address(&self) -> &Address;

    /// Whether confidential keys are currently held
    fn is_enabled(&self) -> bool;

    async fn enable_confidentiality(&self, options: EnableOptions) -> Result<ConfidentialKeys>;

    async fn deposit_confidential(&self, request: DepositRequest) -> Result<TxReceipt>;

    async fn transfer_confidential(&self, request: TransferRequest) -> Result<TxReceipt>;

    async fn withdraw_confidential(&self, request: WithdrawRequest) -> Result<TxReceipt>;

    async fn get_confidential_balance(
        &self,
        options: ConfidentialBalanceOptions,
    ) -> Result<BalanceResult>;
}

/// Public-ledger queries, offered by contract-addressed deployments
#[async_trait]
pub trait PublicLedger: Send + Sync {
    async fn get_public_balance(&self, options: PublicBalanceOptions) -> Result<Amount>;

    async fn get_fee(&self, options: FeeOptions) -> Result<FeeQuote>;
}

/// Transfer cost quotes, offered by chain-resolved deployments
#[async_trait]
pub trait TransferQuote: Send + Sync {
    async fn quote_transfer_confidential(&self, request: TransferRequest) -> Result<FeeQuote>;
}
