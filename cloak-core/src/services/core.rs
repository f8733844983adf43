//! Confidential protocol core - enablement state and operation gating
//!
//! Holds one account, one backend and the confidential keys produced by the
//! last successful enablement. Every mutating operation runs the same checks
//! in the same order before the backend is touched:
//!
//! 1. account mode (read-only accounts get `UnsupportedOperation`)
//! 2. enablement (`NotEnabled` until keys are stored)
//! 3. signer construction (`NotConnected` without a provider)
//!
//! Amounts are passed through untouched; a zero amount is the backend's call.
//!
//! Concurrency: one logical caller per core. The key slot is behind a lock
//! that is never held across an await, and it is written only after the
//! backend has returned keys, so a failed or abandoned enable leaves the
//! previous state untouched. Overlapping enable and transfer calls are not
//! ordered beyond that.

use std::sync::{Arc, PoisonError, RwLock};

use crate::adapters::account::signer_for;
use crate::domain::result::{Error, Result};
use crate::domain::{
    Account, Address, Amount, BalanceResult, ConfidentialBalanceOptions, ConfidentialKeys,
    DepositRequest, EnableOptions, FeeOptions, FeeQuote, OperationKind, PublicBalanceOptions,
    TransferRequest, TxReceipt, WithdrawRequest,
};
use crate::ports::ConfidentialBackend;

pub struct ProtocolCore {
    account: Arc<Account>,
    backend: Arc<dyn ConfidentialBackend>,
    keys: RwLock<Option<ConfidentialKeys>>,
}

impl ProtocolCore {
    pub fn new(account: Arc<Account>, backend: Arc<dyn ConfidentialBackend>) -> Self {
        Self {
            account,
            backend,
            keys: RwLock::new(None),
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn address(&self) -> &Address {
        self.account.address()
    }

    pub fn is_enabled(&self) -> bool {
        self.keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Derive and register confidential keys
    ///
    /// Re-registers on every call unless `options.reuse_existing` is set and
    /// keys are already held.
    pub async fn enable(&self, options: EnableOptions) -> Result<ConfidentialKeys> {
        self.require_signing(OperationKind::Enable)?;

        if options.reuse_existing {
            if let Some(keys) = self.stored_keys() {
                return Ok(keys);
            }
        }

        let keys = {
            let signer = signer_for(&self.account, OperationKind::Enable)?;
            self.backend.ensure_account(&signer).await?
        };

        // Registration has already happened on chain; the error names what it returned
        if keys.public_key.is_empty() || keys.private_key.expose().is_empty() {
            return Err(Error::backend(format!(
                "Account was registered but the backend returned an empty confidential key (public key {:?})",
                keys.public_key
            )));
        }

        *self.keys.write().unwrap_or_else(PoisonError::into_inner) = Some(keys.clone());
        Ok(keys)
    }

    pub async fn deposit(&self, request: DepositRequest) -> Result<TxReceipt> {
        self.gate(OperationKind::Deposit)?;

        let signer = signer_for(&self.account, OperationKind::Deposit)?;
        let receipt = self
            .backend
            .confidential_deposit(&signer, &request.token, &request.amount)
            .await?;
        normalize_receipt(receipt)
    }

    pub async fn transfer(&self, request: TransferRequest) -> Result<TxReceipt> {
        self.gate(OperationKind::Transfer)?;

        let signer = signer_for(&self.account, OperationKind::Transfer)?;
        let receipt = self
            .backend
            .confidential_transfer(&signer, &request.recipient, &request.token, &request.amount)
            .await?;
        normalize_receipt(receipt)
    }

    pub async fn withdraw(&self, request: WithdrawRequest) -> Result<TxReceipt> {
        self.gate(OperationKind::Withdraw)?;

        let signer = signer_for(&self.account, OperationKind::Withdraw)?;
        let receipt = self
            .backend
            .withdraw(&signer, &request.token, &request.amount)
            .await?;
        normalize_receipt(receipt)
    }

    /// Decrypt the confidential balance with the stored private key
    pub async fn confidential_balance(
        &self,
        options: ConfidentialBalanceOptions,
    ) -> Result<BalanceResult> {
        let keys = self.stored_keys().ok_or(Error::NotEnabled)?;
        let raw = self
            .backend
            .get_confidential_balance(self.address(), &keys.private_key, &options.token)
            .await?;
        Ok(BalanceResult {
            amount: Amount::try_from(raw)?,
        })
    }

    /// Public-ledger balance; needs neither keys nor a signer
    pub async fn public_balance(&self, options: PublicBalanceOptions) -> Result<Amount> {
        let raw = self
            .backend
            .get_public_balance(self.address(), &options.token)
            .await?;
        Amount::try_from(raw)
    }

    /// Fee estimate, or an explicitly marked placeholder when unavailable
    pub async fn fee(&self, options: FeeOptions) -> Result<FeeQuote> {
        let estimate = self.backend.estimate_fee(self.address(), &options).await?;
        Ok(match estimate {
            Some(fee) => FeeQuote::estimated(fee),
            None => FeeQuote::placeholder(),
        })
    }

    fn stored_keys(&self) -> Option<ConfidentialKeys> {
        self.keys
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn require_signing(&self, operation: OperationKind) -> Result<()> {
        if self.account.is_read_only() {
            return Err(Error::unsupported(format!(
                "{} requires a signing account; {} is read-only",
                operation,
                self.address()
            )));
        }
        Ok(())
    }

    fn gate(&self, operation: OperationKind) -> Result<()> {
        self.require_signing(operation)?;
        if !self.is_enabled() {
            return Err(Error::NotEnabled);
        }
        Ok(())
    }
}

fn normalize_receipt(receipt: TxReceipt) -> Result<TxReceipt> {
    if receipt.hash.trim().is_empty() {
        return Err(Error::backend("Backend returned an empty transaction hash"));
    }
    Ok(receipt)
}
