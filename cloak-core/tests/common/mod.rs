//! Shared test doubles for cloak-core integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cloak_core::domain::{
    Account, Address, Amount, ConfidentialKeys, ConfidentialPrivateKey, FeeOptions, RawAmount,
    Signer, SigningAccount, TxReceipt,
};
use cloak_core::ports::ConfidentialBackend;
use cloak_core::Error;

/// One backend invocation, with the arguments that matter for assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    EnsureAccount { signer: Address },
    Deposit { token: Address, amount: Amount },
    Transfer { recipient: Address, token: Address, amount: Amount },
    Withdraw { token: Address, amount: Amount },
    ConfidentialBalance { address: Address, private_key: String, token: Address },
    PublicBalance { address: Address, token: Address },
    EstimateFee { address: Address },
}

/// Backend double that records every call and returns canned results
pub struct RecordingBackend {
    pub calls: Mutex<Vec<Call>>,
    pub keys: ConfidentialKeys,
    pub tx_hash: String,
    pub confidential_balance: RawAmount,
    pub public_balance: RawAmount,
    pub fee: Option<Amount>,
    pub fail_with: Option<String>,
    /// Fails deposit, transfer and withdraw only, like an on-chain revert
    pub revert_with: Option<String>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            keys: ConfidentialKeys::new("pk1", "sk1"),
            tx_hash: "0xdeadbeef".to_string(),
            confidential_balance: RawAmount::Integer(100),
            public_balance: RawAmount::Integer(0),
            fee: None,
            fail_with: None,
            revert_with: None,
        }
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) -> cloak_core::Result<()> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(Error::backend(message.clone())),
            None => Ok(()),
        }
    }

    fn record_mutation(&self, call: Call) -> cloak_core::Result<()> {
        self.record(call)?;
        match &self.revert_with {
            Some(message) => Err(Error::backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ConfidentialBackend for RecordingBackend {
    async fn ensure_account(&self, signer: &Signer) -> cloak_core::Result<ConfidentialKeys> {
        self.record(Call::EnsureAccount {
            signer: signer.address().clone(),
        })?;
        Ok(self.keys.clone())
    }

    async fn confidential_deposit(
        &self,
        _signer: &Signer,
        token: &Address,
        amount: &Amount,
    ) -> cloak_core::Result<TxReceipt> {
        self.record_mutation(Call::Deposit {
            token: token.clone(),
            amount: amount.clone(),
        })?;
        Ok(TxReceipt::new(self.tx_hash.clone()))
    }

    async fn confidential_transfer(
        &self,
        _signer: &Signer,
        recipient: &Address,
        token: &Address,
        amount: &Amount,
    ) -> cloak_core::Result<TxReceipt> {
        self.record_mutation(Call::Transfer {
            recipient: recipient.clone(),
            token: token.clone(),
            amount: amount.clone(),
        })?;
        Ok(TxReceipt::new(self.tx_hash.clone()))
    }

    async fn withdraw(
        &self,
        _signer: &Signer,
        token: &Address,
        amount: &Amount,
    ) -> cloak_core::Result<TxReceipt> {
        self.record_mutation(Call::Withdraw {
            token: token.clone(),
            amount: amount.clone(),
        })?;
        Ok(TxReceipt::new(self.tx_hash.clone()))
    }

    async fn get_confidential_balance(
        &self,
        address: &Address,
        private_key: &ConfidentialPrivateKey,
        token: &Address,
    ) -> cloak_core::Result<RawAmount> {
        self.record(Call::ConfidentialBalance {
            address: address.clone(),
            private_key: private_key.expose().to_string(),
            token: token.clone(),
        })?;
        Ok(self.confidential_balance.clone())
    }

    async fn get_public_balance(
        &self,
        address: &Address,
        token: &Address,
    ) -> cloak_core::Result<RawAmount> {
        self.record(Call::PublicBalance {
            address: address.clone(),
            token: token.clone(),
        })?;
        Ok(self.public_balance.clone())
    }

    async fn estimate_fee(
        &self,
        address: &Address,
        _options: &FeeOptions,
    ) -> cloak_core::Result<Option<Amount>> {
        self.record(Call::EstimateFee {
            address: address.clone(),
        })?;
        Ok(self.fee.clone())
    }
}

pub fn addr(s: &str) -> Address {
    Address::parse(s).expect("valid test address")
}

/// Signing account with a URL provider; nothing is dialed unless a request is sent
///
/// The key bytes are derived from the address so accounts stay distinct.
pub fn signing_account(address: &str) -> Account {
    let address = addr(address);
    let key = address.normalized().into_bytes();
    SigningAccount::new(address, key)
        .expect("non-empty key")
        .with_rpc_url("http://127.0.0.1:8545")
        .into()
}

pub fn read_only_account(address: &str) -> Account {
    Account::read_only(addr(address))
}

pub fn shared(backend: RecordingBackend) -> Arc<RecordingBackend> {
    Arc::new(backend)
}
