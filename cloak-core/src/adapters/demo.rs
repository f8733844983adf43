//! Demo confidential backend
//!
//! An in-memory stand-in for a real confidential-transfer client. It keeps
//! the observable contract of one (registration, masked balances that need
//! the confidential private key to read, transaction hashes, insufficient
//! funds failures) without any actual encryption or proofs. Nothing here is
//! secure; it exists for the CLI demo and for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::result::{Error, Result};
use crate::domain::{
    Address, Amount, ConfidentialKeys, ConfidentialPrivateKey, FeeOptions, RawAmount, Signer,
    TxReceipt,
};
use crate::ports::{BackendFactory, BackendParams, ConfidentialBackend};

const DOMAIN_SECRET: &[u8] = b"cloak-demo/secret";
const DOMAIN_PUBLIC: &[u8] = b"cloak-demo/public";
const DOMAIN_MASK: &[u8] = b"cloak-demo/mask";
const DOMAIN_TX: &[u8] = b"cloak-demo/tx";

#[derive(Debug, Clone)]
struct Registration {
    public_key: String,
    count: u32,
}

#[derive(Debug, Default)]
struct LedgerState {
    /// (owner, token) -> public balance
    public: HashMap<(String, String), Amount>,
    /// owner -> registered confidential key
    registrations: HashMap<String, Registration>,
    /// (public key, token) -> masked uint256 balance
    confidential: HashMap<(String, String), [u8; 32]>,
    nonce: u64,
}

/// Shared simulated chain state
///
/// One ledger can back several backends so accounts can transact with each
/// other.
#[derive(Debug, Default)]
pub struct DemoLedger {
    state: Mutex<LedgerState>,
    faucet: Option<Amount>,
    flat_fee: Option<Amount>,
}

impl DemoLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Public balance every unseen (owner, token) pair starts with
    pub fn with_faucet(mut self, amount: Amount) -> Self {
        self.faucet = Some(amount);
        self
    }

    /// Fee returned by `estimate_fee`; without it estimates are unavailable
    pub fn with_flat_fee(mut self, fee: Amount) -> Self {
        self.flat_fee = Some(fee);
        self
    }

    /// Credit public holdings
    pub fn mint(&self, owner: &Address, token: &Address, amount: Amount) -> Result<()> {
        let mut state = self.lock()?;
        let key = (owner.normalized(), token.normalized());
        let current = self.public_balance(&state, &key);
        state.public.insert(key, current.checked_add(&amount));
        Ok(())
    }

    /// How many times `owner` has registered
    pub fn registration_count(&self, owner: &Address) -> Result<u32> {
        Ok(self
            .lock()?
            .registrations
            .get(&owner.normalized())
            .map(|r| r.count)
            .unwrap_or(0))
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerState>> {
        self.state
            .lock()
            .map_err(|_| Error::backend("Demo ledger lock poisoned"))
    }

    fn public_balance(&self, state: &LedgerState, key: &(String, String)) -> Amount {
        state
            .public
            .get(key)
            .cloned()
            .or_else(|| self.faucet.clone())
            .unwrap_or_default()
    }

    fn next_hash(state: &mut LedgerState, chain_id: u64) -> String {
        state.nonce += 1;
        let digest = Sha256::new()
            .chain_update(DOMAIN_TX)
            .chain_update(chain_id.to_be_bytes())
            .chain_update(state.nonce.to_be_bytes())
            .finalize();
        format!("0x{}", hex::encode(digest))
    }
}

fn derive_secret(signing_key_hex: &str, owner: &Address, chain_id: u64) -> String {
    let digest = Sha256::new()
        .chain_update(DOMAIN_SECRET)
        .chain_update(signing_key_hex.as_bytes())
        .chain_update(owner.normalized().as_bytes())
        .chain_update(chain_id.to_be_bytes())
        .finalize();
    format!("0x{}", hex::encode(digest))
}

fn derive_public(secret: &str) -> String {
    let digest = Sha256::new()
        .chain_update(DOMAIN_PUBLIC)
        .chain_update(secret.as_bytes())
        .finalize();
    format!("0x{}", hex::encode(digest))
}

fn keystream(public_key: &str, token: &str) -> [u8; 32] {
    Sha256::new()
        .chain_update(DOMAIN_MASK)
        .chain_update(public_key.as_bytes())
        .chain_update(token.as_bytes())
        .finalize()
        .into()
}

fn mask(word: [u8; 32], public_key: &str, token: &str) -> [u8; 32] {
    let stream = keystream(public_key, token);
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = word[i] ^ stream[i];
    }
    out
}

fn to_word(amount: &Amount) -> Result<[u8; 32]> {
    amount
        .to_be_bytes32()
        .ok_or_else(|| Error::backend("Amount does not fit in uint256"))
}

fn read_confidential(state: &LedgerState, public_key: &str, token: &str) -> Amount {
    match state
        .confidential
        .get(&(public_key.to_string(), token.to_string()))
    {
        Some(masked) => {
            let word = mask(*masked, public_key, token);
            Amount::from(num_bigint::BigUint::from_bytes_be(&word))
        }
        None => Amount::zero(),
    }
}

fn seal_confidential(public_key: &str, token: &str, amount: &Amount) -> Result<[u8; 32]> {
    Ok(mask(to_word(amount)?, public_key, token))
}

fn store_confidential(state: &mut LedgerState, public_key: &str, token: &str, sealed: [u8; 32]) {
    state
        .confidential
        .insert((public_key.to_string(), token.to_string()), sealed);
}

fn registered_key(state: &LedgerState, owner: &Address) -> Result<String> {
    state
        .registrations
        .get(&owner.normalized())
        .map(|r| r.public_key.clone())
        .ok_or_else(|| {
            Error::backend(format!(
                "Account {} is not registered with the settlement contract",
                owner
            ))
        })
}

/// Demo backend bound to one network
pub struct DemoBackend {
    ledger: Arc<DemoLedger>,
    params: BackendParams,
}

impl DemoBackend {
    pub fn new(ledger: Arc<DemoLedger>, params: BackendParams) -> Self {
        Self { ledger, params }
    }

    pub fn ledger(&self) -> &Arc<DemoLedger> {
        &self.ledger
    }
}

#[async_trait]
impl ConfidentialBackend for DemoBackend {
    async fn ensure_account(&self, signer: &Signer) -> Result<ConfidentialKeys> {
        let secret = derive_secret(signer.private_key_hex(), signer.address(), self.params.chain_id);
        let public = derive_public(&secret);

        let mut state = self.ledger.lock()?;
        let entry = state
            .registrations
            .entry(signer.address().normalized())
            .or_insert_with(|| Registration {
                public_key: public.clone(),
                count: 0,
            });
        entry.public_key = public.clone();
        entry.count += 1;

        Ok(ConfidentialKeys::new(public, secret))
    }

    async fn confidential_deposit(
        &self,
        signer: &Signer,
        token: &Address,
        amount: &Amount,
    ) -> Result<TxReceipt> {
        let mut state = self.ledger.lock()?;
        let public_key = registered_key(&state, signer.address())?;
        let token_key = token.normalized();

        let public_slot = (signer.address().normalized(), token_key.clone());
        let available = self.ledger.public_balance(&state, &public_slot);
        let remaining = available
            .checked_sub(amount)
            .ok_or_else(|| Error::backend("Insufficient public balance for deposit"))?;

        let confidential = read_confidential(&state, &public_key, &token_key).checked_add(amount);
        let sealed = seal_confidential(&public_key, &token_key, &confidential)?;
        store_confidential(&mut state, &public_key, &token_key, sealed);
        state.public.insert(public_slot, remaining);

        Ok(TxReceipt::new(DemoLedger::next_hash(&mut state, self.params.chain_id)))
    }

    async fn confidential_transfer(
        &self,
        signer: &Signer,
        recipient: &Address,
        token: &Address,
        amount: &Amount,
    ) -> Result<TxReceipt> {
        let mut state = self.ledger.lock()?;
        let sender_key = registered_key(&state, signer.address())?;
        let recipient_key = registered_key(&state, recipient)
            .map_err(|_| Error::backend(format!("Recipient {} has not enabled confidentiality", recipient)))?;
        let token_key = token.normalized();

        let sender_balance = read_confidential(&state, &sender_key, &token_key);
        let sender_after = sender_balance
            .checked_sub(amount)
            .ok_or_else(|| Error::backend("Insufficient confidential balance for transfer"))?;
        let recipient_after = read_confidential(&state, &recipient_key, &token_key).checked_add(amount);

        // Encode both sides before storing either
        let sender_sealed = seal_confidential(&sender_key, &token_key, &sender_after)?;
        let recipient_sealed = seal_confidential(&recipient_key, &token_key, &recipient_after)?;
        store_confidential(&mut state, &sender_key, &token_key, sender_sealed);
        store_confidential(&mut state, &recipient_key, &token_key, recipient_sealed);

        Ok(TxReceipt::new(DemoLedger::next_hash(&mut state, self.params.chain_id)))
    }

    async fn withdraw(&self, signer: &Signer, token: &Address, amount: &Amount) -> Result<TxReceipt> {
        let mut state = self.ledger.lock()?;
        let public_key = registered_key(&state, signer.address())?;
        let token_key = token.normalized();

        let remaining = read_confidential(&state, &public_key, &token_key)
            .checked_sub(amount)
            .ok_or_else(|| Error::backend("Insufficient confidential balance for withdrawal"))?;
        let sealed = seal_confidential(&public_key, &token_key, &remaining)?;
        store_confidential(&mut state, &public_key, &token_key, sealed);

        let public_slot = (signer.address().normalized(), token_key);
        let public = self.ledger.public_balance(&state, &public_slot).checked_add(amount);
        state.public.insert(public_slot, public);

        Ok(TxReceipt::new(DemoLedger::next_hash(&mut state, self.params.chain_id)))
    }

    async fn get_confidential_balance(
        &self,
        address: &Address,
        private_key: &ConfidentialPrivateKey,
        token: &Address,
    ) -> Result<RawAmount> {
        let state = self.ledger.lock()?;
        let registered = registered_key(&state, address)?;
        if derive_public(private_key.expose()) != registered {
            return Err(Error::backend(
                "Confidential key does not match the registered public key",
            ));
        }

        let amount = read_confidential(&state, &registered, &token.normalized());
        Ok(RawAmount::Text(amount.to_string()))
    }

    async fn get_public_balance(&self, address: &Address, token: &Address) -> Result<RawAmount> {
        let state = self.ledger.lock()?;
        let slot = (address.normalized(), token.normalized());
        Ok(self.ledger.public_balance(&state, &slot).into())
    }

    async fn estimate_fee(&self, _address: &Address, _options: &FeeOptions) -> Result<Option<Amount>> {
        Ok(self.ledger.flat_fee.clone())
    }
}

/// Builds demo backends that share one ledger
pub struct DemoBackendFactory {
    ledger: Arc<DemoLedger>,
}

impl DemoBackendFactory {
    pub fn new(ledger: Arc<DemoLedger>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Arc<DemoLedger> {
        &self.ledger
    }
}

impl Default for DemoBackendFactory {
    fn default() -> Self {
        Self::new(Arc::new(DemoLedger::new()))
    }
}

impl BackendFactory for DemoBackendFactory {
    fn name(&self) -> &str {
        "demo"
    }

    fn create(&self, params: &BackendParams) -> Result<Arc<dyn ConfidentialBackend>> {
        Ok(Arc::new(DemoBackend::new(Arc::clone(&self.ledger), params.clone())))
    }
}
