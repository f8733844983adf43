//! Wallet account capability
//!
//! An account is either read-only (address only) or signing (address plus
//! private key and, optionally, a way to reach the network). Keys are never
//! derived here; the caller hands over key bytes it already holds.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use super::address::Address;
use super::result::{Error, Result};
use crate::ports::ChainProvider;

/// How a signing account reaches the network
#[derive(Clone)]
pub enum ProviderDescriptor {
    /// JSON-RPC endpoint; a connection is built when first needed
    Url(String),
    /// A live provider supplied by the host
    Injected(Arc<dyn ChainProvider>),
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.debug_tuple("Url").field(url).finish(),
            Self::Injected(provider) => f.debug_tuple("Injected").field(&provider.url()).finish(),
        }
    }
}

/// Address-only account; can query but never sign
#[derive(Debug, Clone)]
pub struct ReadOnlyAccount {
    address: Address,
}

impl ReadOnlyAccount {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }
}

/// Account with private key access
pub struct SigningAccount {
    address: Address,
    private_key: Zeroizing<Vec<u8>>,
    provider: Option<ProviderDescriptor>,
}

impl SigningAccount {
    /// Takes ownership of the key bytes; they are wiped when the account drops
    pub fn new(address: Address, private_key: Vec<u8>) -> Result<Self> {
        if private_key.is_empty() {
            return Err(Error::validation("Private key must not be empty"));
        }
        Ok(Self {
            address,
            private_key: Zeroizing::new(private_key),
            provider: None,
        })
    }

    /// Build from a hex-encoded key (with or without `0x`)
    pub fn from_hex_key(address: Address, private_key_hex: &str) -> Result<Self> {
        let digits = private_key_hex.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);
        let bytes = hex::decode(digits)
            .map_err(|_| Error::validation("Private key is not valid hex"))?;
        Self::new(address, bytes)
    }

    pub fn with_provider(mut self, provider: ProviderDescriptor) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_rpc_url(self, url: impl Into<String>) -> Self {
        self.with_provider(ProviderDescriptor::Url(url.into()))
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn provider(&self) -> Option<&ProviderDescriptor> {
        self.provider.as_ref()
    }

    /// Raw key bytes; only the account adapter reads these
    pub(crate) fn private_key_bytes(&self) -> &[u8] {
        &self.private_key
    }
}

impl fmt::Debug for SigningAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningAccount")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .field("provider", &self.provider)
            .finish()
    }
}

#[derive(Debug)]
pub enum Account {
    ReadOnly(ReadOnlyAccount),
    Signing(SigningAccount),
}

impl Account {
    pub fn read_only(address: Address) -> Self {
        Self::ReadOnly(ReadOnlyAccount::new(address))
    }

    pub fn address(&self) -> &Address {
        match self {
            Self::ReadOnly(account) => account.address(),
            Self::Signing(account) => account.address(),
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly(_))
    }

    pub fn as_signing(&self) -> Option<&SigningAccount> {
        match self {
            Self::Signing(account) => Some(account),
            Self::ReadOnly(_) => None,
        }
    }
}

impl From<ReadOnlyAccount> for Account {
    fn from(account: ReadOnlyAccount) -> Self {
        Self::ReadOnly(account)
    }
}

impl From<SigningAccount> for Account {
    fn from(account: SigningAccount) -> Self {
        Self::Signing(account)
    }
}
