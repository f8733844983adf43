//! Chain-capable signer handed to backends for one operation

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use super::address::Address;
use crate::ports::ChainProvider;

/// Address, hex private key and live provider
///
/// Built right before a backend call and dropped right after; the hex key
/// buffer is wiped on drop.
pub struct Signer {
    address: Address,
    private_key_hex: Zeroizing<String>,
    provider: Arc<dyn ChainProvider>,
}

impl Signer {
    pub(crate) fn new(
        address: Address,
        private_key_hex: Zeroizing<String>,
        provider: Arc<dyn ChainProvider>,
    ) -> Self {
        Self {
            address,
            private_key_hex,
            provider,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// `0x`-prefixed lowercase hex of the signing key
    pub fn private_key_hex(&self) -> &str {
        &self.private_key_hex
    }

    pub fn provider(&self) -> &Arc<dyn ChainProvider> {
        &self.provider
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address)
            .field("private_key_hex", &"<redacted>")
            .field("provider", &self.provider.url())
            .finish()
    }
}
