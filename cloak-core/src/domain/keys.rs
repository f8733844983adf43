//! Confidential key material
//!
//! Distinct from the account's signing key: this pair encrypts and decrypts
//! confidential balances.

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

/// Private half of a confidential key pair; wiped on drop
#[derive(Clone)]
pub struct ConfidentialPrivateKey(Zeroizing<String>);

impl ConfidentialPrivateKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ConfidentialPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfidentialPrivateKey(<redacted>)")
    }
}

impl PartialEq for ConfidentialPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for ConfidentialPrivateKey {}

/// Key pair returned by a successful enablement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidentialKeys {
    pub public_key: String,
    pub private_key: ConfidentialPrivateKey,
}

impl ConfidentialKeys {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: ConfidentialPrivateKey::new(private_key),
        }
    }

    /// Serializable view that includes the private key
    ///
    /// Only for callers that explicitly want to retain the pair.
    pub fn export(&self) -> ExportedKeys<'_> {
        ExportedKeys {
            public_key: &self.public_key,
            private_key: self.private_key.expose(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedKeys<'a> {
    pub public_key: &'a str,
    pub private_key: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_private_key() {
        let keys = ConfidentialKeys::new("pk1", "sk1");
        let rendered = format!("{:?}", keys);
        assert!(rendered.contains("pk1"));
        assert!(!rendered.contains("sk1"));
    }

    #[test]
    fn test_export_uses_camel_case() {
        let keys = ConfidentialKeys::new("pk1", "sk1");
        let json = serde_json::to_value(keys.export()).unwrap();
        assert_eq!(json["publicKey"], "pk1");
        assert_eq!(json["privateKey"], "sk1");
    }
}
