//! On-chain addresses (accounts, tokens, contracts)

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use super::result::{Error, Result};

/// `0x` followed by 1 to 64 hex digits: covers 20-byte EVM addresses and
/// 252-bit field-element addresses.
fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^0[xX][0-9a-fA-F]{1,64}$").expect("valid address regex"))
}

/// A validated hex address, kept in the caller's original casing
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !address_pattern().is_match(&value) {
            return Err(Error::validation(format!("Invalid address: {:?}", value)));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, used for comparisons and map keys
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl std::hash::Hash for Address {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized().hash(state)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.trim())
    }
}

impl TryFrom<&str> for Address {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Address::parse(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_short_and_full_width() {
        assert!(Address::parse("0xAAA").is_ok());
        assert!(Address::parse("0x742d35Cc6634C0532925a3b844Bc454e4438f44e").is_ok());
        assert!(Address::parse(format!("0x{}", "f".repeat(64))).is_ok());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Address::parse("").is_err());
        assert!(Address::parse("0x").is_err());
        assert!(Address::parse("742d35").is_err());
        assert!(Address::parse("0xZZ").is_err());
        assert!(Address::parse(format!("0x{}", "f".repeat(65))).is_err());
    }

    #[test]
    fn test_case_insensitive_equality_keeps_original() {
        let upper = Address::parse("0xABCDEF").unwrap();
        let lower = Address::parse("0xabcdef").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.as_str(), "0xABCDEF");
        assert_eq!(upper.normalized(), "0xabcdef");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Address = serde_json::from_str("\"0x1\"").unwrap();
        assert_eq!(ok.as_str(), "0x1");
        assert!(serde_json::from_str::<Address>("\"nope\"").is_err());
    }
}
