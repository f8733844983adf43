//! Token amounts in base units
//!
//! Token base units routinely exceed 2^53, so amounts are arbitrary-precision
//! unsigned integers. Every conversion into `Amount` is either lossless or
//! fails; nothing is rounded or truncated.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::result::{Error, Result};

/// Largest integer an IEEE-754 double represents exactly (2^53 - 1)
pub const MAX_SAFE_F64_INTEGER: u64 = 9_007_199_254_740_991;

/// Most decimals a token can declare and still express one whole unit in uint256
pub const MAX_DECIMALS: u32 = 77;

/// Non-negative token quantity in the token's base unit
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(BigUint);

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    /// Value as `u128`, if it fits
    pub fn to_u128(&self) -> Option<u128> {
        self.0.to_u128()
    }

    /// Big-endian bytes, left-padded to 32 bytes (uint256 word)
    ///
    /// Returns `None` for values wider than 256 bits.
    pub fn to_be_bytes32(&self) -> Option<[u8; 32]> {
        let bytes = self.0.to_bytes_be();
        if bytes.len() > 32 {
            return None;
        }
        let mut word = [0u8; 32];
        word[32 - bytes.len()..].copy_from_slice(&bytes);
        Some(word)
    }

    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        if self.0 >= other.0 {
            Some(Amount(&self.0 - &other.0))
        } else {
            None
        }
    }

    pub fn checked_add(&self, other: &Amount) -> Amount {
        Amount(&self.0 + &other.0)
    }

    /// Parse a human-readable decimal ("1.5") into base units
    ///
    /// Fails if the input has more fractional digits than `decimals`, or if
    /// `decimals` exceeds `MAX_DECIMALS`.
    pub fn parse_units(input: &str, decimals: u32) -> Result<Self> {
        if decimals > MAX_DECIMALS {
            return Err(Error::validation(format!(
                "decimals must be at most {}",
                MAX_DECIMALS
            )));
        }
        let input = input.trim();
        let (whole, frac) = match input.split_once('.') {
            Some((w, f)) => (w, f),
            None => (input, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(Error::validation("Amount is empty"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::validation(format!("Invalid amount: {}", input)));
        }

        let frac = frac.trim_end_matches('0');
        if frac.len() > decimals as usize {
            return Err(Error::validation(format!(
                "Amount {} has more than {} decimal places",
                input, decimals
            )));
        }

        let mut digits = String::with_capacity(whole.len() + decimals as usize);
        digits.push_str(whole);
        digits.push_str(frac);
        for _ in frac.len()..decimals as usize {
            digits.push('0');
        }

        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::zero());
        }
        BigUint::parse_bytes(digits.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| Error::validation(format!("Invalid amount: {}", input)))
    }

    /// Render base units as a decimal string with `decimals` fractional digits
    ///
    /// Output length grows with `decimals`; callers taking it from user input
    /// should bound it by `MAX_DECIMALS`.
    pub fn format_units(&self, decimals: u32) -> String {
        let digits = self.0.to_str_radix(10);
        let decimals = decimals as usize;
        if decimals == 0 {
            return digits;
        }

        let padded = if digits.len() <= decimals {
            format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
        } else {
            digits
        };
        let (whole, frac) = padded.split_at(padded.len() - decimals);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, frac)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Amount {
                fn from(value: $t) -> Self {
                    Self(BigUint::from(value))
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl From<BigUint> for Amount {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl TryFrom<i64> for Amount {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        u64::try_from(value)
            .map(Self::from)
            .map_err(|_| Error::validation(format!("Amount must not be negative: {}", value)))
    }
}

impl TryFrom<i128> for Amount {
    type Error = Error;

    fn try_from(value: i128) -> Result<Self> {
        u128::try_from(value)
            .map(Self::from)
            .map_err(|_| Error::validation(format!("Amount must not be negative: {}", value)))
    }
}

/// Floating-point input is accepted only where it is exact
impl TryFrom<f64> for Amount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::validation("Amount must be a finite number"));
        }
        if value < 0.0 {
            return Err(Error::validation(format!("Amount must not be negative: {}", value)));
        }
        if value.fract() != 0.0 {
            return Err(Error::validation(format!(
                "Amount must be an integer number of base units: {}",
                value
            )));
        }
        if value > MAX_SAFE_F64_INTEGER as f64 {
            return Err(Error::validation(format!(
                "Amount {} exceeds the exact range of a double; pass it as an integer or string",
                value
            )));
        }
        Ok(Self::from(value as u64))
    }
}

impl FromStr for Amount {
    type Err = Error;

    /// Accepts decimal digits or `0x`-prefixed hex
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => (hex, 16),
            None => (s, 10),
        };

        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(Error::validation(format!("Invalid amount: {:?}", s)));
        }

        BigUint::parse_bytes(digits.as_bytes(), radix)
            .map(Self)
            .ok_or_else(|| Error::validation(format!("Invalid amount: {:?}", s)))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_str_radix(10))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        use serde::de::Error as _;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(u64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(n) => Ok(Self::from(n)),
            Repr::Text(s) => s.parse().map_err(D::Error::custom),
        }
    }
}

/// A balance as reported by a backend, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawAmount {
    Integer(u128),
    Big(BigUint),
    /// Decimal or `0x` hex text
    Text(String),
}

impl TryFrom<RawAmount> for Amount {
    type Error = Error;

    fn try_from(raw: RawAmount) -> Result<Self> {
        match raw {
            RawAmount::Integer(n) => Ok(Self::from(n)),
            RawAmount::Big(n) => Ok(Self(n)),
            RawAmount::Text(s) => s
                .parse()
                .map_err(|_| Error::backend(format!("Backend returned a malformed amount: {:?}", s))),
        }
    }
}

impl From<Amount> for RawAmount {
    fn from(amount: Amount) -> Self {
        RawAmount::Big(amount.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_values_survive_string_parse() {
        let big = "123456789012345678901234567890";
        let amount: Amount = big.parse().unwrap();
        assert_eq!(amount.to_string(), big);
        assert!(amount.to_u128().is_some());
    }

    #[test]
    fn test_parse_hex() {
        let amount: Amount = "0xff".parse().unwrap();
        assert_eq!(amount, Amount::from(255u32));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Amount>().is_err());
        assert!("-5".parse::<Amount>().is_err());
        assert!("1.5".parse::<Amount>().is_err());
        assert!("0x".parse::<Amount>().is_err());
        assert!("12ab".parse::<Amount>().is_err());
    }

    #[test]
    fn test_f64_rejects_lossy_values() {
        assert_eq!(Amount::try_from(100.0).unwrap(), Amount::from(100u64));
        assert!(Amount::try_from(1.5).is_err());
        assert!(Amount::try_from(-1.0).is_err());
        assert!(Amount::try_from(f64::NAN).is_err());
        assert!(Amount::try_from(f64::INFINITY).is_err());
        assert!(Amount::try_from(2f64.powi(60)).is_err());
        assert_eq!(
            Amount::try_from(MAX_SAFE_F64_INTEGER as f64).unwrap(),
            Amount::from(MAX_SAFE_F64_INTEGER)
        );
    }

    #[test]
    fn test_signed_conversion() {
        assert_eq!(Amount::try_from(7i64).unwrap(), Amount::from(7u8));
        assert!(Amount::try_from(-7i64).is_err());
        assert!(Amount::try_from(-7i128).is_err());
    }

    #[test]
    fn test_units_round_trip() {
        let amount = Amount::parse_units("1.5", 18).unwrap();
        assert_eq!(amount.to_string(), "1500000000000000000");
        assert_eq!(amount.format_units(18), "1.5");

        assert_eq!(Amount::from(5u8).format_units(3), "0.005");
        assert_eq!(Amount::from(5000u32).format_units(3), "5");
        assert_eq!(Amount::parse_units("0.000", 3).unwrap(), Amount::zero());
        assert!(Amount::parse_units("0.0001", 3).is_err());
        assert!(Amount::parse_units("1,5", 3).is_err());
        assert_eq!(Amount::parse_units("2", 6).unwrap(), Amount::from(2_000_000u32));
        assert_eq!(Amount::parse_units("1", MAX_DECIMALS + 1).unwrap_err().kind(), "validation");
    }

    #[test]
    fn test_serde_as_decimal_string() {
        let amount = Amount::from(u128::MAX);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, format!("\"{}\"", u128::MAX));

        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);

        let from_number: Amount = serde_json::from_str("42").unwrap();
        assert_eq!(from_number, Amount::from(42u8));
    }

    #[test]
    fn test_raw_amount_normalization() {
        assert_eq!(
            Amount::try_from(RawAmount::Text("0x10".into())).unwrap(),
            Amount::from(16u8)
        );
        let err = Amount::try_from(RawAmount::Text("n/a".into())).unwrap_err();
        assert_eq!(err.kind(), "backend_failure");
    }

    #[test]
    fn test_uint256_word() {
        let word = Amount::from(1u8).to_be_bytes32().unwrap();
        assert_eq!(word[31], 1);
        assert!(word[..31].iter().all(|b| *b == 0));

        let too_wide = Amount::from(BigUint::from(1u8) << 256);
        assert!(too_wide.to_be_bytes32().is_none());
    }
}
