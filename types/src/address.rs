//! Ledger account address type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// A 32-byte ledger account address.
///
/// The canonical text form is `0x` followed by 64 lowercase hex digits.
/// Parsing also accepts the short form used for special addresses (`0x1`),
/// which is left-padded with zeros.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    pub const LENGTH: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse an address from hex, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let digits = s.trim().trim_start_matches("0x");
        if digits.is_empty() {
            return Err(ParseError::Empty);
        }
        if digits.len() > Self::LENGTH * 2 {
            return Err(ParseError::TooLong {
                max: Self::LENGTH,
                actual: digits.len().div_ceil(2),
            });
        }
        let padded = format!("{digits:0>64}");
        let decoded = hex::decode(&padded).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({self})")
    }
}

impl FromStr for AccountAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
