// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transfer amounts
//!
//! Native values and token quantities are both carried as [`Amount`]. The
//! type does no arithmetic; it only parses, compares and prints. It serializes
//! as a decimal string so no consumer has to round-trip through a float or a
//! 64-bit integer.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative integer amount of up to 256 bits (the widest EVM word).
///
/// # Examples
///
/// ```
/// use blockledger::Amount;
///
/// let amount: Amount = "1000".parse().unwrap();
/// assert_eq!(amount.to_string(), "1000");
/// assert_eq!(Amount::from_hex_str("0x3e8").unwrap(), amount);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(U256);

/// Why a string could not be read as an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountParseError {
    /// Not a base-10 integer.
    #[error("invalid decimal amount {0:?}")]
    InvalidDecimal(String),

    /// Not a `0x`-prefixed hex integer.
    #[error("invalid hex amount {0:?}")]
    InvalidHex(String),

    /// The value needs more than 256 bits.
    #[error("amount {0:?} exceeds 256 bits")]
    Overflow(String),
}

impl Amount {
    /// Zero
    pub const ZERO: Self = Self(U256::ZERO);

    /// Wrap a raw 256-bit value.
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// The raw value
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse a base-10 integer string.
    pub fn from_decimal_str(value: &str) -> Result<Self, AmountParseError> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountParseError::InvalidDecimal(value.to_string()));
        }
        U256::from_str_radix(value, 10)
            .map(Self)
            .map_err(|_| AmountParseError::Overflow(value.to_string()))
    }

    /// Parse a `0x`-prefixed hex integer string.
    pub fn from_hex_str(value: &str) -> Result<Self, AmountParseError> {
        let digits = value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
            .ok_or_else(|| AmountParseError::InvalidHex(value.to_string()))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AmountParseError::InvalidHex(value.to_string()));
        }
        U256::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| AmountParseError::Overflow(value.to_string()))
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_decimal_str(&value).map_err(serde::de::Error::custom)
    }
}
