// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Address normalization from the encodings nodes actually return
//!
//! The same 20-byte address shows up as a zero-padded 32-byte word (log
//! topics, stack slots), as a hex quantity, or as a decimal integer string
//! (stack values serialized by the tracer). Every constructor here ends in
//! [`address_from_word`], so all representations of the same bytes normalize
//! to the same [`Address`]. No arithmetic is performed; the integer forms are
//! only a different spelling of the byte layout.

use alloy_primitives::{Address, B256, U256};

/// Number of high-order bytes of a 32-byte word that must be zero for it to hold an address.
const ADDRESS_PADDING: usize = 12;

/// Why a value could not be read as an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    /// The high-order 12 bytes of the word are not zero.
    #[error("value does not fit in 20 bytes: {0}")]
    NotPadded(B256),

    /// A byte encoding longer than a 32-byte word.
    #[error("byte encoding is {0} bytes long, expected at most 32")]
    TooLong(usize),

    /// Not a base-10 integer.
    #[error("invalid decimal integer {0:?}")]
    InvalidDecimal(String),

    /// Not a `0x`-prefixed hex integer.
    #[error("invalid hex integer {0:?}")]
    InvalidHex(String),
}

/// Read an address from a 32-byte word holding it in the low 20 bytes.
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::address;
/// use blockledger::address_from_word;
///
/// let addr = address!("00000000000000000000000000000000deadbeef");
/// assert_eq!(address_from_word(addr.into_word()).unwrap(), addr);
/// ```
pub fn address_from_word(word: B256) -> Result<Address, AddressParseError> {
    if word[..ADDRESS_PADDING].iter().any(|byte| *byte != 0) {
        return Err(AddressParseError::NotPadded(word));
    }
    Ok(Address::from_word(word))
}

/// Read an address from a big-endian byte string of at most 32 bytes.
///
/// Shorter inputs are left-padded with zeros, so a bare 20-byte address and
/// its 32-byte word form decode to the same value.
pub fn address_from_be_bytes(bytes: &[u8]) -> Result<Address, AddressParseError> {
    if bytes.len() > 32 {
        return Err(AddressParseError::TooLong(bytes.len()));
    }
    let mut word = B256::ZERO;
    word[32 - bytes.len()..].copy_from_slice(bytes);
    address_from_word(word)
}

/// Read an address from a base-10 integer encoding of its bytes.
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::address;
/// use blockledger::address_from_decimal;
///
/// // 0xdeadbeef == 3735928559
/// let addr = address_from_decimal("3735928559").unwrap();
/// assert_eq!(addr, address!("00000000000000000000000000000000deadbeef"));
/// ```
pub fn address_from_decimal(value: &str) -> Result<Address, AddressParseError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressParseError::InvalidDecimal(value.to_string()));
    }
    let integer = U256::from_str_radix(value, 10)
        .map_err(|_| AddressParseError::InvalidDecimal(value.to_string()))?;
    address_from_word(B256::from(integer.to_be_bytes::<32>()))
}

/// Read an address from a `0x`-prefixed hex integer (20-byte, 32-byte or
/// unpadded quantity form).
pub fn address_from_hex(value: &str) -> Result<Address, AddressParseError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| AddressParseError::InvalidHex(value.to_string()))?;
    if digits.is_empty() || digits.len() > 64 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddressParseError::InvalidHex(value.to_string()));
    }
    let integer = U256::from_str_radix(digits, 16)
        .map_err(|_| AddressParseError::InvalidHex(value.to_string()))?;
    address_from_word(B256::from(integer.to_be_bytes::<32>()))
}

/// Decimal integer spelling of an address, as the tracer serializes stack values.
pub fn address_to_decimal(address: Address) -> String {
    U256::from_be_bytes(address.into_word().0).to_string()
}
