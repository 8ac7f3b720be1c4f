// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transfer event signatures and their topic hashes
//!
//! Logs are requested by topic0, the keccak-256 hash of the canonical event
//! signature. Only signatures with the transfer layout
//! `(address indexed, address indexed, uint256)` are accepted, because that is
//! the only layout the decoder knows how to read.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{keccak256, B256};
use alloy_sol_types::SolEvent;

use crate::errors::TokenTransferError;
use crate::events::definitions::Transfer;

/// Parameter types of the transfer layout, in order.
const TRANSFER_PARAMS: [&str; 3] = ["address", "address", "uint256"];

/// A validated transfer event signature and its topic hash.
///
/// # Examples
///
/// ```rust
/// use blockledger::EventSignature;
///
/// let signature: EventSignature = "Transfer(address indexed from, address indexed to, uint value)"
///     .parse()
///     .unwrap();
/// assert_eq!(signature.canonical(), "Transfer(address,address,uint256)");
/// assert_eq!(signature, EventSignature::erc20_transfer());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventSignature {
    canonical: String,
    hash: B256,
}

impl EventSignature {
    /// The standard ERC-20 `Transfer(address,address,uint256)` event.
    pub fn erc20_transfer() -> Self {
        Self {
            canonical: Transfer::SIGNATURE.to_string(),
            hash: Transfer::SIGNATURE_HASH,
        }
    }

    /// Parse and canonicalize a signature.
    ///
    /// Accepts either the canonical form or a declaration with `indexed`
    /// markers and parameter names. `uint` is normalized to `uint256`.
    pub fn parse(signature: &str) -> Result<Self, TokenTransferError> {
        let invalid = |reason: &str| TokenTransferError::invalid_signature(signature, reason);

        let trimmed = signature.trim();
        let trimmed = trimmed.strip_prefix("event ").unwrap_or(trimmed).trim();
        let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed).trim_end();

        let open = trimmed
            .find('(')
            .ok_or_else(|| invalid("missing parameter list"))?;
        let params = trimmed[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| invalid("parameter list is not closed"))?;

        let name = trimmed[..open].trim();
        if !is_identifier(name) {
            return Err(invalid("event name is not an identifier"));
        }
        if params.contains(['(', ')', '[', ']']) {
            return Err(invalid("tuple and array parameters are not supported"));
        }

        let types: Vec<&str> = params
            .split(',')
            .map(|param| param.split_whitespace().next().unwrap_or(""))
            .map(|ty| if ty == "uint" { "uint256" } else { ty })
            .collect();
        if types != TRANSFER_PARAMS {
            return Err(invalid("parameters must be (address,address,uint256)"));
        }

        let canonical = format!("{name}({})", TRANSFER_PARAMS.join(","));
        let hash = keccak256(canonical.as_bytes());
        Ok(Self { canonical, hash })
    }

    /// Canonical signature text, e.g. `Transfer(address,address,uint256)`.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// The topic0 value of matching logs.
    pub fn hash(&self) -> B256 {
        self.hash
    }
}

impl Default for EventSignature {
    fn default() -> Self {
        Self::erc20_transfer()
    }
}

impl FromStr for EventSignature {
    type Err = TokenTransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EventSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
