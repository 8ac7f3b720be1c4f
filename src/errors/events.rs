// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for transfer log decoding.
//!
//! [`MalformedEventError`] describes a single log entry that does not match the
//! transfer event layout. Those entries are logged and skipped; only
//! [`TokenTransferError`] aborts the log pipeline.

use alloy_primitives::B256;

use super::RpcError;

/// A single log entry whose topics or data do not match the transfer event ABI.
///
/// Decoding continues past these entries; each one is reported as a skipped
/// record alongside the successfully decoded transfers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedEventError {
    /// The first topic is not the hash of the requested event signature.
    #[error("topic0 {actual} does not match event signature hash {expected}")]
    SignatureMismatch {
        /// Hash of the requested signature
        expected: B256,
        /// Hash found in the log
        actual: B256,
    },

    /// The log does not carry exactly three topics (signature, from, to).
    #[error("expected 3 topics, found {found}")]
    WrongTopicCount {
        /// Number of topics found in the log
        found: usize,
    },

    /// An address topic has non-zero bytes above the low 20 bytes.
    #[error("topic {position} is not a zero-padded address word: {word}")]
    AddressNotPadded {
        /// Topic position (1 for `from`, 2 for `to`)
        position: usize,
        /// The offending word
        word: B256,
    },

    /// The data payload is not a single 32-byte big-endian integer.
    #[error("expected 32 bytes of data, found {found}")]
    InvalidDataLength {
        /// Length of the data payload
        found: usize,
    },

    /// The node returned a log without a log index.
    #[error("log has no log index")]
    MissingLogIndex,
}

/// Errors that abort the token transfer pipeline.
///
/// # Examples
///
/// ```rust,ignore
/// use blockledger::{LogTransferDecoder, TokenTransferError};
///
/// match decoder.decode(block_hash, "Transfer(address,address,uint256)").await {
///     Ok(extraction) => println!("{} transfers", extraction.records.len()),
///     Err(TokenTransferError::Rpc(e)) => eprintln!("node unreachable: {e}"),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum TokenTransferError {
    /// The event signature does not describe a `(address,address,uint256)` transfer.
    #[error("Invalid event signature {signature:?}: {reason}")]
    InvalidSignature {
        /// The signature as supplied by the caller
        signature: String,
        /// Why it was rejected
        reason: String,
    },

    /// The log query could not be completed.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

impl TokenTransferError {
    /// Create an `InvalidSignature` error.
    pub fn invalid_signature(signature: impl Into<String>, reason: impl Into<String>) -> Self {
        TokenTransferError::InvalidSignature {
            signature: signature.into(),
            reason: reason.into(),
        }
    }
}
