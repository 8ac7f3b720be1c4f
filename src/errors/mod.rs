// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the blockledger library.
//!
//! Each pipeline has its own error type, and [`LedgerError`] wraps both so a
//! caller of the combined scan can tell which pipeline failed:
//!
//! - [`TokenTransferError`] - the log query for token transfers failed
//! - [`NativeTransferError`] - the trace request failed, the node reported an
//!   execution error, or the response had the wrong shape
//!
//! [`RpcError`] is the shared node communication error. [`MalformedEventError`]
//! and [`MalformedTraceError`] describe single records that were skipped; they
//! are reported through [`SkippedRecord`](crate::SkippedRecord) rather than
//! returned as `Err`.
//!
//! # Example
//!
//! ```rust,ignore
//! use blockledger::{BlockLedgerScanner, LedgerError, NativeTransferError};
//!
//! match scanner.scan(block_hash).await {
//!     Ok(ledger) => println!("{} transfers", ledger.len()),
//!     Err(LedgerError::NativeTransfers(NativeTransferError::TraceExecution { message })) => {
//!         eprintln!("node could not trace the block: {message}");
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

mod events;
mod rpc;
mod trace;

pub use events::{MalformedEventError, TokenTransferError};
pub use rpc::RpcError;
pub use trace::{MalformedTraceError, NativeTransferError};

/// Unified error type for a whole-block scan.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The token transfer pipeline failed.
    #[error("Token transfer extraction failed: {0}")]
    TokenTransfers(#[from] TokenTransferError),

    /// The native transfer pipeline failed.
    #[error("Native transfer extraction failed: {0}")]
    NativeTransfers(#[from] NativeTransferError),

    /// Both pipelines failed.
    #[error("Token transfer extraction failed: {tokens}; native transfer extraction failed: {natives}")]
    Both {
        /// The token pipeline's error
        #[source]
        tokens: TokenTransferError,
        /// The native pipeline's error
        natives: NativeTransferError,
    },
}
