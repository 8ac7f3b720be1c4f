// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Filter builder for transfer logs in a single block
//!
//! Filtering by topic0 on the node, rather than fetching every log in the
//! block and discarding most of them, is what keeps the log query cheap.
//!
//! ```rust,ignore
//! use blockledger::events::filter::TransferFilterBuilder;
//!
//! let filter = TransferFilterBuilder::new()
//!     .at_block_hash(block_hash)
//!     .build();
//!
//! let logs = provider.get_logs(&filter).await?;
//! ```

use alloy_primitives::B256;
use alloy_rpc_types::Filter;

use crate::events::signature::EventSignature;

/// Builder for transfer log filters
///
/// Produces an `alloy_rpc_types::Filter` with:
/// - topic0: hash of the event signature (ERC-20 `Transfer` by default)
/// - block hash: the block being reconstructed, when set
#[derive(Debug, Clone, Default)]
pub struct TransferFilterBuilder {
    block_hash: Option<B256>,
    signature: EventSignature,
}

impl TransferFilterBuilder {
    /// Create a builder for ERC-20 `Transfer` logs
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the query to one block
    pub fn at_block_hash(mut self, block_hash: B256) -> Self {
        self.block_hash = Some(block_hash);
        self
    }

    /// Match logs of a different transfer-shaped event
    pub fn with_signature(mut self, signature: EventSignature) -> Self {
        self.signature = signature;
        self
    }

    /// Build the final Alloy Filter
    pub fn build(self) -> Filter {
        let mut filter = Filter::new().event_signature(self.signature.hash());

        if let Some(block_hash) = self.block_hash {
            filter = filter.at_block_hash(block_hash);
        }

        filter
    }
}

/// Filter for every log in `block_hash` whose topic0 is `signature`'s hash.
pub fn block_transfer_filter(block_hash: B256, signature: &EventSignature) -> Filter {
    TransferFilterBuilder::new()
        .at_block_hash(block_hash)
        .with_signature(signature.clone())
        .build()
}
