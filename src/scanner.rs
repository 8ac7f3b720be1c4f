// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Whole-block scan: both pipelines, joined and merged
//!
//! The log query and the trace request share no state, so they run
//! concurrently against the same provider. A request-level failure in either
//! pipeline fails the scan with a [`LedgerError`] naming that pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use blockledger::{BlockLedgerScanner, LedgerConfig};
//! use alloy_provider::ProviderBuilder;
//!
//! let provider = ProviderBuilder::new().connect_http(rpc_url.parse()?);
//! let scanner = BlockLedgerScanner::new(provider, LedgerConfig::default());
//!
//! let ledger = scanner.scan(block_hash).await?;
//! println!("{} transfers, {} skipped", ledger.len(), ledger.skipped().len());
//! ```

use alloy_primitives::B256;
use alloy_provider::Provider;
use futures::future::join;
use tracing::{info, Instrument};

use crate::config::LedgerConfig;
use crate::errors::LedgerError;
use crate::events::decoder::LogTransferDecoder;
use crate::ledger::{Ledger, ResultNormalizer};
use crate::spans;
use crate::trace::collector::CallTraceCollector;

/// Builds the [`Ledger`] of a block
pub struct BlockLedgerScanner<P> {
    provider: P,
    config: LedgerConfig,
}

impl<P: Provider> BlockLedgerScanner<P> {
    /// Create a new scanner
    pub fn new(provider: P, config: LedgerConfig) -> Self {
        Self { provider, config }
    }

    /// The configuration in use
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Run both pipelines for `block_hash` and merge their results.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::TokenTransfers`] if only the log pipeline failed
    /// - [`LedgerError::NativeTransfers`] if only the trace pipeline failed
    /// - [`LedgerError::Both`] if both failed
    pub async fn scan(&self, block_hash: B256) -> Result<Ledger, LedgerError> {
        async {
            let decoder = LogTransferDecoder::new(&self.provider, self.config.clone());
            let collector = CallTraceCollector::new(&self.provider, self.config.clone());

            let (tokens, natives) = join(
                decoder.decode(block_hash, &self.config.event_signature),
                collector.collect(block_hash),
            )
            .await;

            let (tokens, natives) = match (tokens, natives) {
                (Ok(tokens), Ok(natives)) => (tokens, natives),
                (Err(tokens), Err(natives)) => {
                    return Err(LedgerError::Both { tokens, natives })
                }
                (Err(tokens), Ok(_)) => return Err(tokens.into()),
                (Ok(_), Err(natives)) => return Err(natives.into()),
            };

            let ledger = ResultNormalizer::merge(tokens, natives);

            info!(
                entries = ledger.len(),
                tokens = ledger.token_transfers().count(),
                natives = ledger.native_transfers().count(),
                skipped = ledger.skipped().len(),
                "Built block ledger"
            );
            Ok(ledger)
        }
        .instrument(spans::scan_block(block_hash))
        .await
    }
}
