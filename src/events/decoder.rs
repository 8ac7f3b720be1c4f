// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token transfer extraction from a block's event logs
//!
//! One `eth_getLogs` round trip fetches every log in the block whose topic0
//! is the transfer signature hash. Each log is then decoded on its own:
//!
//! - topic1 / topic2: zero-padded `from` / `to` addresses
//! - data: the amount as one 32-byte big-endian word
//!
//! A log that does not fit this layout (an ERC-721 `Transfer` with a fourth
//! topic and empty data, say) is logged and reported as skipped. The output is
//! in ascending log-index order.
//!
//! # Example
//!
//! ```rust,ignore
//! use blockledger::{LedgerConfig, LogTransferDecoder};
//!
//! let decoder = LogTransferDecoder::new(&provider, LedgerConfig::default());
//! let extraction = decoder
//!     .decode(block_hash, "Transfer(address,address,uint256)")
//!     .await?;
//!
//! for transfer in &extraction.records {
//!     println!("ERC20 Transfer from={} to={} amount={}", transfer.from, transfer.to, transfer.amount);
//! }
//! ```

use alloy_primitives::{Address, Bytes, LogData, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types::Log;
use tracing::{debug, error, info, warn, Instrument};

use crate::config::LedgerConfig;
use crate::errors::{MalformedEventError, RpcError, TokenTransferError};
use crate::events::filter::block_transfer_filter;
use crate::events::signature::EventSignature;
use crate::spans;
use crate::types::address::address_from_word;
use crate::types::amount::Amount;
use crate::types::extraction::{Extraction, RecordLocation, SkippedRecord};
use crate::types::transfers::TokenTransfer;

/// Topic count of a transfer log: signature, from, to.
const TRANSFER_TOPIC_COUNT: usize = 3;

/// Decode one log entry into a [`TokenTransfer`].
///
/// The signature check is repeated here even though the node was asked to
/// filter on it, so the function is safe to call on arbitrary logs.
pub fn decode_transfer_log(
    log: &Log,
    signature: &EventSignature,
) -> Result<TokenTransfer, MalformedEventError> {
    let topics = log.topics();
    let topic0 = topics
        .first()
        .ok_or(MalformedEventError::WrongTopicCount { found: 0 })?;
    if *topic0 != signature.hash() {
        return Err(MalformedEventError::SignatureMismatch {
            expected: signature.hash(),
            actual: *topic0,
        });
    }
    if topics.len() != TRANSFER_TOPIC_COUNT {
        return Err(MalformedEventError::WrongTopicCount {
            found: topics.len(),
        });
    }

    let from = address_topic(topics, 1)?;
    let to = address_topic(topics, 2)?;

    let data = &log.data().data;
    if data.len() != 32 {
        return Err(MalformedEventError::InvalidDataLength { found: data.len() });
    }
    let amount = Amount::new(U256::from_be_slice(data));

    let source_log_index = log.log_index.ok_or(MalformedEventError::MissingLogIndex)?;

    Ok(TokenTransfer {
        token: log.address(),
        from,
        to,
        amount,
        source_log_index,
        transaction_hash: log.transaction_hash,
    })
}

fn address_topic(topics: &[B256], position: usize) -> Result<Address, MalformedEventError> {
    let word = topics[position];
    address_from_word(word).map_err(|_| MalformedEventError::AddressNotPadded { position, word })
}

/// Re-encode a transfer into the `(topics, data)` layout it was decoded from.
pub fn encode_transfer_log(transfer: &TokenTransfer, signature: &EventSignature) -> LogData {
    LogData::new_unchecked(
        vec![
            signature.hash(),
            transfer.from.into_word(),
            transfer.to.into_word(),
        ],
        Bytes::from(transfer.amount.as_u256().to_be_bytes::<32>()),
    )
}

/// Decode every log, skipping malformed ones, and order the result by log index.
pub fn decode_transfer_logs(logs: &[Log], signature: &EventSignature) -> Extraction<TokenTransfer> {
    let mut extraction = Extraction::default();

    for (position, log) in logs.iter().enumerate() {
        match decode_transfer_log(log, signature) {
            Ok(transfer) => extraction.records.push(transfer),
            Err(e) => {
                warn!(
                    position,
                    log_index = ?log.log_index,
                    token = %log.address(),
                    error = %e,
                    "Skipping malformed transfer log"
                );
                extraction.skipped.push(SkippedRecord::new(
                    RecordLocation::Log {
                        position,
                        log_index: log.log_index,
                    },
                    e,
                ));
            }
        }
    }

    // Stable: logs sharing an index keep the node's order
    extraction
        .records
        .sort_by_key(|transfer| transfer.source_log_index);

    extraction
}

/// Extracts token transfers from a block's logs
///
/// Holds the provider and configuration; each [`decode`](Self::decode) call is
/// one independent log query.
pub struct LogTransferDecoder<P> {
    provider: P,
    config: LedgerConfig,
}

impl<P: Provider> LogTransferDecoder<P> {
    /// Create a new decoder
    pub fn new(provider: P, config: LedgerConfig) -> Self {
        Self { provider, config }
    }

    /// Fetch and decode all logs in `block_hash` matching `event_signature`.
    ///
    /// # Errors
    ///
    /// - [`TokenTransferError::InvalidSignature`] if the signature is not transfer-shaped
    /// - [`TokenTransferError::Rpc`] if the log query fails or times out
    ///
    /// Malformed log entries are not errors; they are returned in
    /// [`Extraction::skipped`].
    pub async fn decode(
        &self,
        block_hash: B256,
        event_signature: &str,
    ) -> Result<Extraction<TokenTransfer>, TokenTransferError> {
        let signature = EventSignature::parse(event_signature)?;
        self.decode_with_signature(block_hash, &signature).await
    }

    /// Like [`decode`](Self::decode) with an already validated signature.
    pub async fn decode_with_signature(
        &self,
        block_hash: B256,
        signature: &EventSignature,
    ) -> Result<Extraction<TokenTransfer>, TokenTransferError> {
        async {
            let logs = self
                .fetch_logs(block_hash, signature)
                .await
                .inspect_err(|e| {
                    error!(error = %e, "Transfer log query failed");
                })?;
            debug!(logs_count = logs.len(), "Fetched transfer logs");

            let extraction = decode_transfer_logs(&logs, signature);

            info!(
                transfers = extraction.records.len(),
                skipped = extraction.skipped.len(),
                "Decoded token transfers"
            );
            Ok(extraction)
        }
        .instrument(spans::decode_token_transfers(block_hash, signature))
        .await
    }

    async fn fetch_logs(
        &self,
        block_hash: B256,
        signature: &EventSignature,
    ) -> Result<Vec<Log>, RpcError> {
        let filter = block_transfer_filter(block_hash, signature);
        let operation = format!("{signature} logs in block {block_hash}");
        let timeout = self.config.rpc_timeout;

        tokio::time::timeout(timeout, self.provider.get_logs(&filter))
            .await
            .map_err(|_| RpcError::timeout(operation.clone(), timeout))?
            .map_err(|e| RpcError::get_logs_failed(operation, e))
    }
}
