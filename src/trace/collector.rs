// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Native transfer extraction from a block trace
//!
//! Native value moved by contract code never shows up in logs. The collector
//! recovers it with a single `debug_traceBlockByHash` request carrying the
//! [call-ops tracer](super::tracer), then flattens the per-transaction results
//! in block order.
//!
//! # Example
//!
//! ```rust,ignore
//! use blockledger::{CallTraceCollector, LedgerConfig};
//!
//! let collector = CallTraceCollector::new(&provider, LedgerConfig::default());
//! let extraction = collector.collect(block_hash).await?;
//!
//! for transfer in &extraction.records {
//!     println!("native transfer from={} to={} amount={}", transfer.from, transfer.to, transfer.amount);
//! }
//! ```

use std::borrow::Cow;

use alloy_json_rpc::RpcError as JsonRpcError;
use alloy_primitives::B256;
use alloy_provider::Provider;
use alloy_transport::TransportError;
use serde_json::Value;
use tracing::{debug, error, info, Instrument};

use crate::config::LedgerConfig;
use crate::errors::{NativeTransferError, RpcError};
use crate::spans;
use crate::trace::response::{flatten_trace_result, lenient_response, LenientResponse};
use crate::trace::tracer::{TracerOptions, DEBUG_TRACE_BLOCK_BY_HASH};
use crate::types::extraction::Extraction;
use crate::types::transfers::NativeTransfer;

/// Extracts native transfers from a block trace
pub struct CallTraceCollector<P> {
    provider: P,
    config: LedgerConfig,
}

impl<P: Provider> CallTraceCollector<P> {
    /// Create a new collector
    pub fn new(provider: P, config: LedgerConfig) -> Self {
        Self { provider, config }
    }

    /// Trace `block_hash` and return its native transfers.
    ///
    /// # Errors
    ///
    /// - [`NativeTransferError::Rpc`] on transport failure or timeout
    /// - [`NativeTransferError::TraceExecution`] if the node reports an error,
    ///   for the request or for any transaction in it
    /// - [`NativeTransferError::MalformedTrace`] if the result is not a list of
    ///   per-transaction results
    ///
    /// On error no transfers are returned. Malformed individual records are
    /// skipped and listed in [`Extraction::skipped`].
    pub async fn collect(
        &self,
        block_hash: B256,
    ) -> Result<Extraction<NativeTransfer>, NativeTransferError> {
        async {
            let result = self.trace_block(block_hash).await.inspect_err(|e| {
                error!(error = %e, "Block trace failed");
            })?;

            let extraction = flatten_trace_result(&result).inspect_err(|e| {
                error!(error = %e, "Block trace result rejected");
            })?;

            info!(
                transactions = result.as_array().map_or(0, Vec::len),
                transfers = extraction.records.len(),
                skipped = extraction.skipped.len(),
                "Collected native transfers"
            );
            Ok(extraction)
        }
        .instrument(spans::collect_native_transfers(block_hash))
        .await
    }

    async fn trace_block(&self, block_hash: B256) -> Result<Value, NativeTransferError> {
        let operation = format!("{DEBUG_TRACE_BLOCK_BY_HASH} {block_hash}");
        let timeout = self.config.rpc_timeout;
        let params = (
            block_hash,
            TracerOptions::call_ops(self.config.trace_timeout.clone()),
        );

        debug!(timeout_ms = timeout.as_millis() as u64, "Sending trace request");

        let response = tokio::time::timeout(
            timeout,
            self.provider
                .raw_request::<_, Value>(Cow::Borrowed(DEBUG_TRACE_BLOCK_BY_HASH), params),
        )
        .await
        .map_err(|_| RpcError::timeout(operation.clone(), timeout))?;

        response.or_else(|e| recover_transport_error(operation, e))
    }
}

/// Split node-reported execution errors from transport failures, and recover
/// results from bodies that only failed alloy's strict response parsing.
fn recover_transport_error(
    operation: String,
    error: TransportError,
) -> Result<Value, NativeTransferError> {
    match error {
        JsonRpcError::ErrorResp(payload) => Err(NativeTransferError::trace_execution(
            payload.message.to_string(),
        )),
        JsonRpcError::DeserError { ref text, .. } => match lenient_response(text) {
            Some(LenientResponse::Result(result)) => {
                debug!("Read trace result from non-standard response body");
                Ok(result)
            }
            Some(LenientResponse::Error(message)) => {
                Err(NativeTransferError::trace_execution(message))
            }
            None => Err(RpcError::trace_request_failed(operation, error).into()),
        },
        other => Err(RpcError::trace_request_failed(operation, other).into()),
    }
}
