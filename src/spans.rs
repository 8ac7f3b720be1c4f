// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for blockledger operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here and wraps
//! its future with `.instrument(spans::operation(..))`.

use alloy_primitives::B256;
use tracing::Span;

use crate::events::signature::EventSignature;
use crate::trace::tracer::TRACER_VERSION;

/// Create span for a whole-block scan.
///
/// Parent: None (root span for this operation)
/// Children: decode_token_transfers, collect_native_transfers
#[inline]
pub(crate) fn scan_block(block_hash: B256) -> Span {
    tracing::info_span!("blockledger.scan_block", block_hash = %block_hash)
}

/// Create span for decoding the token transfers of one block.
///
/// Parent: scan_block span, when run as part of a scan
/// Children: the `eth_getLogs` rpc_call span
#[inline]
pub(crate) fn decode_token_transfers(block_hash: B256, signature: &EventSignature) -> Span {
    tracing::info_span!(
        "blockledger.decode_token_transfers",
        block_hash = %block_hash,
        signature = %signature,
        topic0 = %signature.hash(),
    )
}

/// Create span for collecting the native transfers of one block.
///
/// Parent: scan_block span, when run as part of a scan
/// Children: the `debug_traceBlockByHash` rpc_call span
#[inline]
pub(crate) fn collect_native_transfers(block_hash: B256) -> Span {
    tracing::info_span!(
        "blockledger.collect_native_transfers",
        block_hash = %block_hash,
        tracer = TRACER_VERSION,
    )
}
