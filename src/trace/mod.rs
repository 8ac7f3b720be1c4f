// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Native transfer collection from opcode-level block traces.
//!
//! This module handles:
//! - The tracer program and its options
//! - Field decoders for the tracer's loosely typed output
//! - Flattening per-transaction results into native transfers
//! - The `debug_traceBlockByHash` round trip

pub mod collector;
pub mod response;
pub mod tracer;

pub use collector::CallTraceCollector;
pub use response::flatten_trace_result;
pub use tracer::{
    TracerOptions, CALL_ADDR_STACK_SLOT, CALL_OPCODE, CALL_OPS_TRACER, CALL_VALUE_STACK_SLOT,
    TRACER_VERSION,
};
