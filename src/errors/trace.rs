// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for call trace collection.

use super::RpcError;

/// A trace result (or part of one) that does not have the expected shape.
///
/// At the top level this aborts collection. Inside a single transaction or
/// call record it causes only that record to be skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTraceError {
    /// The `result` field is not an array of per-transaction results.
    #[error("trace result is not an array: {found}")]
    NotAnArray {
        /// JSON type that was found instead
        found: String,
    },

    /// A required field is absent or null.
    #[error("missing field `{field}`")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// A field could not be read as an address in any known encoding.
    #[error("field `{field}` is not a valid address: {reason}")]
    InvalidAddress {
        /// Name of the field
        field: &'static str,
        /// Why each encoding was rejected
        reason: String,
    },

    /// A field could not be read as a non-negative 256-bit integer.
    #[error("field `{field}` is not a valid amount: {reason}")]
    InvalidAmount {
        /// Name of the field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// A record is not a JSON object.
    #[error("unexpected {what}: {found}")]
    UnexpectedShape {
        /// What was being decoded
        what: &'static str,
        /// JSON type that was found instead
        found: String,
    },
}

/// Errors that abort the native transfer pipeline.
///
/// Partial results are never returned alongside these errors.
#[derive(Debug, thiserror::Error)]
pub enum NativeTransferError {
    /// The trace request could not be completed.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// The node reported an execution error for the trace.
    #[error("Trace execution failed: {message}")]
    TraceExecution {
        /// The node's error message
        message: String,
    },

    /// The response could not be parsed into per-transaction results.
    #[error("Malformed trace: {0}")]
    MalformedTrace(#[from] MalformedTraceError),
}

impl NativeTransferError {
    /// Create a `TraceExecution` error from the node's message.
    pub fn trace_execution(message: impl Into<String>) -> Self {
        NativeTransferError::TraceExecution {
            message: message.into(),
        }
    }
}
