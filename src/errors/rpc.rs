// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for node communication.
//!
//! Every round trip to the node (the log query and the trace request) fails
//! with [`RpcError`] when the request cannot be completed. These errors are
//! fatal to the pipeline that issued the request and are never retried here.

use std::time::Duration;

/// Errors that can occur while talking to the node.
///
/// Captures transport and connection failures with context about which
/// request was outstanding when the failure happened.
///
/// # Examples
///
/// ```rust
/// use blockledger::RpcError;
/// use std::time::Duration;
///
/// let error = RpcError::Timeout {
///     operation: "eth_getLogs".to_string(),
///     timeout: Duration::from_secs(30),
/// };
/// assert!(error.to_string().contains("eth_getLogs"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Failed to fetch logs from the node.
    #[error("Failed to fetch logs for {operation}")]
    GetLogsFailed {
        /// Description of the query that failed (e.g., "Transfer logs in block 0xabc…")
        operation: String,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The trace request could not be delivered or its response could not be read.
    #[error("Trace request failed for {operation}")]
    TraceRequestFailed {
        /// Description of the request that failed
        operation: String,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No response arrived before the configured timeout elapsed.
    #[error("{operation} timed out after {timeout:?}")]
    Timeout {
        /// The request that was outstanding
        operation: String,
        /// The timeout that elapsed
        timeout: Duration,
    },

    /// The configured node URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),
}

impl RpcError {
    /// Helper to create a `GetLogsFailed` error from any error type.
    pub fn get_logs_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetLogsFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `TraceRequestFailed` error from any error type.
    pub fn trace_request_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::TraceRequestFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Timeout` error.
    pub fn timeout(operation: impl Into<String>, timeout: Duration) -> Self {
        RpcError::Timeout {
            operation: operation.into(),
            timeout,
        }
    }
}
