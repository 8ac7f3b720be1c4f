// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for block ledger extraction
//!
//! Nothing here is global: a [`LedgerConfig`] is handed to each decoder,
//! collector or scanner explicitly.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use blockledger::LedgerConfig;
//!
//! // ERC-20 Transfer signature, 30 second round-trip timeout
//! let config = LedgerConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use blockledger::LedgerConfigBuilder;
//! use std::time::Duration;
//!
//! let config = LedgerConfigBuilder::new()
//!     .rpc_timeout(Duration::from_secs(120))
//!     .trace_timeout("90s")
//!     .build();
//! assert_eq!(config.trace_timeout.as_deref(), Some("90s"));
//! ```

use std::time::Duration;

pub mod constants;

use constants::{DEFAULT_EVENT_SIGNATURE, DEFAULT_RPC_TIMEOUT, LOCAL_NODE_RPC_TIMEOUT};

/// Configuration for block ledger extraction
///
/// Use [`LedgerConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Event signature whose logs are decoded as token transfers
    /// Default: `Transfer(address,address,uint256)`
    pub event_signature: String,

    /// Client-side timeout for each node round trip
    /// Default: 30 seconds
    pub rpc_timeout: Duration,

    /// Node-side tracer timeout (Go duration string such as `"60s"`), forwarded
    /// with the trace request
    /// Default: None (node default)
    pub trace_timeout: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            event_signature: DEFAULT_EVENT_SIGNATURE.to_string(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            trace_timeout: None,
        }
    }
}

impl LedgerConfig {
    /// Config for a local archive node, where tracing a block may be slow but
    /// is not rate limited.
    ///
    /// # Example
    ///
    /// ```rust
    /// use blockledger::LedgerConfig;
    /// use std::time::Duration;
    ///
    /// let config = LedgerConfig::for_local_node();
    /// assert_eq!(config.rpc_timeout, Duration::from_secs(300));
    /// ```
    pub fn for_local_node() -> Self {
        Self {
            rpc_timeout: LOCAL_NODE_RPC_TIMEOUT,
            trace_timeout: Some(format!("{}s", LOCAL_NODE_RPC_TIMEOUT.as_secs())),
            ..Self::default()
        }
    }
}

/// Builder for [`LedgerConfig`]
///
/// # Example
///
/// ```rust
/// use blockledger::LedgerConfigBuilder;
///
/// let config = LedgerConfigBuilder::new()
///     .event_signature("Transfer(address indexed from, address indexed to, uint256 value)")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct LedgerConfigBuilder {
    config: LedgerConfig,
}

impl LedgerConfigBuilder {
    /// Start from [`LedgerConfig::default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from [`LedgerConfig::for_local_node`]
    pub fn for_local_node() -> Self {
        Self {
            config: LedgerConfig::for_local_node(),
        }
    }

    /// Set the event signature to decode.
    ///
    /// The signature is validated when the decoder runs; a signature that is
    /// not `(address,address,uint256)`-shaped fails the token pipeline with
    /// [`TokenTransferError::InvalidSignature`](crate::TokenTransferError::InvalidSignature).
    pub fn event_signature(mut self, signature: impl Into<String>) -> Self {
        self.config.event_signature = signature.into();
        self
    }

    /// Set the client-side timeout for each round trip
    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.config.rpc_timeout = timeout;
        self
    }

    /// Set the node-side tracer timeout
    pub fn trace_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.config.trace_timeout = Some(timeout.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> LedgerConfig {
        self.config
    }
}
