// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

use std::time::Duration;

use crate::config::constants::{DEFAULT_RPC_TIMEOUT, LOCAL_NODE_RPC_TIMEOUT};

/// Configuration for creating providers
///
/// # Example
///
/// ```rust,ignore
/// use blockledger::provider::ProviderConfig;
///
/// let config = ProviderConfig::new("https://eth.llamarpc.com").with_logging();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Transport-level limit on each request packet (`None` disables it)
    pub timeout: Option<Duration>,
    /// Install the `rpc_call` logging layer
    pub logging_enabled: bool,
    /// Log full request and response packets at `trace` (implies logging)
    pub log_payloads: bool,
}

impl ProviderConfig {
    /// Create a new provider configuration with the specified URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
            logging_enabled: false,
            log_payloads: false,
        }
    }

    /// Preset for a local archive node: long timeout, logging on
    #[must_use]
    pub fn local_node(url: impl Into<String>) -> Self {
        Self::new(url)
            .with_timeout(LOCAL_NODE_RPC_TIMEOUT)
            .with_logging()
    }

    /// Preset for a hosted endpoint: default timeout, logging on
    #[must_use]
    pub fn public_endpoint(url: impl Into<String>) -> Self {
        Self::new(url)
            .with_timeout(DEFAULT_RPC_TIMEOUT)
            .with_logging()
    }

    /// Fail any request packet that takes longer than `timeout`
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Log every RPC round trip
    #[must_use]
    pub fn with_logging(mut self) -> Self {
        self.logging_enabled = true;
        self
    }

    /// Log every RPC round trip including its payloads
    #[must_use]
    pub fn with_payload_logging(mut self) -> Self {
        self.logging_enabled = true;
        self.log_payloads = true;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new("http://localhost:8545")
    }
}
