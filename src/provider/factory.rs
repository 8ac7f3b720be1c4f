// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_provider::ProviderBuilder;
use alloy_rpc_client::ClientBuilder;

use crate::errors::RpcError;
use crate::transport::{LoggingLayer, TimeoutLayer};

use super::config::ProviderConfig;
use super::HttpProvider;

/// Create an HTTP provider with the given configuration
///
/// Recommended fillers are disabled: block scans only read, so a bare
/// `RootProvider` is all that is needed.
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(config: ProviderConfig) -> Result<HttpProvider, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{}: {e}", config.url)))?;

    let logging = config.logging_enabled.then(|| {
        if config.log_payloads {
            LoggingLayer::new().with_payloads()
        } else {
            LoggingLayer::new()
        }
    });

    // Logging sits outside the timeout so expired requests are still logged.
    let client = match (logging, config.timeout) {
        (None, None) => {
            return Ok(ProviderBuilder::new()
                .disable_recommended_fillers()
                .connect_http(url))
        }
        (Some(logging), None) => ClientBuilder::default().layer(logging).http(url),
        (None, Some(timeout)) => ClientBuilder::default()
            .layer(TimeoutLayer::new(timeout))
            .http(url),
        (Some(logging), Some(timeout)) => ClientBuilder::default()
            .layer(logging)
            .layer(TimeoutLayer::new(timeout))
            .http(url),
    };

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_client(client))
}

/// Create an HTTP provider without any layers
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn simple_http_provider(url: &str) -> Result<HttpProvider, RpcError> {
    create_http_provider(ProviderConfig::new(url))
}
