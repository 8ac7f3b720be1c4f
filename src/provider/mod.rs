// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP provider construction
//!
//! The extraction types are generic over any [`alloy_provider::Provider`], so
//! callers are free to bring their own. This module is the short path for the
//! common case: one HTTP endpoint, optionally with the
//! [`LoggingLayer`](crate::transport::LoggingLayer) in front of it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use blockledger::provider::{create_http_provider, ProviderConfig};
//! use blockledger::{BlockLedgerScanner, LedgerConfig};
//!
//! let provider = create_http_provider(ProviderConfig::new("http://localhost:8545").with_logging())?;
//! let scanner = BlockLedgerScanner::new(provider, LedgerConfig::for_local_node());
//! ```

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::{create_http_provider, simple_http_provider};

/// Provider returned by the factory functions
pub type HttpProvider = alloy_provider::RootProvider;
