// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower middleware for the RPC transport.
//!
//! [`LoggingLayer`] wraps every JSON-RPC round trip in an `rpc_call` span,
//! so the `eth_getLogs` and `debug_traceBlockByHash` requests made by a block
//! scan show up with their method, request id and latency. [`TimeoutLayer`]
//! bounds each round trip at the transport.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockledger::transport::LoggingLayer;
//! use alloy_rpc_client::ClientBuilder;
//! use alloy_provider::ProviderBuilder;
//!
//! let client = ClientBuilder::default()
//!     .layer(LoggingLayer::new())
//!     .http(rpc_url);
//!
//! let provider = ProviderBuilder::new()
//!     .disable_recommended_fillers()
//!     .connect_client(client);
//! ```

mod logging;
mod timeout;

pub use logging::{LoggingLayer, LoggingService};
pub use timeout::{TimeoutLayer, TimeoutService};
