// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Defaults shared by the configuration types

use std::time::Duration;

/// Canonical ERC-20 `Transfer` event signature
pub const DEFAULT_EVENT_SIGNATURE: &str = "Transfer(address,address,uint256)";

/// Client-side limit on a single node round trip
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side limit used by [`LedgerConfig::for_local_node`](super::LedgerConfig::for_local_node).
/// Tracing a full block on a local archive node can take minutes.
pub const LOCAL_NODE_RPC_TIMEOUT: Duration = Duration::from_secs(300);
