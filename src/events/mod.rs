// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token transfers from event logs.
//!
//! This module handles:
//! - The `Transfer` event definition and signature validation
//! - Block-scoped log filters
//! - Decoding (and re-encoding) transfer logs

pub mod decoder;
pub mod definitions;
pub mod filter;
pub mod signature;

pub use decoder::{decode_transfer_log, decode_transfer_logs, encode_transfer_log, LogTransferDecoder};
pub use definitions::Transfer;
pub use filter::{block_transfer_filter, TransferFilterBuilder};
pub use signature::EventSignature;
