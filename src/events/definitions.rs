// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical ERC-20 `Transfer` event definition
//!
//! The `sol!` macro generates `SIGNATURE` (string) and `SIGNATURE_HASH` (B256)
//! constants. The default [`EventSignature`](crate::EventSignature) is built
//! from them, and the decoder is tested against `Transfer::decode_log` so the
//! hand-written layout checks agree with the ABI decoder.
//!
//! ```rust,ignore
//! use blockledger::Transfer;
//! use alloy_sol_types::SolEvent;
//!
//! println!("Event signature: {}", Transfer::SIGNATURE);
//! // Prints: "Transfer(address,address,uint256)"
//! ```

use std::fmt::Debug;

use alloy_sol_types::sol;

sol! {
    /// ERC-20 Transfer event
    ///
    /// Emitted when tokens move between addresses, including mints
    /// (from = 0x0) and burns (to = 0x0).
    ///
    /// - `from`: sender (indexed, topic 1)
    /// - `to`: recipient (indexed, topic 2)
    /// - `value`: raw amount, not adjusted for decimals (data)
    event Transfer(address indexed from, address indexed to, uint256 value);
}

impl Debug for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transfer(from: {}, to: {}, value: {})",
            self.from, self.to, self.value
        )
    }
}
