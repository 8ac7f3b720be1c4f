// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transfer records produced by the two extraction pipelines

use alloy_primitives::{Address, TxHash};
use serde::Serialize;

use super::amount::Amount;

/// A fungible-token transfer decoded from one `Transfer` log entry.
///
/// # Fields
///
/// - `token`: Contract that emitted the log
/// - `from` / `to`: Indexed sender and recipient (topics 1 and 2)
/// - `amount`: Raw quantity from the data payload, not adjusted for decimals
/// - `source_log_index`: Position of the log within the block
/// - `transaction_hash`: Transaction that emitted the log, when the node reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub token: Address,
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
    pub source_log_index: u64,
    pub transaction_hash: Option<TxHash>,
}

/// Where in a transaction's execution a native transfer was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeTransferKind {
    /// The transaction's own value transfer (depth 0)
    Transaction,
    /// A value-carrying `CALL` made during execution (depth 1)
    Call,
}

impl NativeTransferKind {
    /// Call depth reported for records of this kind.
    pub const fn depth(self) -> u32 {
        match self {
            Self::Transaction => 0,
            Self::Call => 1,
        }
    }
}

/// A movement of the chain's native asset recovered from the block trace.
///
/// Zero-value records are kept; filter them with
/// [`Ledger::non_zero`](crate::Ledger::non_zero) if they are not wanted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTransfer {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
    pub call_depth: u32,
    /// Index of the transaction in the block's trace response
    pub tx_index: usize,
    pub kind: NativeTransferKind,
}

impl NativeTransfer {
    /// Record for the transaction-level context (`ctx.from -> ctx.to`).
    pub fn transaction(tx_index: usize, from: Address, to: Address, amount: Amount) -> Self {
        Self::with_kind(NativeTransferKind::Transaction, tx_index, from, to, amount)
    }

    /// Record for a `CALL` executed inside the transaction.
    pub fn call(tx_index: usize, from: Address, to: Address, amount: Amount) -> Self {
        Self::with_kind(NativeTransferKind::Call, tx_index, from, to, amount)
    }

    fn with_kind(
        kind: NativeTransferKind,
        tx_index: usize,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Self {
        Self {
            from,
            to,
            amount,
            call_depth: kind.depth(),
            tx_index,
            kind,
        }
    }
}
