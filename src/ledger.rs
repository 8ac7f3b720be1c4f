// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The merged block ledger
//!
//! [`ResultNormalizer::merge`] concatenates the two pipelines' outputs into a
//! single ordered [`Ledger`]: token transfers in log-index order, then native
//! transfers in trace order (transaction order, then call order). It does not
//! cross-reference the two streams. A token contract's internal value
//! movement and its `Transfer` event can describe the same economic transfer;
//! reconciling them is left to the consumer.

use serde::Serialize;

use crate::types::extraction::{Extraction, SkippedRecord};
use crate::types::transfers::{NativeTransfer, TokenTransfer};

/// One transfer in the ledger, tagged by asset kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "asset", rename_all = "snake_case")]
pub enum LedgerEntry {
    Token(TokenTransfer),
    Native(NativeTransfer),
}

impl LedgerEntry {
    /// True for zero-amount transfers.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Token(transfer) => transfer.amount.is_zero(),
            Self::Native(transfer) => transfer.amount.is_zero(),
        }
    }
}

/// Every value movement in one block, plus the records that could not be decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    skipped: Vec<SkippedRecord>,
}

impl Ledger {
    /// All entries in ledger order
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Records left out of the ledger because they were malformed
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    /// Token transfers, in log-index order
    pub fn token_transfers(&self) -> impl Iterator<Item = &TokenTransfer> {
        self.entries.iter().filter_map(|entry| match entry {
            LedgerEntry::Token(transfer) => Some(transfer),
            LedgerEntry::Native(_) => None,
        })
    }

    /// Native transfers, in trace order
    pub fn native_transfers(&self) -> impl Iterator<Item = &NativeTransfer> {
        self.entries.iter().filter_map(|entry| match entry {
            LedgerEntry::Native(transfer) => Some(transfer),
            LedgerEntry::Token(_) => None,
        })
    }

    /// A copy without zero-amount entries. Diagnostics are kept.
    pub fn non_zero(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| !entry.is_zero())
                .cloned()
                .collect(),
            skipped: self.skipped.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when no record was skipped by either pipeline.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Merges the two pipelines into a [`Ledger`].
pub struct ResultNormalizer;

impl ResultNormalizer {
    /// Concatenate and tag. Never fails; both inputs are already validated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use blockledger::{Extraction, ResultNormalizer};
    ///
    /// let ledger = ResultNormalizer::merge(Extraction::default(), Extraction::default());
    /// assert!(ledger.is_empty());
    /// ```
    pub fn merge(tokens: Extraction<TokenTransfer>, natives: Extraction<NativeTransfer>) -> Ledger {
        let mut entries = Vec::with_capacity(tokens.records.len() + natives.records.len());
        entries.extend(tokens.records.into_iter().map(LedgerEntry::Token));
        entries.extend(natives.records.into_iter().map(LedgerEntry::Native));

        let mut skipped = tokens.skipped;
        skipped.extend(natives.skipped);

        Ledger { entries, skipped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{MalformedEventError, MalformedTraceError};
    use crate::types::amount::Amount;
    use crate::types::extraction::RecordLocation;
    use alloy_primitives::{address, Address};

    const A: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
    const B: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");

    fn token(log_index: u64, amount: u64) -> TokenTransfer {
        TokenTransfer {
            token: Address::ZERO,
            from: A,
            to: B,
            amount: Amount::from(amount),
            source_log_index: log_index,
            transaction_hash: None,
        }
    }

    #[test]
    fn test_tokens_precede_natives() {
        let tokens = Extraction {
            records: vec![token(1, 10), token(4, 20)],
            skipped: vec![],
        };
        let natives = Extraction {
            records: vec![
                NativeTransfer::transaction(0, A, B, Amount::from(5)),
                NativeTransfer::call(0, B, A, Amount::from(7)),
            ],
            skipped: vec![],
        };

        let ledger = ResultNormalizer::merge(tokens, natives);

        assert_eq!(ledger.len(), 4);
        assert!(matches!(ledger.entries()[0], LedgerEntry::Token(_)));
        assert!(matches!(ledger.entries()[1], LedgerEntry::Token(_)));
        assert!(matches!(ledger.entries()[2], LedgerEntry::Native(_)));
        assert_eq!(ledger.token_transfers().count(), 2);
        assert_eq!(ledger.native_transfers().nth(1).unwrap().call_depth, 1);
        assert!(ledger.is_complete());
    }

    #[test]
    fn test_no_deduplication_across_streams() {
        let tokens = Extraction {
            records: vec![token(0, 5)],
            skipped: vec![],
        };
        let natives = Extraction {
            records: vec![NativeTransfer::transaction(0, A, B, Amount::from(5))],
            skipped: vec![],
        };

        assert_eq!(ResultNormalizer::merge(tokens, natives).len(), 2);
    }

    #[test]
    fn test_skipped_records_are_carried() {
        let tokens = Extraction::<TokenTransfer> {
            records: vec![],
            skipped: vec![SkippedRecord::new(
                RecordLocation::Log {
                    position: 0,
                    log_index: Some(2),
                },
                MalformedEventError::MissingLogIndex,
            )],
        };
        let natives = Extraction::<NativeTransfer> {
            records: vec![],
            skipped: vec![SkippedRecord::new(
                RecordLocation::Transaction { tx_index: 3 },
                MalformedTraceError::MissingField { field: "from" },
            )],
        };

        let ledger = ResultNormalizer::merge(tokens, natives);
        assert!(ledger.is_empty());
        assert!(!ledger.is_complete());
        assert_eq!(ledger.skipped().len(), 2);
    }

    #[test]
    fn test_non_zero_filter() {
        let tokens = Extraction {
            records: vec![token(0, 0), token(1, 3)],
            skipped: vec![],
        };
        let natives = Extraction {
            records: vec![NativeTransfer::transaction(0, A, B, Amount::ZERO)],
            skipped: vec![],
        };

        let ledger = ResultNormalizer::merge(tokens, natives).non_zero();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.token_transfers().next().unwrap().source_log_index, 1);
    }

    #[test]
    fn test_serialized_shape() {
        let ledger = ResultNormalizer::merge(
            Extraction {
                records: vec![token(3, 1000)],
                skipped: vec![],
            },
            Extraction {
                records: vec![NativeTransfer::call(2, A, B, Amount::from(7))],
                skipped: vec![],
            },
        );

        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["entries"][0]["asset"], "token");
        assert_eq!(json["entries"][0]["amount"], "1000");
        assert_eq!(json["entries"][0]["sourceLogIndex"], 3);
        assert_eq!(json["entries"][1]["asset"], "native");
        assert_eq!(json["entries"][1]["callDepth"], 1);
        assert_eq!(json["entries"][1]["kind"], "call");
        assert_eq!(json["entries"][1]["txIndex"], 2);
    }
}
