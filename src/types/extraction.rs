// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Pipeline output with diagnostics for skipped records
//!
//! A malformed log entry or trace record never aborts a pipeline. It is left
//! out of [`Extraction::records`] and described in [`Extraction::skipped`],
//! so a partial result always says what is missing.

use serde::{Serialize, Serializer};

use crate::errors::{MalformedEventError, MalformedTraceError};

/// Identifies the record that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum RecordLocation {
    /// A log entry, by its position in the node's response and its log index if known
    Log {
        position: usize,
        log_index: Option<u64>,
    },
    /// The transaction-level part of a trace result
    Transaction { tx_index: usize },
    /// One call record inside a transaction's trace result
    Call { tx_index: usize, call_index: usize },
}

/// Why a record was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error(transparent)]
    Event(#[from] MalformedEventError),
    #[error(transparent)]
    Trace(#[from] MalformedTraceError),
}

impl Serialize for SkipReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A record left out of an extraction, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub location: RecordLocation,
    pub reason: SkipReason,
}

impl SkippedRecord {
    pub fn new(location: RecordLocation, reason: impl Into<SkipReason>) -> Self {
        Self {
            location,
            reason: reason.into(),
        }
    }
}

/// Records decoded by one pipeline plus the ones it had to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> Extraction<T> {
    /// True when nothing was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl<T> Default for Extraction<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}
