// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for the block ledger.
//!
//! - Address normalization across node encodings
//! - Amounts carried as exact integers
//! - Token and native transfer records
//! - Extraction results with skipped-record diagnostics

pub mod address;
pub mod amount;
pub mod extraction;
pub mod transfers;

// Note: Public types are re-exported from lib.rs, not here
