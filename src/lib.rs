// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # Blockledger: every value transfer in an EVM block
//!
//! Token transfers are visible in event logs; native value moved by contract
//! code is not. Blockledger reconstructs both for one block and merges them
//! into a single ordered [`Ledger`].
//!
//! ## Pipelines
//!
//! - [`LogTransferDecoder`]: one `eth_getLogs` query scoped to the block hash
//!   and the `Transfer(address,address,uint256)` topic, decoded into
//!   [`TokenTransfer`]s in log-index order
//! - [`CallTraceCollector`]: one `debug_traceBlockByHash` request with a
//!   JavaScript tracer that records each transaction's top-level value
//!   transfer and every `CALL` opcode, flattened into [`NativeTransfer`]s
//! - [`ResultNormalizer`]: concatenates the two, tokens first
//!
//! [`BlockLedgerScanner`] runs both pipelines concurrently and merges them.
//!
//! Malformed individual records never fail a pipeline. They are left out of
//! the results and reported as [`SkippedRecord`]s.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blockledger::provider::{create_http_provider, ProviderConfig};
//! use blockledger::{BlockLedgerScanner, LedgerConfig, LedgerEntry};
//!
//! let provider = create_http_provider(ProviderConfig::new("http://localhost:8545"))?;
//! let scanner = BlockLedgerScanner::new(provider, LedgerConfig::for_local_node());
//!
//! let ledger = scanner.scan(block_hash).await?;
//! for entry in ledger.entries() {
//!     match entry {
//!         LedgerEntry::Token(t) => println!("ERC20 Transfer from={} to={} amount={}", t.from, t.to, t.amount),
//!         LedgerEntry::Native(n) => println!("native transfer from={} to={} amount={}", n.from, n.to, n.amount),
//!     }
//! }
//! ```
//!
//! ## Node requirements
//!
//! Native transfers need the `debug` namespace with JavaScript tracer support
//! (geth and compatible clients). Block traces are slow on large blocks;
//! [`LedgerConfig::for_local_node`] raises both timeouts accordingly.

pub mod config;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod provider;
pub mod scanner;
mod spans;
pub mod trace;
pub mod transport;
pub mod types;

pub use config::{LedgerConfig, LedgerConfigBuilder};
pub use errors::{
    LedgerError, MalformedEventError, MalformedTraceError, NativeTransferError, RpcError,
    TokenTransferError,
};
pub use events::{
    decode_transfer_log, decode_transfer_logs, encode_transfer_log, EventSignature,
    LogTransferDecoder, Transfer,
};
pub use ledger::{Ledger, LedgerEntry, ResultNormalizer};
pub use scanner::BlockLedgerScanner;
pub use trace::{flatten_trace_result, CallTraceCollector};
pub use types::address::{
    address_from_be_bytes, address_from_decimal, address_from_hex, address_from_word,
    address_to_decimal, AddressParseError,
};
pub use types::amount::{Amount, AmountParseError};
pub use types::extraction::{Extraction, RecordLocation, SkipReason, SkippedRecord};
pub use types::transfers::{NativeTransfer, NativeTransferKind, TokenTransfer};
