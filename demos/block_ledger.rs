// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

/// Example printing every value transfer in one block
///
/// This example shows how to:
/// 1. Create an HTTP provider with RPC logging
/// 2. Run both pipelines with a BlockLedgerScanner
/// 3. Walk the merged ledger and report skipped records
///
/// Run with:
/// ```bash
/// RPC_URL=http://localhost:8545 \
/// BLOCK_HASH=0x... \
/// RUST_LOG=info,blockledger=debug \
/// cargo run --example block_ledger
/// ```
///
/// The node must expose `debug_traceBlockByHash` with JavaScript tracers.
/// Set `TRACE_TIMEOUT` (e.g. `120s`) to override the node-side tracer timeout.
use alloy_primitives::B256;
use anyhow::{Context, Result};
use blockledger::provider::{create_http_provider, ProviderConfig};
use blockledger::{BlockLedgerScanner, LedgerConfigBuilder, LedgerEntry};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {e}"))?;

    let rpc_url = env::var("RPC_URL").unwrap_or_else(|_| "http://localhost:8545".to_string());
    let block_hash: B256 = env::var("BLOCK_HASH")
        .context("BLOCK_HASH environment variable not set")?
        .parse()
        .context("BLOCK_HASH is not a 32-byte hex hash")?;

    let mut config = LedgerConfigBuilder::for_local_node();
    if let Ok(trace_timeout) = env::var("TRACE_TIMEOUT") {
        config = config.trace_timeout(trace_timeout);
    }
    let config = config.build();

    let provider = create_http_provider(ProviderConfig::new(&rpc_url).with_logging())?;
    let scanner = BlockLedgerScanner::new(provider, config);

    info!(%block_hash, rpc_url, "Scanning block");
    let ledger = scanner.scan(block_hash).await?;

    for entry in ledger.entries() {
        match entry {
            LedgerEntry::Token(t) => {
                println!("ERC20 Transfer from={} to={} amount={}", t.from, t.to, t.amount)
            }
            LedgerEntry::Native(n) => {
                println!("native transfer from={} to={} amount={}", n.from, n.to, n.amount)
            }
        }
    }

    for skipped in ledger.skipped() {
        println!("skipped {:?}: {}", skipped.location, skipped.reason);
    }

    Ok(())
}
