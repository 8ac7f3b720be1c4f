// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for blockledger integration tests
//!
//! [`MockNode`] is a `wiremock` server speaking just enough JSON-RPC for the
//! two pipelines: it echoes each request's id and answers by method name.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, B256, U256};
use blockledger::provider::{create_http_provider, HttpProvider, ProviderConfig};
use blockledger::Transfer;
use alloy_sol_types::SolEvent;
use serde_json::{json, Value};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// How the mock node answers one JSON-RPC method
#[derive(Clone, Debug)]
pub enum Reply {
    /// `{"result": value}`
    Result(Value),
    /// `{"error": {"code": .., "message": ..}}`
    Error { code: i64, message: String },
    /// `{"error": null, "result": value}`, as some nodes answer successful traces
    NullError(Value),
    /// `{"error": "message"}`, as some nodes report tracer failures
    StringError(String),
    /// A non-200 HTTP response with no JSON-RPC body
    Status(u16),
    /// `{"result": value}` after a delay
    Delayed(Value, Duration),
}

/// `wiremock` responder dispatching on the JSON-RPC method
#[derive(Clone, Debug, Default)]
pub struct JsonRpcResponder {
    replies: HashMap<String, Reply>,
}

impl JsonRpcResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, rpc_method: &str, reply: Reply) -> Self {
        self.replies.insert(rpc_method.to_string(), reply);
        self
    }
}

impl Respond for JsonRpcResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let id = body["id"].clone();
        let rpc_method = body["method"].as_str().unwrap_or_default();

        match self.replies.get(rpc_method) {
            Some(Reply::Result(result)) => ResponseTemplate::new(200)
                .set_body_json(json!({ "jsonrpc": "2.0", "id": id, "result": result })),
            Some(Reply::Error { code, message }) => ResponseTemplate::new(200).set_body_json(
                json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } }),
            ),
            Some(Reply::NullError(result)) => ResponseTemplate::new(200).set_body_json(
                json!({ "jsonrpc": "2.0", "id": id, "error": null, "result": result }),
            ),
            Some(Reply::StringError(message)) => ResponseTemplate::new(200)
                .set_body_json(json!({ "jsonrpc": "2.0", "id": id, "error": message })),
            Some(Reply::Status(status)) => ResponseTemplate::new(*status),
            Some(Reply::Delayed(result, delay)) => ResponseTemplate::new(200)
                .set_body_json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
                .set_delay(*delay),
            None => ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("the method {rpc_method} does not exist") }
            })),
        }
    }
}

/// A running mock node and a provider pointed at it
pub struct MockNode {
    pub server: MockServer,
    pub provider: HttpProvider,
}

impl MockNode {
    pub async fn start(responder: JsonRpcResponder) -> Self {
        Self::start_with(responder, |uri| ProviderConfig::new(uri).with_logging()).await
    }

    /// Start a node whose provider is built from `config(server_uri)`
    pub async fn start_with(
        responder: JsonRpcResponder,
        config: impl FnOnce(String) -> ProviderConfig,
    ) -> Self {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(responder)
            .mount(&server)
            .await;

        let provider = create_http_provider(config(server.uri()))
            .expect("mock server uri is a valid url");

        Self { server, provider }
    }

    /// Parsed bodies of every request received so far with the given method
    pub async fn requests(&self, rpc_method: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice::<Value>(&request.body).ok())
            .filter(|body| body["method"] == rpc_method)
            .collect()
    }
}

/// An RPC-format `Transfer` log as returned by `eth_getLogs`
pub fn transfer_log_json(
    token: Address,
    from: Address,
    to: Address,
    amount: U256,
    log_index: u64,
) -> Value {
    log_json(
        token,
        vec![Transfer::SIGNATURE_HASH, from.into_word(), to.into_word()],
        B256::from(amount.to_be_bytes::<32>()).to_string(),
        Some(log_index),
    )
}

/// An RPC-format log with arbitrary topics and data
pub fn log_json(token: Address, topics: Vec<B256>, data: String, log_index: Option<u64>) -> Value {
    let mut log = json!({
        "address": token,
        "topics": topics,
        "data": data,
        "blockHash": block_hash(),
        "blockNumber": "0x10",
        "transactionHash": B256::repeat_byte(0x77),
        "transactionIndex": "0x0",
        "removed": false,
    });
    if let Some(index) = log_index {
        log["logIndex"] = json!(format!("{index:#x}"));
    }
    log
}

/// The block every test scans
pub fn block_hash() -> B256 {
    B256::repeat_byte(0xb1)
}

pub fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// Collects formatted `tracing` output for assertions on what was logged
#[derive(Clone, Debug, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// A plain-text subscriber writing into this capture
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let writer = self.clone();
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
