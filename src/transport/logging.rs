// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for Alloy RPC providers.
//!
//! Each request packet gets an `rpc_call` span carrying the method, the
//! request id and, once the response arrives, the latency. JSON-RPC error
//! payloads are logged at `warn` even though the transport itself succeeded,
//! since a traced block that fails on the node comes back that way.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use alloy_json_rpc::{RequestPacket, Response, ResponsePacket, ResponsePayload};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, trace, warn, Instrument};

/// A Tower layer that records every RPC round trip.
///
/// # Example
///
/// ```rust,ignore
/// use blockledger::transport::LoggingLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// let client = ClientBuilder::default()
///     .layer(LoggingLayer::new().with_payloads())
///     .http(rpc_url);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoggingLayer {
    /// Log full request and response packets at `trace`. Block traces are large.
    log_payloads: bool,
}

impl LoggingLayer {
    /// Creates a layer that logs method, id, latency and errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log the full packets at `trace` level.
    pub fn with_payloads(mut self) -> Self {
        self.log_payloads = true;
        self
    }

    /// Whether full packets are logged
    pub fn logs_payloads(&self) -> bool {
        self.log_payloads
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            log_payloads: self.log_payloads,
        }
    }
}

/// A Tower service that logs RPC requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    log_payloads: bool,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let log_payloads = self.log_payloads;
        let mut service = self.service.clone();

        let (method, id) = describe_request(&request);
        let span = tracing::info_span!(
            "rpc_call",
            method = %method,
            id = %id,
            latency_ms = tracing::field::Empty,
        );

        Box::pin(
            async move {
                if log_payloads {
                    trace!(request = ?request, "RPC request");
                } else {
                    debug!("RPC request");
                }

                let start = Instant::now();
                let result = service.call(request).await;
                let latency_ms = start.elapsed().as_millis() as u64;
                tracing::Span::current().record("latency_ms", latency_ms);

                match &result {
                    Ok(response) => {
                        for (code, message) in error_payloads(response) {
                            warn!(code, message, latency_ms, "RPC error response");
                        }
                        if log_payloads {
                            trace!(response = ?response, latency_ms, "RPC response");
                        } else {
                            debug!(latency_ms, "RPC response");
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, latency_ms, "RPC transport error");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Method name and request id of a packet, for span fields.
fn describe_request(request: &RequestPacket) -> (String, String) {
    match request {
        RequestPacket::Single(req) => (req.method().to_string(), req.id().to_string()),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => ("batch(empty)".to_string(), "-".to_string()),
            [req] => (req.method().to_string(), req.id().to_string()),
            _ => (format!("batch({} calls)", reqs.len()), "-".to_string()),
        },
    }
}

/// `(code, message)` of every error payload in a response packet.
fn error_payloads(response: &ResponsePacket) -> Vec<(i64, String)> {
    fn failure(response: &Response) -> Option<(i64, String)> {
        match &response.payload {
            ResponsePayload::Failure(payload) => Some((payload.code, payload.message.to_string())),
            ResponsePayload::Success(_) => None,
        }
    }

    match response {
        ResponsePacket::Single(single) => failure(single).into_iter().collect(),
        ResponsePacket::Batch(batch) => batch.iter().filter_map(failure).collect(),
    }
}
