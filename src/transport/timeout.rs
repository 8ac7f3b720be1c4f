// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based request timeout for Alloy RPC providers.
//!
//! Bounds every packet at the transport, below any per-operation timeout the
//! pipelines apply. Expiry surfaces as a transport error, so it is reported
//! like any other failed round trip.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::{TransportError, TransportErrorKind};
use tower::Layer;

/// A Tower layer that fails requests taking longer than a fixed duration.
///
/// # Example
///
/// ```rust,ignore
/// use blockledger::transport::TimeoutLayer;
/// use alloy_rpc_client::ClientBuilder;
/// use std::time::Duration;
///
/// let client = ClientBuilder::default()
///     .layer(TimeoutLayer::new(Duration::from_secs(30)))
///     .http(rpc_url);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TimeoutLayer {
    timeout: Duration,
}

impl TimeoutLayer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, service: S) -> Self::Service {
        TimeoutService {
            service,
            timeout: self.timeout,
        }
    }
}

/// A Tower service that fails requests taking longer than its timeout.
#[derive(Clone, Debug)]
pub struct TimeoutService<S> {
    service: S,
    timeout: Duration,
}

impl<S> tower::Service<RequestPacket> for TimeoutService<S>
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
        let timeout = self.timeout;
        let call = self.service.call(request);

        Box::pin(async move {
            tokio::time::timeout(timeout, call)
                .await
                .map_err(|_| timeout_error(timeout))?
        })
    }
}

fn timeout_error(timeout: Duration) -> TransportError {
    TransportErrorKind::custom_str(&format!("request timed out after {timeout:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_error_names_duration() {
        let error = timeout_error(Duration::from_millis(250));
        assert!(error.to_string().contains("250ms"), "{error}");
    }

    #[test]
    fn test_layer_keeps_duration() {
        assert_eq!(
            TimeoutLayer::new(Duration::from_secs(3)).timeout(),
            Duration::from_secs(3)
        );
    }
}
