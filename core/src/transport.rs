//! The network side of the host-does-IO split.
//!
//! A `Transport` turns an `HttpRequest` into an `HttpResponse`. It reports
//! every HTTP status as data; only failures that leave no response at all
//! (DNS, connect, TLS, timeouts, unreadable body) are errors.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::http::{HttpRequest, HttpResponse};

/// Failure below the HTTP layer, message kept as the transport reported it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (timeouts, proxies, user agent).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        debug!(status, bytes = body.len(), "crossword response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
