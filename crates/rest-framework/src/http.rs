//! # HTTP Transport
//!
//! The production [`Transport`], backed by a shared `reqwest::Client`.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, instrument};

use crate::error::TransportError;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Sends requests over HTTP(S). Cheap to clone; clones share one connection pool.
#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest::Client` (proxies, custom TLS roots, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = request.path()))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.clone());
        if let Some(header) = request.authorization_header() {
            builder = builder.header(AUTHORIZATION, header);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        debug!(status, bytes = body.len(), "Received response");

        Ok(ApiResponse { status, body })
    }
}
