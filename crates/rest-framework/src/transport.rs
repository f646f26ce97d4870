//! # Transport Seam
//!
//! This module defines the request/response types exchanged between the
//! [`ApiClient`](crate::ApiClient) and whatever actually moves bytes over the wire.
//!
//! The client never talks to `reqwest` directly. It builds an [`ApiRequest`] and hands
//! it to a [`Transport`]. Production code uses [`HttpTransport`](crate::HttpTransport);
//! tests use the doubles in [`mock`](crate::mock).

use async_trait::async_trait;
use reqwest::Url;
use std::fmt;

use crate::error::TransportError;

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully built request, ready to be sent.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    /// Bearer token for the `Authorization` header, if the call is authenticated.
    pub bearer: Option<String>,
    /// JSON body, if any.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            bearer: None,
            body: None,
        }
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The value of the `Authorization` header, e.g. `Bearer abc`.
    pub fn authorization_header(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {}", token))
    }

    /// Percent-encoded request path, e.g. `/users/alice/movies`.
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

// Tokens stay out of logs.
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("authenticated", &self.bearer.is_some())
            .field("body", &self.body)
            .finish()
    }
}

/// Raw response: status code plus body text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A response carrying `value` serialized as JSON.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can turn an [`ApiRequest`] into an [`ApiResponse`].
///
/// Implementations report only failures where no response was obtained. A 4xx/5xx
/// answer is still `Ok`; classifying it is the client's job.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
