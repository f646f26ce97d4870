//! # Framework Errors
//!
//! This module defines the common error types used throughout the REST framework.
//! Each failure category gets its own variant so callers can match on what went
//! wrong, while [`ApiError::user_message`] still gives the UI one fixed string.

/// The message shown to users for any failed API call.
pub const GENERIC_ERROR_MESSAGE: &str = "Something bad happened; please try again later.";

/// The transport could not produce a response at all.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors surfaced by [`ApiClient`](crate::ApiClient) operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ApiError {
    /// No response reached the client (DNS, connection refused, TLS, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("Server responded with status {status}")]
    Server { status: u16, body: String },

    /// The response body did not match the expected schema.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The request could not be built (bad base URL, unserializable body).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// The user-facing message. Identical for every variant.
    pub fn user_message(&self) -> &'static str {
        GENERIC_ERROR_MESSAGE
    }

    /// HTTP status for server-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Network(e.0)
    }
}

/// Errors that can occur while talking to the [`StoreActor`](crate::StoreActor).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Failed to persist store: {0}")]
    Persistence(String),
}
