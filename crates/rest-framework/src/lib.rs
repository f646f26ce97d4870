//! # REST Framework
//!
//! This crate provides the foundational building blocks for typed clients of a remote
//! REST API: a transport seam, a typed client with one shared error handler, a small
//! key-value store actor for client-local state, and test doubles.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Transport Layer** ([`Transport`]) - Moves an [`ApiRequest`] over the wire.
//!    [`HttpTransport`] does it with `reqwest`; [`mock`] does it in memory.
//! 2. **Client Layer** ([`ApiClient`]) - Builds URLs, attaches bearer tokens, sends one
//!    request per call, and decodes or classifies the outcome.
//! 3. **Resource Layer** ([`ApiResource`]) - Domain clients implement this trait to get
//!    authenticated `fetch`/`remove` for free.
//!
//! Client-local state (tokens, usernames) lives in a [`StoreActor`], reached through a
//! cloneable [`StoreClient`].
//!
//! ## Error Handling
//!
//! Every failed call becomes an [`ApiError`] with a distinct variant per category
//! (network, server status, decode, invalid request). Whatever the category,
//! [`ApiError::user_message`] returns the same fixed string for display.
//!
//! ## Example
//!
//! ```rust
//! use rest_framework::mock::MockTransport;
//! use rest_framework::{ApiClient, Method};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(Method::Get, "/genres/Drama")
//!         .return_json(200, json!({ "Title": "Drama" }));
//!
//!     let client = ApiClient::new("https://api.example.com/".parse().unwrap(), Arc::new(mock));
//!     let genre: serde_json::Value = client.get(&["genres", "Drama"], Some("abc")).await.unwrap();
//!     assert_eq!(genre["Title"], "Drama");
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for [`MockTransport`](mock::MockTransport) and the
//! channel-based helpers.

pub mod client;
pub mod client_trait;
pub mod error;
pub mod http;
pub mod mock;
pub mod store;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use client::ApiClient;
pub use client_trait::ApiResource;
pub use error::{ApiError, StoreError, TransportError, GENERIC_ERROR_MESSAGE};
pub use http::HttpTransport;
pub use store::{StoreActor, StoreClient, StoreRequest};
pub use transport::{ApiRequest, ApiResponse, Method, Transport};
