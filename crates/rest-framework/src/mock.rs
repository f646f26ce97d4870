//! # Mock Framework
//!
//! Utilities for testing API clients without a network.
//!
//! ## When to use which
//!
//! | Helper | Style | Use Case |
//! |--------|-------|----------|
//! | [`MockTransport`] | Expectations queued up front | Most client and view tests |
//! | [`create_mock_transport`] + [`expect_request`] | Intercept and answer by hand | Inspecting a request before deciding the reply |
//!
//! ## Expectations
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
//!     mock.expect(Method::Get, "/movies").return_json(200, json!([]));
//!
//!     let base = "https://api.example.com/".parse().unwrap();
//!     let client = ApiClient::new(base, Arc::new(mock.clone()));
//!     let movies: Vec<serde_json::Value> = client.get(&["movies"], Some("abc")).await.unwrap();
//!     assert!(movies.is_empty());
//!
//!     mock.verify(); // all expectations were consumed
//! }
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

use crate::error::TransportError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

type Responder = Box<dyn Fn(&ApiRequest) -> ApiResponse + Send + Sync>;

enum Reply {
    Response(ApiResponse),
    Failure(TransportError),
    With(Responder),
}

/// One expected request, matched on method and percent-encoded path.
struct Expectation {
    method: Method,
    path: String,
    reply: Reply,
}

/// A transport that answers from a queue of expectations, in order.
///
/// Clones share the same queue and request log, so a test can keep one clone
/// for assertions while handing another to the code under test.
///
/// Panics on a request that does not match the next expectation.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with `method` on `path`, e.g. `"/users/alice"`.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        let expectation = self.expectations.lock().unwrap().pop_front();
        let Some(expectation) = expectation else {
            panic!("Unexpected request: {} {}", request.method, request.path());
        };
        if expectation.method != request.method || expectation.path != request.path() {
            panic!(
                "Expected {} {}, got {} {}",
                expectation.method,
                expectation.path,
                request.method,
                request.path()
            );
        }

        match expectation.reply {
            Reply::Response(response) => Ok(response),
            Reply::Failure(error) => Err(error),
            Reply::With(responder) => Ok(responder(&request)),
        }
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Answers with `status` and `value` as a JSON body.
    pub fn return_json(self, status: u16, value: serde_json::Value) {
        self.push(Reply::Response(ApiResponse::json(status, &value)));
    }

    /// Answers with `status` and a raw text body.
    pub fn return_status(self, status: u16, body: impl Into<String>) {
        self.push(Reply::Response(ApiResponse::new(status, body)));
    }

    /// Fails as if no response reached the client.
    pub fn return_err(self, error: TransportError) {
        self.push(Reply::Failure(error));
    }

    /// Builds the answer from the request, e.g. to echo a posted body.
    pub fn return_with<F>(self, responder: F)
    where
        F: Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static,
    {
        self.push(Reply::With(Box::new(responder)));
    }

    fn push(self, reply: Reply) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            method: self.method,
            path: self.path,
            reply,
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// A request waiting for the test to answer it.
pub type PendingRequest = (
    ApiRequest,
    oneshot::Sender<Result<ApiResponse, TransportError>>,
);

/// A transport that forwards every request to a channel the test controls.
#[derive(Clone)]
pub struct ChannelTransport {
    sender: mpsc::Sender<PendingRequest>,
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send((request, respond_to))
            .await
            .map_err(|_| TransportError::new("Mock receiver closed"))?;
        response
            .await
            .map_err(|_| TransportError::new("Mock dropped response channel"))?
    }
}

/// Creates a channel transport and the receiver for asserting requests.
///
/// The code under test runs in a spawned task; the test pulls each request off
/// the receiver with [`expect_request`], inspects it, and sends the reply.
pub fn create_mock_transport(
    buffer_size: usize,
) -> (ChannelTransport, mpsc::Receiver<PendingRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelTransport { sender }, receiver)
}

/// Helper to take the next request off the receiver.
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<PendingRequest>,
) -> Option<PendingRequest> {
    receiver.recv().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: Method, path: &str) -> ApiRequest {
        let url = format!("https://api.example.com{}", path).parse().unwrap();
        ApiRequest::new(method, url)
    }

    #[tokio::test]
    async fn test_mock_transport_answers_in_order() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/a").return_json(200, json!({ "n": 1 }));
        mock.expect(Method::Delete, "/b").return_status(404, "missing");

        let first = mock.send(request(Method::Get, "/a")).await.unwrap();
        assert_eq!(first.body, r#"{"n":1}"#);

        let second = mock.send(request(Method::Delete, "/b")).await.unwrap();
        assert_eq!(second.status, 404);

        assert_eq!(mock.requests().len(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_transport_return_with_sees_request() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/echo").return_with(|req| {
            ApiResponse::json(200, req.body.as_ref().unwrap_or(&serde_json::Value::Null))
        });

        let req = request(Method::Post, "/echo").with_body(json!({ "x": true }));
        let response = mock.send(req).await.unwrap();
        assert_eq!(response.body, r#"{"x":true}"#);
    }

    #[tokio::test]
    #[should_panic(expected = "Expected GET /a, got POST /a")]
    async fn test_mock_transport_panics_on_mismatch() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/a").return_status(200, "");
        let _ = mock.send(request(Method::Post, "/a")).await;
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_panics_with_leftovers() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "/a").return_status(200, "");
        mock.verify();
    }

    #[tokio::test]
    async fn test_channel_transport() {
        let (transport, mut receiver) = create_mock_transport(10);

        let send_task =
            tokio::spawn(async move { transport.send(request(Method::Get, "/movies")).await });

        let (req, responder) = expect_request(&mut receiver)
            .await
            .expect("Expected a request");
        assert_eq!(req.path(), "/movies");
        responder.send(Ok(ApiResponse::new(200, "[]"))).unwrap();

        let response = send_task.await.unwrap().unwrap();
        assert_eq!(response.body, "[]");
    }
}
