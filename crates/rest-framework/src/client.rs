//! # Generic Client
//!
//! This module defines [`ApiClient`], the typed front door to a REST API.
//!
//! Every operation goes through the same pipeline:
//!
//! 1. Build the URL from the base URL plus percent-encoded path segments.
//! 2. Attach the bearer token and JSON body, if any.
//! 3. Send exactly one request through the [`Transport`].
//! 4. Run the outcome through the shared error handler; decode successes.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::{ApiError, TransportError};
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// A cloneable, typed client over any [`Transport`].
///
/// * **Cloneable** – holds the base URL and an `Arc` to the transport.
/// * **Typed** – results are decoded into the caller's `DeserializeOwned` type.
/// * **Uniform errors** – every failure is an [`ApiError`].
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `segments` onto the base URL, percent-encoding each one.
    ///
    /// A segment containing `/` stays a single segment (`a/b` becomes `a%2Fb`).
    pub fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::InvalidRequest(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<T>(&self, segments: &[&str], bearer: Option<&str>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(Method::Get, segments, None, bearer).await?;
        extract_response_data(response)
    }

    pub async fn post<B, T>(
        &self,
        segments: &[&str],
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        let response = self
            .execute(Method::Post, segments, Some(body), bearer)
            .await?;
        extract_response_data(response)
    }

    pub async fn put<B, T>(
        &self,
        segments: &[&str],
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        let response = self
            .execute(Method::Put, segments, Some(body), bearer)
            .await?;
        extract_response_data(response)
    }

    pub async fn delete<T>(&self, segments: &[&str], bearer: Option<&str>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.execute(Method::Delete, segments, None, bearer).await?;
        extract_response_data(response)
    }

    /// `DELETE` for endpoints that answer with plain text rather than JSON.
    pub async fn delete_text(
        &self,
        segments: &[&str],
        bearer: Option<&str>,
    ) -> Result<String, ApiError> {
        let response = self.execute(Method::Delete, segments, None, bearer).await?;
        Ok(response.body)
    }

    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<serde_json::Value>,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        let mut request = ApiRequest::new(method, self.url(segments)?);
        if let Some(token) = bearer {
            request = request.with_bearer(token);
        }
        if let Some(body) = body {
            request = request.with_body(body);
        }
        debug!(%method, path = request.path(), "Sending request");

        let outcome = self.transport.send(request).await;
        handle_error(outcome)
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

/// The single funnel for failures: logs the detail, returns a categorized error.
fn handle_error(outcome: Result<ApiResponse, TransportError>) -> Result<ApiResponse, ApiError> {
    match outcome {
        Ok(response) if response.is_success() => Ok(response),
        Ok(response) => {
            error!(
                status = response.status,
                body = %response.body,
                "Error response from server"
            );
            Err(ApiError::Server {
                status: response.status,
                body: response.body,
            })
        }
        Err(e) => {
            error!(error = %e, "Some error occurred");
            Err(ApiError::from(e))
        }
    }
}

/// Decodes a success body. An absent body is read as `{}`.
fn extract_response_data<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ApiError> {
    let body = if response.body.trim().is_empty() {
        "{}"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(|e| {
        error!(error = %e, "Response did not match the expected shape");
        ApiError::Decode(e.to_string())
    })
}
