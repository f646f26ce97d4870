//! # ApiResource Trait
//!
//! Provides a common interface for resource-specific clients, adding default
//! authenticated `fetch` and `remove` methods built on top of a shared [`ApiClient`].
use crate::{ApiClient, ApiError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Trait for resource-specific clients to inherit standard authenticated reads and deletes.
///
/// # Example
///
/// ```rust
/// use rest_framework::{ApiClient, ApiError, ApiResource};
/// use async_trait::async_trait;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Book { title: String }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error(transparent)]
/// struct BookError(#[from] ApiError);
///
/// struct BookClient { api: ApiClient }
///
/// #[async_trait]
/// impl ApiResource for BookClient {
///     type Error = BookError;
///
///     fn api(&self) -> &ApiClient {
///         &self.api
///     }
/// }
///
/// async fn usage(client: BookClient) -> Result<Book, BookError> {
///     // fetch() and remove() are provided automatically
///     client.fetch(&["books", "dune"], "token").await
/// }
/// ```
#[async_trait]
pub trait ApiResource: Send + Sync {
    /// The resource-specific error type.
    type Error: From<ApiError> + Send;

    /// Access the shared [`ApiClient`].
    fn api(&self) -> &ApiClient;

    /// `GET` the resource at `segments` with a bearer token.
    #[tracing::instrument(skip(self, token))]
    async fn fetch<T>(&self, segments: &[&str], token: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned + Send + 'static,
    {
        tracing::debug!("Sending request");
        self.api()
            .get(segments, Some(token))
            .await
            .map_err(Self::Error::from)
    }

    /// `DELETE` the resource at `segments` with a bearer token.
    #[tracing::instrument(skip(self, token))]
    async fn remove<T>(&self, segments: &[&str], token: &str) -> Result<T, Self::Error>
    where
        T: DeserializeOwned + Send + 'static,
    {
        tracing::debug!("Sending request");
        self.api()
            .delete(segments, Some(token))
            .await
            .map_err(Self::Error::from)
    }
}
