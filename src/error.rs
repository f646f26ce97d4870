//! Error types for the movie client.

use rest_framework::{ApiError, StoreError, GENERIC_ERROR_MESSAGE};
use thiserror::Error;

/// Errors that can occur during client operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MyFlixError {
    /// The API call failed; see [`ApiError`] for the category.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Ambient storage could not be read or written.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// An authenticated call was made without a token in the session.
    #[error("No token in session; log in first")]
    NotLoggedIn,

    /// A call on the current user was made without a username in the session.
    #[error("No username in session")]
    MissingUsername,
}

impl MyFlixError {
    /// The message to show a user.
    pub fn user_message(&self) -> &'static str {
        match self {
            MyFlixError::NotLoggedIn | MyFlixError::MissingUsername => "Please log in to continue.",
            _ => GENERIC_ERROR_MESSAGE,
        }
    }
}

/// Errors reading [`ClientConfig`](crate::config::ClientConfig) from the environment.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("Invalid value {value:?} for {key}")]
    InvalidNumber { key: &'static str, value: String },
}
