//! The explicit session context passed into every authenticated call.
//!
//! A [`Session`] is a snapshot of the `token` and `username` entries of ambient
//! storage. Load it right before making calls; a session held for a long time can
//! go stale if another writer logs in or out in the meantime.

use rest_framework::StoreClient;
use std::fmt;

use crate::error::MyFlixError;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the logged-in username.
pub const USERNAME_KEY: &str = "username";

#[derive(Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    username: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    /// A session with no token and no username.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: None,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token, or [`MyFlixError::NotLoggedIn`].
    pub fn token(&self) -> Result<&str, MyFlixError> {
        self.token.as_deref().ok_or(MyFlixError::NotLoggedIn)
    }

    /// The session username, or [`MyFlixError::MissingUsername`].
    pub fn username(&self) -> Result<&str, MyFlixError> {
        self.username.as_deref().ok_or(MyFlixError::MissingUsername)
    }

    /// Reads both keys from ambient storage.
    pub async fn load(store: &StoreClient) -> Result<Self, MyFlixError> {
        Ok(Self {
            token: store.get(TOKEN_KEY).await?,
            username: store.get(USERNAME_KEY).await?,
        })
    }

    /// Writes both keys to ambient storage. Absent values are removed.
    ///
    /// The token is written last and cleared first, so a save that fails halfway
    /// never leaves a token without its username.
    pub async fn save(&self, store: &StoreClient) -> Result<(), MyFlixError> {
        match &self.token {
            Some(token) => {
                self.save_username(store).await?;
                store.set(TOKEN_KEY, token.as_str()).await?;
            }
            None => {
                store.remove(TOKEN_KEY).await?;
                self.save_username(store).await?;
            }
        }
        Ok(())
    }

    async fn save_username(&self, store: &StoreClient) -> Result<(), MyFlixError> {
        match &self.username {
            Some(username) => store.set(USERNAME_KEY, username.as_str()).await?,
            None => {
                store.remove(USERNAME_KEY).await?;
            }
        }
        Ok(())
    }
}

// Tokens stay out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .finish()
    }
}
