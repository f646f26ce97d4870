//! # Key-Value Store Actor
//!
//! Client-local key-value storage, run as an actor.
//!
//! The [`StoreActor`] owns the map and the receiving end of a channel and processes
//! one [`StoreRequest`] at a time, so no lock guards the map. A [`StoreClient`] is the
//! cloneable handle everybody else holds.
//!
//! With [`StoreActor::persistent`], the map is loaded from a JSON file when the actor
//! starts and written back after every mutation, so values survive restarts.
//!
//! ```rust
//! use rest_framework::StoreActor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, store) = StoreActor::new(8);
//!     let handle = tokio::spawn(actor.run());
//!
//!     store.set("token", "abc").await.unwrap();
//!     assert_eq!(store.get("token").await.unwrap().as_deref(), Some("abc"));
//!
//!     drop(store);
//!     handle.await.unwrap();
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::StoreError;

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Messages understood by the [`StoreActor`].
#[derive(Debug)]
pub enum StoreRequest {
    Get {
        key: String,
        respond_to: Response<Option<String>>,
    },
    Set {
        key: String,
        value: String,
        respond_to: Response<()>,
    },
    Remove {
        key: String,
        respond_to: Response<Option<String>>,
    },
    Snapshot {
        respond_to: Response<HashMap<String, String>>,
    },
}

/// The server half: owns the map and, optionally, the backing file.
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    entries: HashMap<String, String>,
    path: Option<PathBuf>,
}

impl StoreActor {
    /// Creates an in-memory store and its client.
    ///
    /// `buffer_size` is the channel capacity; when full, client calls wait.
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            entries: HashMap::new(),
            path: None,
        };
        (actor, StoreClient::new(sender))
    }

    /// Creates a store backed by the JSON file at `path`.
    pub fn persistent(buffer_size: usize, path: impl Into<PathBuf>) -> (Self, StoreClient) {
        let (mut actor, client) = Self::new(buffer_size);
        actor.path = Some(path.into());
        (actor, client)
    }

    /// Runs the event loop until every [`StoreClient`] is dropped.
    pub async fn run(mut self) {
        if let Some(path) = &self.path {
            self.entries = load(path).await;
        }
        info!(size = self.entries.len(), persistent = self.path.is_some(), "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get { key, respond_to } => {
                    let value = self.entries.get(&key).cloned();
                    debug!(%key, found = value.is_some(), "Get");
                    let _ = respond_to.send(Ok(value));
                }
                StoreRequest::Set {
                    key,
                    value,
                    respond_to,
                } => {
                    debug!(%key, "Set");
                    let previous = self.entries.insert(key.clone(), value);
                    let result = self.persist().await;
                    if result.is_err() {
                        self.restore(key, previous);
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Remove { key, respond_to } => {
                    let previous = self.entries.remove(&key);
                    debug!(%key, found = previous.is_some(), "Remove");
                    let result = match self.persist().await {
                        Ok(()) => Ok(previous),
                        Err(e) => {
                            self.restore(key, previous);
                            Err(e)
                        }
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.entries.clone()));
                }
            }
        }

        info!(size = self.entries.len(), "Store shutdown");
    }

    /// Undoes a mutation whose write to disk failed, so memory matches the file.
    fn restore(&mut self, key: String, previous: Option<String>) {
        match previous {
            Some(value) => {
                self.entries.insert(key, value);
            }
            None => {
                self.entries.remove(&key);
            }
        }
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StoreError::Persistence(e.to_string()))?;
        tokio::fs::write(path, json).await.map_err(|e| {
            warn!(path = %path.display(), error = %e, "Persist failed");
            StoreError::Persistence(e.to_string())
        })
    }
}

async fn load(path: &Path) -> HashMap<String, String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable store file");
            HashMap::new()
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable store file");
            HashMap::new()
        }
    }
}

/// A cloneable handle to a running [`StoreActor`].
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Get {
                key: key.to_string(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn set(&self, key: &str, value: impl Into<String>) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Set {
                key: key.to_string(),
                value: value.into(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Removes `key`, returning its previous value.
    pub async fn remove(&self, key: &str) -> Result<Option<String>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Remove {
                key: key.to_string(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// A copy of every entry at this instant.
    pub async fn snapshot(&self) -> Result<HashMap<String, String>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}
