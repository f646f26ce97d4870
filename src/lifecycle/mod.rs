//! # Application Lifecycle
//!
//! [`MyFlixApp`] is the conductor: it starts the ambient storage actor, builds the
//! transport and clients, hands out views, and shuts everything down again.
//!
//! ```rust,ignore
//! let app = MyFlixApp::new(ClientConfig::from_env()?);
//!
//! app.login(&LoginUser::new("alice", "secret")).await?;
//! let mut view = app.movie_list_view(LogDialog);
//! view.init().await?;
//!
//! drop(view);
//! app.shutdown().await?;
//! ```
//!
//! ## Shutdown
//!
//! The storage actor stops once every [`StoreClient`] is dropped. Views hold a
//! clone, so drop them before calling [`MyFlixApp::shutdown`].

use rest_framework::{ApiClient, HttpTransport, StoreActor, StoreClient, Transport};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::clients::{MovieClient, UserClient};
use crate::config::ClientConfig;
use crate::error::MyFlixError;
use crate::model::{LoginResponse, LoginUser};
use crate::session::Session;
use crate::view::{DialogService, MovieListView};

pub struct MyFlixApp {
    /// Catalog endpoints.
    pub movie_client: MovieClient,

    /// Account and favourites endpoints.
    pub user_client: UserClient,

    /// Ambient storage holding `token` and `username`.
    pub store: StoreClient,

    /// Task handle of the storage actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl MyFlixApp {
    /// Starts the app against the real API over HTTP.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Starts the app with any [`Transport`]. Must be called inside a Tokio runtime.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let (store_actor, store) = match &config.storage_path {
            Some(path) => StoreActor::persistent(config.store_buffer, path.clone()),
            None => StoreActor::new(config.store_buffer),
        };
        let handle = tokio::spawn(store_actor.run());

        let api = ApiClient::new(config.api_url, transport);
        info!(api_url = %api.base_url(), "Client started");

        Self {
            movie_client: MovieClient::new(api.clone()),
            user_client: UserClient::new(api),
            store,
            handle,
        }
    }

    /// The current session, read fresh from ambient storage.
    pub async fn session(&self) -> Result<Session, MyFlixError> {
        Session::load(&self.store).await
    }

    /// Logs in and stores the token and username for later calls.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginUser) -> Result<LoginResponse, MyFlixError> {
        let response = self.user_client.login(credentials).await?;
        Session::new(response.token.as_str(), response.user.username.as_str())
            .save(&self.store)
            .await?;
        Ok(response)
    }

    /// Forgets the stored token and username.
    pub async fn logout(&self) -> Result<(), MyFlixError> {
        Session::anonymous().save(&self.store).await?;
        info!("Logged out");
        Ok(())
    }

    /// Deletes the logged-in account, then clears the session.
    ///
    /// Once the server has deleted the account this returns its acknowledgement,
    /// even if clearing the stored session fails.
    pub async fn delete_account(&self) -> Result<String, MyFlixError> {
        let session = self.session().await?;
        let ack = self.user_client.delete_user(&session).await?;
        if let Err(e) = self.logout().await {
            warn!(error = %e, "Account deleted but session could not be cleared");
        }
        Ok(ack)
    }

    /// A movie list view wired to this app.
    pub fn movie_list_view<D: DialogService>(&self, dialog: D) -> MovieListView<D> {
        MovieListView::new(self.movie_client.clone(), self.store.clone(), dialog)
    }

    /// Drops the clients and waits for the storage actor to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down...");

        // Closing the last sender ends the store's event loop.
        drop(self.store);
        drop(self.movie_client);
        drop(self.user_client);

        if let Err(e) = self.handle.await {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
