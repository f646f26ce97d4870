//! # Movie List View
//!
//! Loads the catalog when activated and keeps it as display records.
//!
//! ```rust,ignore
//! let mut view = app.movie_list_view(LogDialog);
//! view.init().await?;
//! for movie in view.movies() {
//!     println!("{} ({}) by {}", movie.title, movie.genre, movie.director);
//! }
//! view.open_movie_director_dialog(&movie.title, &movie.director);
//! ```
use rest_framework::StoreClient;
use tracing::{debug, info, instrument, warn};

use crate::clients::MovieClient;
use crate::error::MyFlixError;
use crate::model::{display_movies, DisplayMovie};
use crate::session::Session;
use crate::view::dialog::{DialogKind, DialogPayload, DialogRequest, DialogService, DIALOG_WIDTH};

pub struct MovieListView<D: DialogService> {
    movie_client: MovieClient,
    store: StoreClient,
    dialog: D,
    movies: Vec<DisplayMovie>,
}

impl<D: DialogService> MovieListView<D> {
    pub fn new(movie_client: MovieClient, store: StoreClient, dialog: D) -> Self {
        Self {
            movie_client,
            store,
            dialog,
            movies: Vec::new(),
        }
    }

    /// Activation hook: loads the movie list.
    pub async fn init(&mut self) -> Result<(), MyFlixError> {
        self.get_movies().await
    }

    /// Fetches all movies if a token is stored; otherwise does nothing.
    ///
    /// On failure the previous list is kept and the error is returned.
    #[instrument(skip(self))]
    pub async fn get_movies(&mut self) -> Result<(), MyFlixError> {
        let session = Session::load(&self.store).await?;
        if !session.has_token() {
            debug!("No token stored, skipping movie fetch");
            return Ok(());
        }

        match self.movie_client.get_all_movies(&session).await {
            Ok(movies) => {
                self.movies = display_movies(movies);
                info!(count = self.movies.len(), "Movie list loaded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Movie list unavailable");
                Err(e)
            }
        }
    }

    /// The movies currently shown, in API order.
    pub fn movies(&self) -> &[DisplayMovie] {
        &self.movies
    }

    pub fn open_movie_description_dialog(&self, title: &str, description: &str) {
        self.dialog.open(DialogRequest {
            kind: DialogKind::MovieDescription,
            data: DialogPayload::Description {
                title: title.to_string(),
                description: description.to_string(),
            },
            width: DIALOG_WIDTH,
        });
    }

    pub fn open_movie_director_dialog(&self, title: &str, director: &str) {
        self.dialog.open(DialogRequest {
            kind: DialogKind::MovieDirector,
            data: DialogPayload::Director {
                title: title.to_string(),
                director: director.to_string(),
            },
            width: DIALOG_WIDTH,
        });
    }
}
