//! # Movie Client
//!
//! Read-only access to the catalog: movies, directors and genres.
//! Every call needs a token in the [`Session`].
use async_trait::async_trait;
use rest_framework::{ApiClient, ApiResource};
use tracing::{debug, instrument};

use crate::error::MyFlixError;
use crate::model::{Director, Genre, Movie};
use crate::session::Session;

/// Client for the catalog endpoints.
#[derive(Clone)]
pub struct MovieClient {
    api: ApiClient,
}

impl MovieClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ApiResource for MovieClient {
    type Error = MyFlixError;

    fn api(&self) -> &ApiClient {
        &self.api
    }
}

impl MovieClient {
    /// `GET movies`
    #[instrument(skip(self, session))]
    pub async fn get_all_movies(&self, session: &Session) -> Result<Vec<Movie>, MyFlixError> {
        let movies: Vec<Movie> = self.fetch(&["movies"], session.token()?).await?;
        debug!(count = movies.len(), "Fetched movies");
        Ok(movies)
    }

    /// `GET movies/{title}`
    #[instrument(skip(self, session))]
    pub async fn get_movie(&self, session: &Session, title: &str) -> Result<Movie, MyFlixError> {
        self.fetch(&["movies", title], session.token()?).await
    }

    /// `GET directors/{name}`
    #[instrument(skip(self, session))]
    pub async fn get_director(
        &self,
        session: &Session,
        name: &str,
    ) -> Result<Director, MyFlixError> {
        self.fetch(&["directors", name], session.token()?).await
    }

    /// `GET genres/{name}`
    #[instrument(skip(self, session))]
    pub async fn get_genre(&self, session: &Session, name: &str) -> Result<Genre, MyFlixError> {
        self.fetch(&["genres", name], session.token()?).await
    }
}
