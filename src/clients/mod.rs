//! Typed clients for the movie API, built on [`ApiClient`](rest_framework::ApiClient).

pub mod movie_client;
pub mod user_client;

pub use movie_client::*;
pub use user_client::*;
