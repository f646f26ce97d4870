//! # MyFlix Client
//!
//! A typed client for the MyFlix movie API: sign up and log in, browse movies with
//! their directors and genres, and keep a list of favourite movies.
//!
//! ## Module Tour
//!
//! ### 1. The Records ([`model`])
//! Plain data mirroring the API's JSON, validated at the boundary by serde.
//! [`DisplayMovie`](model::DisplayMovie) is the flattened form the views show.
//!
//! ### 2. The Interface ([`clients`])
//! One method per endpoint. [`MovieClient`](clients::MovieClient) covers the catalog,
//! [`UserClient`](clients::UserClient) covers accounts and favourites. Both sit on
//! [`rest_framework::ApiClient`], which sends exactly one request per call and funnels
//! every failure through one error handler.
//!
//! ### 3. The Session ([`session`])
//! Authenticated calls take an explicit [`Session`](session::Session) rather than
//! reading a token from hidden global state. Sessions are loaded from ambient
//! storage (a [`rest_framework::StoreActor`]) right before use.
//!
//! ### 4. The Screens ([`view`])
//! [`MovieListView`](view::MovieListView) loads the catalog on activation and opens
//! detail dialogs through a [`DialogService`](view::DialogService).
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! [`MyFlixApp`](lifecycle::MyFlixApp) wires storage, transport, clients and views.
//!
//! ## Running the Demo
//!
//! ```bash
//! MYFLIX_USERNAME=alice MYFLIX_PASSWORD=secret RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod session;
pub mod view;
