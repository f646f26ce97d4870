//! Screens built on the clients. Presentation itself is left to a [`DialogService`].

pub mod dialog;
pub mod movie_list;

pub use dialog::*;
pub use movie_list::*;
