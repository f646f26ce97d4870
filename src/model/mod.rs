//! Records exchanged with the movie API, plus the display projection used by views.

pub mod movie;
pub mod user;

pub use movie::*;
pub use user::*;
