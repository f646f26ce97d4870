use serde::{Deserialize, Serialize};

/// A registered user as returned by the API.
///
/// `id` and `favourite_movies` are assigned by the server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Password", default)]
    pub password: String,
    #[serde(rename = "Birthday", default)]
    pub birthday: String,
    /// Movie identifiers, in the order they were added.
    #[serde(rename = "FavouriteMovies", default)]
    pub favourite_movies: Vec<String>,
}

/// Payload for `POST users/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationUser {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Birthday")]
    pub birthday: String,
}

/// Payload for `POST login`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginUser {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

impl LoginUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginUser")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Answer to a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

impl User {
    /// The fields a server would echo back after registration.
    pub fn from_registration(registration: RegistrationUser) -> Self {
        Self {
            id: String::new(),
            name: registration.name,
            username: registration.username,
            email: registration.email,
            password: registration.password,
            birthday: registration.birthday,
            favourite_movies: Vec::new(),
        }
    }
}
