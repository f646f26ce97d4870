use async_trait::async_trait;
use rest_framework::{ApiClient, ApiResource};
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::error::MyFlixError;
use crate::model::{LoginResponse, LoginUser, RegistrationUser, User};
use crate::session::Session;

/// Client for account and favourites endpoints.
///
/// Operations on "the current user" take the username from the [`Session`];
/// lookups by name take it as an argument.
#[derive(Clone)]
pub struct UserClient {
    api: ApiClient,
}

impl UserClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ApiResource for UserClient {
    type Error = MyFlixError;

    fn api(&self) -> &ApiClient {
        &self.api
    }
}

impl UserClient {
    /// `POST users/register`. No token needed.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: &RegistrationUser) -> Result<User, MyFlixError> {
        debug!("Sending request");
        let user = self
            .api
            .post(&["users", "register"], registration, None)
            .await?;
        Ok(user)
    }

    /// `POST login`. No token needed.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginUser) -> Result<LoginResponse, MyFlixError> {
        debug!("Sending request");
        let response: LoginResponse = self.api.post(&["login"], credentials, None).await?;
        info!("Logged in");
        Ok(response)
    }

    /// `GET users/{username}`
    #[instrument(skip(self, session))]
    pub async fn get_user(&self, session: &Session, username: &str) -> Result<User, MyFlixError> {
        self.fetch(&["users", username], session.token()?).await
    }

    /// `GET users/{username}/movies`
    #[instrument(skip(self, session))]
    pub async fn get_favourite_movies(
        &self,
        session: &Session,
        username: &str,
    ) -> Result<User, MyFlixError> {
        self.fetch(&["users", username, "movies"], session.token()?)
            .await
    }

    /// `POST users/{session username}/movies/{movie_id}`
    #[instrument(skip(self, session))]
    pub async fn add_favourite_movie(
        &self,
        session: &Session,
        movie_id: &str,
    ) -> Result<User, MyFlixError> {
        let token = session.token()?;
        let username = session.username()?;
        debug!(%username, "Sending request");
        let user = self
            .api
            .post(&["users", username, "movies", movie_id], &json!({}), Some(token))
            .await?;
        Ok(user)
    }

    /// `PUT users/{session username}` with the full user record.
    #[instrument(skip(self, session, user), fields(username = %user.username))]
    pub async fn edit_user(&self, session: &Session, user: &User) -> Result<User, MyFlixError> {
        let token = session.token()?;
        let username = session.username()?;
        debug!("Sending request");
        let updated = self.api.put(&["users", username], user, Some(token)).await?;
        Ok(updated)
    }

    /// `DELETE users/{session username}`. Returns the server's acknowledgement text.
    #[instrument(skip(self, session))]
    pub async fn delete_user(&self, session: &Session) -> Result<String, MyFlixError> {
        let token = session.token()?;
        let username = session.username()?;
        debug!(%username, "Sending request");
        let ack = self.api.delete_text(&["users", username], Some(token)).await?;
        info!(%username, "Deleted user");
        Ok(ack)
    }

    /// `DELETE users/{session username}/movies/{movie_id}`
    #[instrument(skip(self, session))]
    pub async fn remove_favourite_movie(
        &self,
        session: &Session,
        movie_id: &str,
    ) -> Result<User, MyFlixError> {
        let token = session.token()?;
        let username = session.username()?;
        self.remove(&["users", username, "movies", movie_id], token)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rest_framework::mock::{create_mock_transport, expect_request, MockTransport};
    use rest_framework::{ApiResponse, Method, TransportError, GENERIC_ERROR_MESSAGE};
    use std::sync::Arc;

    fn user_client(transport: Arc<dyn rest_framework::Transport>) -> UserClient {
        let base = "https://my-films-db.herokuapp.com/".parse().unwrap();
        UserClient::new(ApiClient::new(base, transport))
    }

    fn alice() -> serde_json::Value {
        json!({
            "_id": "u1",
            "Name": "Alice",
            "Username": "alice",
            "Email": "alice@example.com",
            "Password": "hashed",
            "Birthday": "1990-01-01",
            "FavouriteMovies": ["m1", "m2"]
        })
    }

    #[tokio::test]
    async fn test_login_posts_credentials_without_token() {
        let (transport, mut receiver) = create_mock_transport(10);
        let client = user_client(Arc::new(transport));

        let task = tokio::spawn(async move {
            client.login(&LoginUser::new("alice", "secret")).await
        });

        let (request, responder) = expect_request(&mut receiver)
            .await
            .expect("Expected a request");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path(), "/login");
        assert!(request.bearer.is_none());
        assert_eq!(
            request.body,
            Some(json!({ "Username": "alice", "Password": "secret" }))
        );
        responder
            .send(Ok(ApiResponse::json(200, &json!({ "user": alice(), "token": "jwt" }))))
            .unwrap();

        let response = task.await.unwrap().unwrap();
        assert_eq!(response.token, "jwt");
        assert_eq!(response.user.favourite_movies, vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_favourites_use_session_username() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/users/alice/movies/m3")
            .return_json(201, alice());
        mock.expect(Method::Delete, "/users/alice/movies/m1")
            .return_json(200, alice());
        let client = user_client(Arc::new(mock.clone()));
        let session = Session::new("abc", "alice");

        client.add_favourite_movie(&session, "m3").await.unwrap();
        client.remove_favourite_movie(&session, "m1").await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].body, Some(json!({})));
        assert!(requests[1].body.is_none());
        for request in &requests {
            assert_eq!(request.authorization_header().as_deref(), Some("Bearer abc"));
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_username_sends_nothing() {
        let mock = MockTransport::new();
        let client = user_client(Arc::new(mock.clone()));
        let session = Session::with_token("abc");

        assert_eq!(
            client.add_favourite_movie(&session, "m1").await.unwrap_err(),
            MyFlixError::MissingUsername
        );
        assert_eq!(
            client.delete_user(&session).await.unwrap_err(),
            MyFlixError::MissingUsername
        );
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_edit_user_puts_full_record() {
        let mock = MockTransport::new();
        mock.expect(Method::Put, "/users/alice").return_with(|request| {
            ApiResponse::json(200, request.body.as_ref().unwrap())
        });
        let client = user_client(Arc::new(mock.clone()));
        let session = Session::new("abc", "alice");

        let mut user: User = serde_json::from_value(alice()).unwrap();
        user.email = "new@example.com".into();
        let updated = client.edit_user(&session, &user).await.unwrap();

        assert_eq!(updated, user);
        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].authorization_header().as_deref(), Some("Bearer abc"));
        assert_eq!(requests[0].body.as_ref().unwrap()["_id"], "u1");
    }

    #[tokio::test]
    async fn test_delete_user_returns_ack() {
        let mock = MockTransport::new();
        mock.expect(Method::Delete, "/users/alice")
            .return_status(200, "alice was deleted.");
        let client = user_client(Arc::new(mock));

        let ack = client
            .delete_user(&Session::new("abc", "alice"))
            .await
            .unwrap();
        assert_eq!(ack, "alice was deleted.");
    }

    #[tokio::test]
    async fn test_network_failure_on_register() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "/users/register")
            .return_err(TransportError::new("dns failure"));
        let client = user_client(Arc::new(mock));

        let registration = RegistrationUser {
            name: "Alice".into(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "secret".into(),
            birthday: "1990-01-01".into(),
        };
        let err = client.register(&registration).await.unwrap_err();
        assert!(matches!(err, MyFlixError::Api(rest_framework::ApiError::Network(_))));
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }
}
