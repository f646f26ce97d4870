use myflix_client::config::ClientConfig;
use myflix_client::error::MyFlixError;
use myflix_client::lifecycle::MyFlixApp;
use myflix_client::model::{LoginUser, RegistrationUser, User};
use myflix_client::session::Session;
use rest_framework::mock::MockTransport;
use rest_framework::{ApiResponse, Method, GENERIC_ERROR_MESSAGE};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

fn app_with(mock: &MockTransport) -> MyFlixApp {
    MyFlixApp::with_transport(ClientConfig::default(), Arc::new(mock.clone()))
}

/// A storage path that exists as a directory, so every write to it fails.
fn unwritable_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("myflix-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_dir_all(&path);
    std::fs::create_dir(&path).unwrap();
    path
}

fn user_json(username: &str, favourites: &[&str]) -> serde_json::Value {
    json!({
        "_id": "u1",
        "Name": "Alice",
        "Username": username,
        "Email": "alice@example.com",
        "Password": "hashed",
        "Birthday": "1990-01-01",
        "FavouriteMovies": favourites
    })
}

/// Login stores the session; every later call carries the token and username.
#[tokio::test]
async fn test_login_then_manage_favourites() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "/login")
        .return_json(200, json!({ "user": user_json("alice", &[]), "token": "abc" }));
    mock.expect(Method::Post, "/users/alice/movies/m1")
        .return_json(200, user_json("alice", &["m1"]));
    mock.expect(Method::Get, "/users/alice/movies")
        .return_json(200, user_json("alice", &["m1"]));
    mock.expect(Method::Delete, "/users/alice/movies/m1")
        .return_json(200, user_json("alice", &[]));

    let app = app_with(&mock);

    let login = app
        .login(&LoginUser::new("alice", "secret"))
        .await
        .expect("Failed to log in");
    assert_eq!(login.token, "abc");

    let session = app.session().await.unwrap();
    assert_eq!(session, Session::new("abc", "alice"));

    let user = app
        .user_client
        .add_favourite_movie(&session, "m1")
        .await
        .expect("Failed to add favourite");
    assert_eq!(user.favourite_movies, vec!["m1"]);

    let user = app
        .user_client
        .get_favourite_movies(&session, "alice")
        .await
        .expect("Failed to get favourites");
    assert_eq!(user.favourite_movies, vec!["m1"]);

    let user = app
        .user_client
        .remove_favourite_movie(&session, "m1")
        .await
        .expect("Failed to remove favourite");
    assert!(user.favourite_movies.is_empty());

    let requests = mock.requests();
    assert_eq!(requests.len(), 4, "One request per operation");
    assert!(requests[0].bearer.is_none(), "Login carries no token");
    for request in &requests[1..] {
        assert_eq!(request.authorization_header().as_deref(), Some("Bearer abc"));
    }

    mock.verify();
    app.shutdown().await.expect("Failed to shutdown");
}

/// A registered user fetched back keeps username, email and birthday.
#[tokio::test]
async fn test_register_then_get_user_round_trip() {
    let mock = MockTransport::new();
    let registered = Arc::new(std::sync::Mutex::new(None::<User>));

    let on_register = registered.clone();
    mock.expect(Method::Post, "/users/register")
        .return_with(move |request| {
            let registration: RegistrationUser =
                serde_json::from_value(request.body.clone().unwrap()).unwrap();
            let mut user = User::from_registration(registration);
            user.id = "u42".to_string();
            *on_register.lock().unwrap() = Some(user.clone());
            ApiResponse::json(201, &serde_json::to_value(&user).unwrap())
        });
    let on_get = registered.clone();
    mock.expect(Method::Get, "/users/bob").return_with(move |_| {
        let user = on_get.lock().unwrap().clone().unwrap();
        ApiResponse::json(200, &serde_json::to_value(&user).unwrap())
    });

    let app = app_with(&mock);
    let registration = RegistrationUser {
        name: "Bob".into(),
        username: "bob".into(),
        email: "bob@example.com".into(),
        password: "secret".into(),
        birthday: "1985-06-15".into(),
    };

    let created = app.user_client.register(&registration).await.unwrap();
    assert_eq!(created.id, "u42");
    assert!(created.favourite_movies.is_empty());

    let fetched = app
        .user_client
        .get_user(&Session::with_token("abc"), "bob")
        .await
        .unwrap();
    assert_eq!(fetched.username, registration.username);
    assert_eq!(fetched.email, registration.email);
    assert_eq!(fetched.birthday, registration.birthday);

    let requests = mock.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].bearer.is_none(), "Registration carries no token");
    assert_eq!(requests[1].authorization_header().as_deref(), Some("Bearer abc"));

    mock.verify();
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_login_stores_nothing() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "/login")
        .return_status(400, "Incorrect username or password");

    let app = app_with(&mock);
    let err = app
        .login(&LoginUser::new("alice", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    let session = app.session().await.unwrap();
    assert_eq!(session.token(), Err(MyFlixError::NotLoggedIn));

    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_account_clears_session() {
    let mock = MockTransport::new();
    mock.expect(Method::Delete, "/users/alice")
        .return_status(200, "alice was deleted.");

    let app = app_with(&mock);
    Session::new("abc", "alice").save(&app.store).await.unwrap();

    let ack = app.delete_account().await.unwrap();
    assert_eq!(ack, "alice was deleted.");
    assert_eq!(app.session().await.unwrap(), Session::anonymous());

    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_logout_then_calls_fail_without_request() {
    let mock = MockTransport::new();
    let app = app_with(&mock);
    Session::new("abc", "alice").save(&app.store).await.unwrap();

    app.logout().await.unwrap();
    let session = app.session().await.unwrap();
    let err = app.movie_client.get_all_movies(&session).await.unwrap_err();

    assert_eq!(err, MyFlixError::NotLoggedIn);
    assert!(mock.requests().is_empty());
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_session_survives_restart_with_storage_file() {
    let path = std::env::temp_dir().join(format!("myflix-session-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let config = ClientConfig::default().with_storage_path(&path);

    let mock = MockTransport::new();
    mock.expect(Method::Post, "/login")
        .return_json(200, json!({ "user": user_json("alice", &[]), "token": "abc" }));

    let app = MyFlixApp::with_transport(config.clone(), Arc::new(mock.clone()));
    app.login(&LoginUser::new("alice", "secret")).await.unwrap();
    app.shutdown().await.unwrap();

    let app = MyFlixApp::with_transport(config, Arc::new(mock));
    assert_eq!(app.session().await.unwrap(), Session::new("abc", "alice"));
    app.shutdown().await.unwrap();

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_login_with_unwritable_storage_stays_logged_out() {
    let path = unwritable_path("login");
    let config = ClientConfig::default().with_storage_path(&path);

    let mock = MockTransport::new();
    mock.expect(Method::Post, "/login")
        .return_json(200, json!({ "user": user_json("alice", &[]), "token": "abc" }));

    let app = MyFlixApp::with_transport(config, Arc::new(mock));
    let err = app
        .login(&LoginUser::new("alice", "secret"))
        .await
        .unwrap_err();

    assert!(matches!(err, MyFlixError::Storage(_)));
    let session = app.session().await.unwrap();
    assert!(!session.has_token());
    assert_eq!(session, Session::anonymous());

    app.shutdown().await.unwrap();
    let _ = std::fs::remove_dir_all(&path);
}

#[tokio::test]
async fn test_delete_account_reports_ack_when_session_cannot_be_cleared() {
    let path = std::env::temp_dir().join(format!("myflix-delete-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&path);
    std::fs::write(&path, r#"{"token":"abc","username":"alice"}"#).unwrap();
    let config = ClientConfig::default().with_storage_path(&path);

    let mock = MockTransport::new();
    mock.expect(Method::Delete, "/users/alice")
        .return_status(200, "alice was deleted.");

    let app = MyFlixApp::with_transport(config, Arc::new(mock.clone()));
    assert_eq!(app.session().await.unwrap(), Session::new("abc", "alice"));

    // From here on the storage file can no longer be written.
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    let ack = app.delete_account().await.unwrap();
    assert_eq!(ack, "alice was deleted.");
    assert_eq!(mock.requests().len(), 1);

    app.shutdown().await.unwrap();
    let _ = std::fs::remove_dir_all(&path);
}
