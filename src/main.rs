//! Command-line demo: logs in (if credentials are given), lists the catalog and
//! shows the first movie's description dialog.

use myflix_client::config::ClientConfig;
use myflix_client::lifecycle::MyFlixApp;
use myflix_client::model::LoginUser;
use myflix_client::view::LogDialog;
use rest_framework::tracing::setup_tracing;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
    let app = MyFlixApp::new(config);

    if let (Ok(username), Ok(password)) = (
        std::env::var("MYFLIX_USERNAME"),
        std::env::var("MYFLIX_PASSWORD"),
    ) {
        let span = tracing::info_span!("login");
        let login = async { app.login(&LoginUser::new(username, password)).await }
            .instrument(span)
            .await;
        if let Err(e) = login {
            error!(error = %e, "Login failed");
            eprintln!("{}", e.user_message());
        }
    }

    let mut view = app.movie_list_view(LogDialog);
    let span = tracing::info_span!("movie_list");
    let loaded = view.init().instrument(span).await;
    match loaded {
        Ok(()) if view.movies().is_empty() => {
            info!("No movies to show (set MYFLIX_USERNAME and MYFLIX_PASSWORD to log in)")
        }
        Ok(()) => {
            for movie in view.movies() {
                println!("{} [{}] directed by {}", movie.title, movie.genre, movie.director);
            }
            if let Some(first) = view.movies().first() {
                view.open_movie_description_dialog(&first.title, &first.description);
            }
        }
        Err(e) => eprintln!("{}", e.user_message()),
    }

    drop(view);
    app.shutdown().await?;
    Ok(())
}
