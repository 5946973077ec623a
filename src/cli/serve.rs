use std::sync::Arc;

use crate::{
    api::AppState,
    config::Settings,
    error,
    handlers::Dispatcher,
    info,
    management::{FilePlaylistStore, TokenManager},
    notifier::SlackNotifier,
    relay::Relay,
    server, spotify, success, warning,
};

pub async fn serve() {
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let session = Arc::new(spotify::AuthSession::new(
        settings.spotify.clone(),
        TokenManager::new(&settings.token_path),
    ));
    if session.restore().await {
        success!("Restored Spotify session from cache");
    } else {
        warning!(
            "Not authorised with Spotify yet. Visit {}/authorise",
            settings.home_url
        );
    }

    let catalog = Arc::new(spotify::SpotifyClient::new(
        settings.spotify.clone(),
        Arc::clone(&session),
    ));
    let store = Arc::new(FilePlaylistStore::new(&settings.playlist_path));
    info!("Current playlist is stored in {}", store.path().display());

    let dispatcher = Dispatcher::new(
        catalog,
        store,
        settings.slash_command.clone(),
        settings.home_url.clone(),
    );
    let relay = Relay::new(
        Arc::clone(&session) as Arc<dyn spotify::Authenticator>,
        dispatcher,
        Arc::new(SlackNotifier::new()),
    );

    let state = Arc::new(AppState {
        relay: Arc::new(relay),
        session,
        slack_tokens: settings.slack_tokens.clone(),
    });

    if let Err(e) = server::start_api_server(&settings.server_addr, state).await {
        error!("Server stopped: {}", e);
    }
}
