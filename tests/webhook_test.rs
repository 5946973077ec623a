mod common;

use std::{sync::Arc, time::Duration};

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use common::{Failure, FakeAuth, FakeCatalog, RecordingNotifier, current, relay, track};
use slackify::{
    api::AppState,
    config::SpotifySettings,
    management::{MemoryPlaylistStore, TokenManager},
    handlers::messages,
    server,
    spotify::AuthSession,
    types::Visibility,
};
use tempfile::TempDir;
use tokio::sync::mpsc;
use tower::ServiceExt;

struct Harness {
    state: Arc<AppState>,
    notifier: Arc<RecordingNotifier>,
    rx: mpsc::UnboundedReceiver<slackify::types::OutboundMessage>,
    _dir: TempDir,
}

fn settings() -> SpotifySettings {
    SpotifySettings {
        user_id: common::USER.to_string(),
        client_id: "client".to_string(),
        redirect_uri: "http://localhost:3000/callback".to_string(),
        scope: "playlist-modify-public".to_string(),
        auth_url: "https://accounts.spotify.test/authorize".to_string(),
        token_url: "https://accounts.spotify.test/api/token".to_string(),
        api_url: "https://api.spotify.test/v1".to_string(),
    }
}

fn harness() -> Harness {
    harness_with(FakeCatalog::with_tracks(vec![track(
        "t1",
        "Duel of the Fates",
        "John Williams",
    )]))
}

fn harness_with(catalog: FakeCatalog) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let notifier = Arc::new(RecordingNotifier::forwarding(tx));
    let catalog = Arc::new(catalog);
    let store = Arc::new(MemoryPlaylistStore::new(current("p1", "Office Mix")));

    let session = Arc::new(AuthSession::new(
        settings(),
        TokenManager::new(dir.path().join("token.json")),
    ));
    let state = Arc::new(AppState {
        relay: Arc::new(relay(
            Arc::new(FakeAuth::default()),
            catalog,
            store,
            Arc::clone(&notifier),
        )),
        session,
        slack_tokens: vec!["secret".to_string(), "other".to_string()],
    });

    Harness {
        state,
        notifier,
        rx,
        _dir: dir,
    }
}

fn slash_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/store")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let mut h = harness();
    let app = server::router(Arc::clone(&h.state));

    let response = app
        .oneshot(slash_request(
            "token=wrong&text=add+-+duel&user_id=U42&user_name=alice&response_url=https%3A%2F%2Fhooks.slack.test%2Freply",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(response).await, "Cross site request.");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(h.rx.try_recv().is_err());
    assert!(h.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let h = harness();
    let app = server::router(Arc::clone(&h.state));

    let response = app
        .oneshot(slash_request("text=help&user_id=U42&user_name=alice"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_acknowledges_and_notifies_once() {
    let mut h = harness();
    let app = server::router(Arc::clone(&h.state));

    let response = app
        .oneshot(slash_request(
            "token=other&text=add+-+duel+of+the+fates&user_id=U42&user_name=alice&response_url=https%3A%2F%2Fhooks.slack.test%2Freply",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "Processing request: `add - duel of the fates`"
    );

    let message = tokio::time::timeout(Duration::from_secs(2), h.rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(message.visibility, Visibility::Broadcast);
    assert!(message.text.contains("*Duel of the Fates* by *John Williams*"));

    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, "https://hooks.slack.test/reply");
}

#[tokio::test]
async fn test_panicking_command_still_gets_one_reply() {
    let mut h = harness_with(FakeCatalog::failing(Failure::Panic));
    let app = server::router(Arc::clone(&h.state));

    let response = app
        .oneshot(slash_request(
            "token=secret&text=add+-+duel&user_id=U42&user_name=alice&response_url=https%3A%2F%2Fhooks.slack.test%2Freply",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let message = tokio::time::timeout(Duration::from_secs(2), h.rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(message.visibility, Visibility::Private);
    assert_eq!(message.text, messages::INTERNAL_ERROR);

    tokio::time::sleep(Duration::from_millis(50)).await;
    let sent = h.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, "https://hooks.slack.test/reply");
}

#[tokio::test]
async fn test_health_reports_version_and_login() {
    let h = harness();
    let app = server::router(Arc::clone(&h.state));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["spotify_authorised"], false);
}

#[tokio::test]
async fn test_home_offers_authorisation_when_logged_out() {
    let h = harness();
    let app = server::router(Arc::clone(&h.state));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("href=\"/authorise\""));
}

#[tokio::test]
async fn test_authorise_redirects_to_consent_page() {
    let h = harness();
    let app = server::router(Arc::clone(&h.state));

    let response = app
        .oneshot(Request::get("/authorise").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://accounts.spotify.test/authorize?"));
    assert!(location.contains("code_challenge_method=S256"));
    assert!(location.contains("client_id=client"));
}
