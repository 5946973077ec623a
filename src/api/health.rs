use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use super::AppState;

pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "spotify_authorised": state.session.is_logged_in().await
    }))
}
