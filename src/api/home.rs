use std::sync::Arc;

use axum::{Extension, response::Html};

use super::AppState;

pub async fn home(Extension(state): Extension<Arc<AppState>>) -> Html<&'static str> {
    if state.session.is_logged_in().await {
        Html("You are logged in.")
    } else {
        Html("<a href=\"/authorise\">Authorise</a>")
    }
}
