use std::sync::Arc;

use axum::{
    Extension, Form,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use super::AppState;
use crate::{info, types::SlashCommand, warning};

pub async fn slash_command(
    Extension(state): Extension<Arc<AppState>>,
    Form(request): Form<SlashCommand>,
) -> Response {
    if !state.accepts_token(&request.token) {
        warning!("Rejected slash command with unknown token from {}", request.user_name);
        return (StatusCode::UNAUTHORIZED, "Cross site request.").into_response();
    }

    info!(
        "{} : {} : {}",
        Utc::now().to_rfc2822(),
        request.user_name,
        request.text
    );
    let ack = format!("Processing request: `{}`", request.text.trim());

    let relay = Arc::clone(&state.relay);
    let response_url = request.response_url.clone();
    let task = tokio::spawn({
        let relay = Arc::clone(&relay);
        async move { relay.process(request).await }
    });
    tokio::spawn(async move {
        if let Err(e) = task.await {
            warning!("Slash command task failed: {}", e);
            relay.report_failure(&response_url).await;
        }
    });

    ack.into_response()
}
