use std::sync::Arc;

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::{AppState, home};
use crate::{info, spotify::Authenticator, success, warning};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

pub async fn authorise(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.session.authorize_url().await {
        Ok(url) => {
            info!("Redirecting to {}", url);
            Redirect::to(&url).into_response()
        }
        Err(e) => {
            warning!("Cannot build authorize url: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    if let Some(err) = params.error {
        warning!("Authorisation denied: {}", err);
        return Html("<h4>Authorisation denied.</h4>").into_response();
    }

    let (Some(code), Some(auth_state)) = (params.code, params.state) else {
        return Html("<h4>Missing authorisation code.</h4>").into_response();
    };

    match state.session.exchange_code(&code, &auth_state).await {
        Ok(()) => {
            success!("Authentication successful!");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>").into_response()
        }
    }
}

pub async fn refresh(Extension(state): Extension<Arc<AppState>>) -> Html<&'static str> {
    if let Err(e) = state.session.refresh().await {
        warning!("Manual token refresh failed: {}", e);
    }
    home(Extension(state)).await
}
