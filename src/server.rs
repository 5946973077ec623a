use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{Res, api, info};

pub fn router(state: Arc<api::AppState>) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/health", get(api::health))
        .route("/authorise", get(api::authorise))
        .route("/callback", get(api::callback))
        .route("/refresh", get(api::refresh))
        .route("/store", post(api::slash_command))
        .layer(Extension(state))
}

pub async fn start_api_server(addr: &str, state: Arc<api::AppState>) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
