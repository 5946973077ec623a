//! # API Module
//!
//! HTTP endpoints of the relay, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! ### Slack
//!
//! - [`slash_command`] - `POST /store`, the slash command webhook. Checks the
//!   verification token, acknowledges immediately and runs the command in a
//!   background task whose result is posted to the `response_url`. If that
//!   task panics a private fallback reply is sent instead.
//!
//! ### Authentication
//!
//! - [`authorise`] - `GET /authorise`, redirects to the Spotify consent page
//! - [`callback`] - `GET /callback`, completes the OAuth PKCE code exchange
//! - [`refresh`] - `GET /refresh`, refreshes the access token by hand
//!
//! ### Monitoring
//!
//! - [`home`] - `GET /`, shows whether the relay is logged in to Spotify
//! - [`health`] - `GET /health`, status and version JSON
//!
//! All handlers share one [`AppState`] through an `Extension` layer.

mod auth;
mod health;
mod home;
mod slash_command;

use std::sync::Arc;

use crate::{relay::Relay, spotify::AuthSession};

pub use auth::{authorise, callback, refresh};
pub use health::health;
pub use home::home;
pub use slash_command::slash_command;

/// State shared by all endpoints.
pub struct AppState {
    pub relay: Arc<Relay>,
    pub session: Arc<AuthSession>,
    pub slack_tokens: Vec<String>,
}

impl AppState {
    /// Whether a webhook `token` field belongs to the allow-list.
    pub fn accepts_token(&self, token: &str) -> bool {
        !token.is_empty() && self.slack_tokens.iter().any(|t| t == token)
    }
}
