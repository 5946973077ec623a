use reqwest::{Response, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Everything that can go wrong while talking to Spotify.
///
/// Variants carrying a `String` hold the upstream message as Spotify sent
/// it, so it can be shown to the Slack user unchanged.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Transport failure or a body that did not deserialize.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any non-2xx answer without a more specific variant.
    #[error("Spotify API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The access or refresh token was rejected.
    #[error("Spotify token expired or revoked: {0}")]
    TokenExpired(String),

    /// HTTP 429. Nothing is retried.
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("not authorised with Spotify yet")]
    NotAuthenticated,

    /// The `state` of a callback does not belong to the pending authorisation.
    #[error("authorisation state mismatch")]
    AuthorizationState,

    #[error("invalid Spotify settings: {0}")]
    Settings(String),
}

impl SpotifyError {
    /// Whether the user has to go through `/authorise` again.
    pub fn needs_reauthorisation(&self) -> bool {
        matches!(
            self,
            SpotifyError::TokenExpired(_) | SpotifyError::NotAuthenticated
        )
    }
}

/// Passes successful responses through and turns error responses into
/// [`SpotifyError`], keeping the upstream message.
///
/// Understands both the Web API shape (`{"error":{"status":..,"message":..}}`)
/// and the accounts service shape (`{"error":"..","error_description":".."}`).
pub(crate) async fn check(response: Response) -> Result<Response, SpotifyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    });

    Err(match status {
        StatusCode::UNAUTHORIZED => SpotifyError::TokenExpired(message),
        StatusCode::TOO_MANY_REQUESTS => SpotifyError::RateLimited(message),
        _ => SpotifyError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match &json["error"] {
        Value::Object(err) => err
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::String(code) => Some(
            json["error_description"]
                .as_str()
                .map(|d| format!("{code}: {d}"))
                .unwrap_or_else(|| code.clone()),
        ),
        _ => None,
    }
}
