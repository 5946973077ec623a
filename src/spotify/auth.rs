use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use serde_json::Value;
use tokio::sync::Mutex;

use super::{SpotifyError, error::check};
use crate::{
    config::SpotifySettings,
    management::TokenManager,
    types::{PkceToken, Token},
    utils, warning,
};

/// Refreshes the provider session before a command runs.
///
/// The relay calls [`Authenticator::refresh`] exactly once per inbound
/// slash command, before the command text is even parsed. When it fails no
/// handler runs and the user receives a single private error message.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Trades the stored refresh token for a fresh access token.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::NotAuthenticated`] if no token was ever obtained
    /// - [`SpotifyError::TokenExpired`] if the accounts service rejected the
    ///   refresh token (the user has to authorise again)
    /// - [`SpotifyError::Http`] on transport failures
    async fn refresh(&self) -> Result<(), SpotifyError>;
}

/// Live OAuth session with Spotify.
///
/// Holds the current token and the pending PKCE material of an
/// authorisation in progress. Shared between the OAuth endpoints, the
/// per-request refresh step and the catalog client.
///
/// # Authentication Flow
///
/// 1. **Authorize URL**: [`AuthSession::authorize_url`] generates a PKCE
///    verifier, its S256 challenge and a random `state`, remembers them and
///    returns the Spotify consent URL
/// 2. **User Authorization**: the user grants the playlist scopes in the browser
/// 3. **Callback**: Spotify redirects to `/callback` with `code` and `state`
/// 4. **Token Exchange**: [`AuthSession::exchange_code`] verifies `state` and
///    trades the code plus verifier for an access and refresh token
/// 5. **Persistence**: the token is written to the token cache so that
///    [`AuthSession::restore`] can pick it up after a restart
///
/// No client secret is involved; PKCE replaces it.
pub struct AuthSession {
    settings: SpotifySettings,
    http: Client,
    tokens: TokenManager,
    token: Mutex<Option<Token>>,
    pending: Mutex<Option<PkceToken>>,
}

impl AuthSession {
    /// Creates a logged-out session.
    ///
    /// # Arguments
    ///
    /// * `settings` - Spotify application settings (client id, redirect URI,
    ///   scopes and endpoint URLs)
    /// * `tokens` - Token cache the session persists every new token to
    pub fn new(settings: SpotifySettings, tokens: TokenManager) -> Self {
        Self {
            settings,
            http: Client::new(),
            tokens,
            token: Mutex::new(None),
            pending: Mutex::new(None),
        }
    }

    /// Loads a previously persisted token, if any.
    ///
    /// Returns `true` when a token was found. An unreadable cache is logged
    /// and treated like a missing one; the user simply authorises again.
    pub async fn restore(&self) -> bool {
        match self.tokens.load().await {
            Ok(Some(token)) => {
                *self.token.lock().await = Some(token);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warning!("Ignoring unreadable token cache: {}", e);
                false
            }
        }
    }

    /// Whether the session holds a usable access token.
    pub async fn is_logged_in(&self) -> bool {
        self.token
            .lock()
            .await
            .as_ref()
            .is_some_and(|t| !t.access_token.is_empty())
    }

    /// Current access token for bearer authentication.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::NotAuthenticated`] before the first
    /// successful authorisation.
    pub async fn access_token(&self) -> Result<String, SpotifyError> {
        self.token
            .lock()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
            .ok_or(SpotifyError::NotAuthenticated)
    }

    /// Builds the provider authorize URL and remembers its PKCE verifier and state.
    ///
    /// Starting a new authorisation replaces any pending one.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::Settings`] if `SPOTIFY_API_AUTH_URL` is not a
    /// valid URL.
    ///
    /// # Example
    ///
    /// ```
    /// let url = session.authorize_url().await?;
    /// // https://accounts.spotify.com/authorize?client_id=..&code_challenge_method=S256&..
    /// ```
    pub async fn authorize_url(&self) -> Result<String, SpotifyError> {
        let code_verifier = utils::generate_code_verifier();
        let code_challenge = utils::generate_code_challenge(&code_verifier);
        let state = utils::generate_state();

        let url = Url::parse_with_params(
            &self.settings.auth_url,
            &[
                ("client_id", self.settings.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
                ("code_challenge_method", "S256"),
                ("code_challenge", code_challenge.as_str()),
                ("scope", self.settings.scope.as_str()),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| SpotifyError::Settings(format!("SPOTIFY_API_AUTH_URL: {e}")))?;

        *self.pending.lock().await = Some(PkceToken {
            state,
            code_verifier,
        });

        Ok(url.to_string())
    }

    /// Exchanges the authorization code from `/callback` for a token.
    ///
    /// The pending PKCE material is consumed only when `state` matches it, so
    /// a stray callback cannot break an authorisation still in progress.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code from the callback query string
    /// * `state` - The `state` value echoed back by Spotify
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::AuthorizationState`] if no authorisation is pending
    ///   or `state` does not match it
    /// - [`SpotifyError::TokenExpired`] if the accounts service rejects the code
    /// - [`SpotifyError::Http`] on transport failures
    pub async fn exchange_code(&self, code: &str, state: &str) -> Result<(), SpotifyError> {
        let pending = {
            let mut pending = self.pending.lock().await;
            match pending.take() {
                Some(p) if p.state == state => p,
                other => {
                    *pending = other;
                    return Err(SpotifyError::AuthorizationState);
                }
            }
        };

        let res = self
            .http
            .post(&self.settings.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.settings.client_id.as_str()),
                ("code", code),
                ("code_verifier", pending.code_verifier.as_str()),
                ("redirect_uri", self.settings.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let json: Value = check_token_response(res).await?.json().await?;
        let token = token_from_json(&json, None);
        self.store(token).await;
        Ok(())
    }

    async fn store(&self, token: Token) {
        if let Err(e) = self.tokens.persist(&token).await {
            warning!("Failed to save token to cache: {}", e);
        }
        *self.token.lock().await = Some(token);
    }
}

#[async_trait]
impl Authenticator for AuthSession {
    async fn refresh(&self) -> Result<(), SpotifyError> {
        let refresh_token = self
            .token
            .lock()
            .await
            .as_ref()
            .map(|t| t.refresh_token.clone())
            .filter(|t| !t.is_empty())
            .ok_or(SpotifyError::NotAuthenticated)?;

        let res = self
            .http
            .post(&self.settings.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
                ("client_id", self.settings.client_id.as_str()),
            ])
            .send()
            .await?;

        let json: Value = check_token_response(res).await?.json().await?;
        let token = token_from_json(&json, Some(&refresh_token));
        self.store(token).await;
        Ok(())
    }
}

/// The accounts service answers a revoked or expired grant with 400.
async fn check_token_response(res: reqwest::Response) -> Result<reqwest::Response, SpotifyError> {
    match check(res).await {
        Err(SpotifyError::Api { status: 400, message }) => Err(SpotifyError::TokenExpired(message)),
        other => other,
    }
}

/// A refresh response may omit `refresh_token`; the previous one stays valid then.
fn token_from_json(json: &Value, previous_refresh: Option<&str>) -> Token {
    let refresh_token = json["refresh_token"]
        .as_str()
        .filter(|t| !t.is_empty())
        .or(previous_refresh)
        .unwrap_or_default()
        .to_string();

    Token {
        access_token: json["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        refresh_token,
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
