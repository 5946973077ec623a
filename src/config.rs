//! Configuration management for the Slack relay.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Everything is read once at start-up
//! into [`Settings`] and passed down explicitly; request handling never
//! touches the environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use thiserror::Error;

pub const APP_DIR: &str = "slackify";

const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_HOME_URL: &str = "http://localhost:3000";
const DEFAULT_SLASH_COMMAND: &str = "/spotify";
const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private playlist-read-private";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {message}")]
    Invalid { key: &'static str, message: String },

    #[error("cannot prepare config directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives at `<data_local_dir>/slackify/.env`:
/// - Linux: `~/.local/share/slackify/.env`
/// - macOS: `~/Library/Application Support/slackify/.env`
/// - Windows: `%LOCALAPPDATA%/slackify/.env`
///
/// A missing file is not an error; variables may come from the process
/// environment alone (containers, systemd units).
pub async fn load_env() -> Result<(), ConfigError> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(_)) => Ok(()),
        Err(e) => Err(ConfigError::Invalid {
            key: ".env",
            message: e.to_string(),
        }),
    }
}

/// Everything the relay needs to run, resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub home_url: String,
    pub slash_command: String,
    pub slack_tokens: Vec<String>,
    pub playlist_path: PathBuf,
    pub token_path: PathBuf,
    pub spotify: SpotifySettings,
}

/// Spotify application and account settings.
#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub user_id: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Settings {
            server_addr: server_addr(),
            home_url: home_url(),
            slash_command: slash_command(),
            slack_tokens: slack_tokens()?,
            playlist_path: playlist_path(),
            token_path: token_path(),
            spotify: SpotifySettings::from_env()?,
        })
    }
}

impl SpotifySettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(SpotifySettings {
            user_id: spotify_user()?,
            client_id: spotify_client_id()?,
            redirect_uri: spotify_redirect_uri()?,
            scope: spotify_scope(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
        })
    }
}

/// Root of all files the relay writes: `<data_local_dir>/slackify`.
pub fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Address and port the HTTP server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Public URL of this relay (`HOME_URL`), linked in re-authorisation hints.
pub fn home_url() -> String {
    optional("HOME_URL", DEFAULT_HOME_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Name of the slash command as configured in Slack (`SLASH_COMMAND`).
pub fn slash_command() -> String {
    optional("SLASH_COMMAND", DEFAULT_SLASH_COMMAND)
}

/// Comma-separated verification tokens accepted on the webhook (`SLACK_TOKENS`).
pub fn slack_tokens() -> Result<Vec<String>, ConfigError> {
    let raw = required("SLACK_TOKENS")?;
    let tokens: Vec<String> = raw
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(ConfigError::Invalid {
            key: "SLACK_TOKENS",
            message: "no token in list".to_string(),
        });
    }
    Ok(tokens)
}

/// File holding the current playlist record (`PLAYLIST_FILE`).
pub fn playlist_path() -> PathBuf {
    env::var("PLAYLIST_FILE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| app_dir().join("playlist.json"))
}

/// File holding the persisted OAuth token (`TOKEN_FILE`).
pub fn token_path() -> PathBuf {
    env::var("TOKEN_FILE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| app_dir().join("cache/token.json"))
}

/// Spotify account that owns the managed playlists (`SPOTIFY_USER_ID`).
pub fn spotify_user() -> Result<String, ConfigError> {
    required("SPOTIFY_USER_ID")
}

/// Client ID of the registered Spotify application (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// OAuth redirect URI, must match the Spotify app settings (`SPOTIFY_API_REDIRECT_URI`).
pub fn spotify_redirect_uri() -> Result<String, ConfigError> {
    required("SPOTIFY_API_REDIRECT_URI")
}

pub fn spotify_scope() -> String {
    optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL", DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}
