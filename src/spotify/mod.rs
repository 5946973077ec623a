//! # Spotify Integration Module
//!
//! This module is the integration layer between the relay and the Spotify
//! Web API. It covers the OAuth session and the handful of catalog and
//! playlist operations the slash commands need.
//!
//! ## Architecture
//!
//! ```text
//! Relay / Command Handlers
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE, token refresh)
//!     └── Catalog (search, playlist mutation, playlist listing)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication
//!
//! [`auth`] holds the live session as an explicit [`AuthSession`] object
//! instead of ambient global state:
//! - **Authorize URL**: PKCE verifier, S256 challenge and `state` generation
//! - **Code Exchange**: Turns the `/callback` code into access and refresh tokens
//! - **Refresh**: Called once per inbound command through [`Authenticator`]
//! - **Persistence**: Tokens survive restarts through the token cache file
//!
//! ### Catalog
//!
//! [`catalog`] exposes the [`MusicCatalog`] trait and its Web API
//! implementation [`SpotifyClient`]:
//! - `GET /search` - Track search (first hit wins)
//! - `POST /playlists/{id}/tracks` - Add tracks
//! - `DELETE /playlists/{id}/tracks` - Remove all occurrences of tracks
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `GET /users/{user_id}/playlists` - List owned playlists, following `next`
//! - `DELETE /playlists/{id}/followers` - Unfollow (delete) a playlist
//!
//! ## Error Handling
//!
//! Every call returns [`SpotifyError`]. Upstream messages are preserved so
//! they can be shown to the Slack user. A rejected token (401 from the API,
//! 400 from the accounts service) becomes [`SpotifyError::TokenExpired`],
//! which callers turn into a re-authorisation hint. No call is retried.

pub mod auth;
pub mod catalog;
mod error;

pub use auth::{AuthSession, Authenticator};
pub use catalog::{MusicCatalog, SpotifyClient};
pub use error::SpotifyError;
