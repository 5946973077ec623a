use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use super::{AuthSession, SpotifyError, error::check};
use crate::{
    config::SpotifySettings,
    types::{
        AddTracksToPlaylistRequest, CreatePlaylistRequest, GetUserPlaylistsResponse, Playlist,
        RemoveTracksFromPlaylistRequest, SearchTracksResponse, Track, TrackUri,
    },
};

/// Page size used when listing playlists.
const PLAYLIST_PAGE_LIMIT: u32 = 50;

/// The provider operations the command handlers rely on.
///
/// Every method authenticates with the session's current access token and
/// reports failures as [`SpotifyError`] with the upstream message kept.
/// Nothing is retried; a 401 surfaces as [`SpotifyError::TokenExpired`].
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    /// Searches tracks; results keep the provider's ranking.
    ///
    /// # Arguments
    ///
    /// * `query` - Search expression such as `artist:john williams track:duel of the fates`
    ///
    /// Only the best match is requested (`limit=1`), so the returned list
    /// holds at most one track. An empty list means nothing matched.
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>, SpotifyError>;

    /// Appends tracks to the end of a playlist.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Spotify ID of the target playlist
    /// * `uris` - Track URIs, e.g. `spotify:track:4uLU6hMCjMI75M1A2tKUQC`
    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), SpotifyError>;

    /// Removes every occurrence of each URI.
    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), SpotifyError>;

    /// Creates a public playlist for the configured account and returns it.
    async fn create_playlist(&self, name: &str) -> Result<Playlist, SpotifyError>;

    /// All playlists owned by the configured account, in provider order.
    ///
    /// Follows the `next` link of every page until the listing is
    /// exhausted. Playlists the account merely follows are left out; a
    /// playlist without owner information is kept.
    async fn user_playlists(&self) -> Result<Vec<Playlist>, SpotifyError>;

    /// Unfollows a playlist, which is how Spotify deletes one for its owner.
    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), SpotifyError>;
}

/// [`MusicCatalog`] backed by the Spotify Web API.
///
/// # Endpoints
///
/// | Operation | Request |
/// |---|---|
/// | search | `GET /search?q=..&type=track&limit=1` |
/// | add | `POST /playlists/{id}/tracks` |
/// | remove | `DELETE /playlists/{id}/tracks` |
/// | create | `POST /users/{user_id}/playlists` |
/// | list | `GET /users/{user_id}/playlists?limit=50`, then `next` |
/// | delete | `DELETE /playlists/{id}/followers` |
///
/// All paths are relative to `SPOTIFY_API_URL`.
pub struct SpotifyClient {
    settings: SpotifySettings,
    session: Arc<AuthSession>,
    http: Client,
}

impl SpotifyClient {
    /// Creates a client sharing the given session for bearer tokens.
    ///
    /// # Arguments
    ///
    /// * `settings` - Provides the API base URL and the owning `user_id`
    /// * `session` - Session whose access token authenticates every call
    pub fn new(settings: SpotifySettings, session: Arc<AuthSession>) -> Self {
        Self {
            settings,
            session,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.api_url, path)
    }
}

#[async_trait]
impl MusicCatalog for SpotifyClient {
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>, SpotifyError> {
        let token = self.session.access_token().await?;
        let response = self
            .http
            .get(self.url("/search"))
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .bearer_auth(token)
            .send()
            .await?;

        let json = check(response)
            .await?
            .json::<SearchTracksResponse>()
            .await?;
        Ok(json.tracks.items)
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), SpotifyError> {
        let token = self.session.access_token().await?;
        let body = AddTracksToPlaylistRequest {
            uris: uris.to_vec(),
        };
        let response = self
            .http
            .post(self.url(&format!("/playlists/{playlist_id}/tracks")))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), SpotifyError> {
        let token = self.session.access_token().await?;
        let body = RemoveTracksFromPlaylistRequest {
            tracks: uris.iter().map(|uri| TrackUri { uri: uri.clone() }).collect(),
        };
        let response = self
            .http
            .delete(self.url(&format!("/playlists/{playlist_id}/tracks")))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    async fn create_playlist(&self, name: &str) -> Result<Playlist, SpotifyError> {
        let token = self.session.access_token().await?;
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            public: true,
        };
        let response = self
            .http
            .post(self.url(&format!("/users/{}/playlists", self.settings.user_id)))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        Ok(check(response).await?.json::<Playlist>().await?)
    }

    async fn user_playlists(&self) -> Result<Vec<Playlist>, SpotifyError> {
        let token = self.session.access_token().await?;
        let mut playlists = Vec::new();
        let mut next = Some(format!(
            "{}?limit={}",
            self.url(&format!("/users/{}/playlists", self.settings.user_id)),
            PLAYLIST_PAGE_LIMIT
        ));

        while let Some(page_url) = next {
            let response = self.http.get(&page_url).bearer_auth(&token).send().await?;
            let page = check(response)
                .await?
                .json::<GetUserPlaylistsResponse>()
                .await?;

            playlists.extend(page.items.into_iter().filter(|p| {
                p.owner
                    .as_ref()
                    .is_none_or(|o| o.id == self.settings.user_id)
            }));
            next = page.next;
        }

        Ok(playlists)
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), SpotifyError> {
        let token = self.session.access_token().await?;
        let response = self
            .http
            .delete(self.url(&format!("/playlists/{playlist_id}/followers")))
            .bearer_auth(token)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}
