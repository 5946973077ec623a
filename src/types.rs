use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// PKCE material remembered between `/authorise` and `/callback`.
#[derive(Debug, Clone)]
pub struct PkceToken {
    pub state: String,
    pub code_verifier: String,
}

// ---- Spotify wire types ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracksPage {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTracksResponse {
    pub tracks: TracksPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub owner: Option<PlaylistOwner>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksFromPlaylistRequest {
    pub tracks: Vec<TrackUri>,
}

// ---- Slack wire types ----

/// Form body of a Slack slash command invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlashCommand {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub response_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Ephemeral,
    InChannel,
}

/// JSON body posted to a Slack `response_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackMessage {
    pub response_type: ResponseType,
    pub text: String,
}

impl From<&OutboundMessage> for SlackMessage {
    fn from(message: &OutboundMessage) -> Self {
        let response_type = match message.visibility {
            Visibility::Private => ResponseType::Ephemeral,
            Visibility::Broadcast => ResponseType::InChannel,
        };
        SlackMessage {
            response_type,
            text: message.text.clone(),
        }
    }
}

// ---- Domain records ----

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only the user who issued the command sees it.
    Private,
    /// Posted to the whole channel.
    Broadcast,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub visibility: Visibility,
}

impl OutboundMessage {
    pub fn private(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visibility: Visibility::Private,
        }
    }

    pub fn broadcast(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visibility: Visibility::Broadcast,
        }
    }
}

/// The Slack user who issued a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub id: String,
    pub name: String,
}

impl Requester {
    /// Slack mention markup, e.g. `<@U123|alice>`.
    pub fn mention(&self) -> String {
        format!("<@{}|{}>", self.id, self.name)
    }
}

/// The single playlist all track commands operate on.
///
/// An empty `id` means no playlist is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPlaylist {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permalink: String,
}

impl CurrentPlaylist {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        !self.id.is_empty()
    }

    /// Slack link to the playlist, or an empty string when no permalink is known.
    pub fn link(&self) -> String {
        if self.permalink.is_empty() {
            String::new()
        } else {
            format!("<{}|{}>", self.permalink, self.name)
        }
    }
}

impl From<&Playlist> for CurrentPlaylist {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.clone(),
            name: playlist.name.clone(),
            permalink: playlist.uri.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct CurrentPlaylistTableRow {
    pub id: String,
    pub name: String,
    pub permalink: String,
}

/// A track matched by catalog search. Only built by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRef {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
}

impl TrackRef {
    pub fn primary_artist(&self) -> &str {
        self.artists
            .first()
            .map(String::as_str)
            .unwrap_or("unknown artist")
    }

    /// Slack link markup, e.g. `<spotify:track:..|*Title* by *Artist*>`.
    pub fn link(&self) -> String {
        format!("<{}|{}>", self.uri, self.describe())
    }

    pub fn describe(&self) -> String {
        format!("*{}* by *{}*", self.name, self.primary_artist())
    }
}

impl From<Track> for TrackRef {
    fn from(track: Track) -> Self {
        let uri = if track.uri.is_empty() {
            format!("spotify:track:{}", track.id)
        } else {
            track.uri
        };
        Self {
            id: track.id,
            uri,
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
        }
    }
}
