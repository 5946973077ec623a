#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use slackify::{
    handlers::Dispatcher,
    management::{MemoryPlaylistStore, PlaylistStore, StoreError},
    notifier::Notifier,
    relay::Relay,
    spotify::{Authenticator, MusicCatalog, SpotifyError},
    types::{
        CurrentPlaylist, OutboundMessage, Playlist, PlaylistOwner, Requester, SlashCommand, Track,
        TrackArtist,
    },
};
use tokio::sync::mpsc::UnboundedSender;

pub const SLASH: &str = "/spotify";
pub const HOME: &str = "https://relay.example.com";
pub const USER: &str = "relay-owner";

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Api,
    TokenExpired,
    /// The call panics instead of returning.
    Panic,
}

impl Failure {
    fn error(self) -> SpotifyError {
        match self {
            Failure::Api => SpotifyError::Api {
                status: 500,
                message: "upstream exploded".to_string(),
            },
            Failure::TokenExpired => SpotifyError::TokenExpired("The access token expired".into()),
            Failure::Panic => panic!("catalog exploded"),
        }
    }
}

/// In-memory catalog recording every call it receives.
#[derive(Default)]
pub struct FakeCatalog {
    pub tracks: Vec<Track>,
    pub playlists: Vec<Playlist>,
    pub failure: Option<Failure>,
    /// Restricts `failure` to calls whose record starts with this prefix.
    pub fail_on: Option<&'static str>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            ..Default::default()
        }
    }

    pub fn with_playlists(playlists: Vec<Playlist>) -> Self {
        Self {
            playlists,
            ..Default::default()
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            tracks: vec![track("t1", "Duel of the Fates", "John Williams")],
            failure: Some(failure),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), SpotifyError> {
        let fails = self.fail_on.is_none_or(|prefix| call.starts_with(prefix));
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some(f) if fails => Err(f.error()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl MusicCatalog for FakeCatalog {
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>, SpotifyError> {
        self.record(format!("search:{query}"))?;
        Ok(self.tracks.clone())
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), SpotifyError> {
        self.record(format!("add:{playlist_id}:{}", uris.join(",")))
    }

    async fn remove_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), SpotifyError> {
        self.record(format!("remove:{playlist_id}:{}", uris.join(",")))
    }

    async fn create_playlist(&self, name: &str) -> Result<Playlist, SpotifyError> {
        self.record(format!("create:{name}"))?;
        Ok(playlist(&format!("new-{name}"), name))
    }

    async fn user_playlists(&self) -> Result<Vec<Playlist>, SpotifyError> {
        self.record("list".to_string())?;
        Ok(self.playlists.clone())
    }

    async fn unfollow_playlist(&self, playlist_id: &str) -> Result<(), SpotifyError> {
        self.record(format!("unfollow:{playlist_id}"))
    }
}

#[derive(Default)]
pub struct FakeAuth {
    pub failure: Option<Failure>,
    pub refreshes: AtomicUsize,
}

#[async_trait]
impl Authenticator for FakeAuth {
    async fn refresh(&self) -> Result<(), SpotifyError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        match self.failure {
            Some(f) => Err(f.error()),
            None => Ok(()),
        }
    }
}

/// Notifier keeping every message it was handed.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(OutboundMessage, String)>>,
    forward: Option<UnboundedSender<OutboundMessage>>,
}

impl RecordingNotifier {
    pub fn forwarding(tx: UnboundedSender<OutboundMessage>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            forward: Some(tx),
        }
    }

    pub fn sent(&self) -> Vec<(OutboundMessage, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &OutboundMessage, response_url: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((message.clone(), response_url.to_string()));
        if let Some(tx) = &self.forward {
            let _ = tx.send(message.clone());
        }
    }
}

/// Store whose writes always fail; reads fail too when `fail_read` is set.
pub struct BrokenStore {
    pub current: CurrentPlaylist,
    pub fail_read: bool,
    pub writes: AtomicUsize,
}

impl BrokenStore {
    pub fn new(current: CurrentPlaylist, fail_read: bool) -> Self {
        Self {
            current,
            fail_read,
            writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PlaylistStore for BrokenStore {
    async fn read(&self) -> Result<CurrentPlaylist, StoreError> {
        if self.fail_read {
            return Err(StoreError::Io(std::io::Error::other("disk gone")));
        }
        Ok(self.current.clone())
    }

    async fn write(&self, _playlist: &CurrentPlaylist) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Io(std::io::Error::other("read-only filesystem")))
    }
}

pub fn track(id: &str, name: &str, artist: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{id}"),
        artists: vec![TrackArtist {
            id: None,
            name: artist.to_string(),
        }],
    }
}

pub fn playlist(id: &str, name: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:playlist:{id}"),
        owner: Some(PlaylistOwner {
            id: USER.to_string(),
        }),
    }
}

pub fn current(id: &str, name: &str) -> CurrentPlaylist {
    CurrentPlaylist {
        id: id.to_string(),
        name: name.to_string(),
        permalink: format!("spotify:playlist:{id}"),
    }
}

pub fn requester() -> Requester {
    Requester {
        id: "U42".to_string(),
        name: "alice".to_string(),
    }
}

pub fn slash(text: &str) -> SlashCommand {
    SlashCommand {
        token: "secret".to_string(),
        text: text.to_string(),
        user_id: "U42".to_string(),
        user_name: "alice".to_string(),
        response_url: "https://hooks.slack.test/reply".to_string(),
    }
}

pub fn dispatcher(catalog: Arc<FakeCatalog>, store: Arc<MemoryPlaylistStore>) -> Dispatcher {
    dispatcher_with(catalog, store)
}

pub fn dispatcher_with(catalog: Arc<FakeCatalog>, store: Arc<dyn PlaylistStore>) -> Dispatcher {
    Dispatcher::new(catalog as Arc<dyn MusicCatalog>, store, SLASH, HOME)
}

pub fn relay(
    auth: Arc<FakeAuth>,
    catalog: Arc<FakeCatalog>,
    store: Arc<MemoryPlaylistStore>,
    notifier: Arc<RecordingNotifier>,
) -> Relay {
    Relay::new(
        auth as Arc<dyn Authenticator>,
        dispatcher(catalog, store),
        notifier as Arc<dyn Notifier>,
    )
}
