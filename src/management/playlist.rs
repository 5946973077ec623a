use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::StoreError;
use crate::types::CurrentPlaylist;

/// Holds the single "current playlist" record.
///
/// `read` never fails because nothing was written yet: it returns
/// [`CurrentPlaylist::empty`] instead. `write` replaces the whole record.
/// There is no locking across requests; the last writer wins.
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn read(&self) -> Result<CurrentPlaylist, StoreError>;
    async fn write(&self, playlist: &CurrentPlaylist) -> Result<(), StoreError>;
}

/// JSON file backed store, e.g. `~/.local/share/slackify/playlist.json`.
pub struct FilePlaylistStore {
    path: PathBuf,
}

impl FilePlaylistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PlaylistStore for FilePlaylistStore {
    async fn read(&self) -> Result<CurrentPlaylist, StoreError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(CurrentPlaylist::empty());
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(CurrentPlaylist::empty());
        }
        Ok(serde_json::from_str(&content)?)
    }

    async fn write(&self, playlist: &CurrentPlaylist) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(playlist)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// In-process store; contents are lost on restart.
#[derive(Default)]
pub struct MemoryPlaylistStore {
    playlist: Mutex<CurrentPlaylist>,
}

impl MemoryPlaylistStore {
    pub fn new(playlist: CurrentPlaylist) -> Self {
        Self {
            playlist: Mutex::new(playlist),
        }
    }
}

#[async_trait]
impl PlaylistStore for MemoryPlaylistStore {
    async fn read(&self) -> Result<CurrentPlaylist, StoreError> {
        Ok(self.playlist.lock().await.clone())
    }

    async fn write(&self, playlist: &CurrentPlaylist) -> Result<(), StoreError> {
        *self.playlist.lock().await = playlist.clone();
        Ok(())
    }
}
