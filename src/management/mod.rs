mod auth;
mod error;
mod playlist;

pub use auth::TokenManager;
pub use error::StoreError;
pub use playlist::FilePlaylistStore;
pub use playlist::MemoryPlaylistStore;
pub use playlist::PlaylistStore;
