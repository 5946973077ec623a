use tabled::Table;

use crate::{
    config, error, info,
    management::{FilePlaylistStore, PlaylistStore},
    success,
    types::{CurrentPlaylist, CurrentPlaylistTableRow},
};

pub async fn playlist(clear: bool) {
    let store = FilePlaylistStore::new(config::playlist_path());

    if clear {
        match store.write(&CurrentPlaylist::empty()).await {
            Ok(()) => success!("Current playlist cleared."),
            Err(e) => error!("Cannot clear current playlist. Err: {}", e),
        }
        return;
    }

    let current = match store.read().await {
        Ok(p) => p,
        Err(e) => error!("Cannot read {}. Err: {}", store.path().display(), e),
    };

    if !current.is_set() {
        info!("No playlist has been set.");
        return;
    }

    let table = Table::new(vec![CurrentPlaylistTableRow {
        id: current.id,
        name: current.name,
        permalink: current.permalink,
    }]);
    println!("{}", table);
}
