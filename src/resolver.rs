//! Free text to track resolution.

use thiserror::Error;

use crate::{
    command::TrackQuery,
    spotify::{MusicCatalog, SpotifyError},
    types::TrackRef,
};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no track matches the query")]
    NotFound,

    #[error(transparent)]
    Provider(#[from] SpotifyError),
}

/// Catalog search expression: `track:<title>` or `artist:<artist> track:<title>`.
pub fn search_expression(query: &TrackQuery) -> String {
    match &query.artist {
        Some(artist) => format!("artist:{} track:{}", artist, query.title),
        None => format!("track:{}", query.title),
    }
}

/// Resolves a query to the first track the catalog returns.
pub async fn resolve(
    catalog: &dyn MusicCatalog,
    query: &TrackQuery,
) -> Result<TrackRef, ResolveError> {
    let tracks = catalog.search_tracks(&search_expression(query)).await?;
    tracks
        .into_iter()
        .next()
        .map(TrackRef::from)
        .ok_or(ResolveError::NotFound)
}
