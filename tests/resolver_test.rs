mod common;

use common::{Failure, FakeCatalog, track};
use slackify::{
    command::TrackQuery,
    resolver::{ResolveError, resolve, search_expression},
};

fn query(artist: Option<&str>, title: &str) -> TrackQuery {
    TrackQuery {
        artist: artist.map(str::to_string),
        title: title.to_string(),
    }
}

#[test]
fn test_search_expression() {
    assert_eq!(
        search_expression(&query(None, "duel of the fates")),
        "track:duel of the fates"
    );
    assert_eq!(
        search_expression(&query(Some("john williams"), "duel of the fates")),
        "artist:john williams track:duel of the fates"
    );
}

#[tokio::test]
async fn test_resolve_takes_first_result() {
    let catalog = FakeCatalog::with_tracks(vec![
        track("first", "Duel of the Fates", "John Williams"),
        track("second", "Duel of the Fates (Live)", "LSO"),
    ]);

    let found = resolve(&catalog, &query(Some("john williams"), "duel of the fates"))
        .await
        .unwrap();

    assert_eq!(found.id, "first");
    assert_eq!(found.uri, "spotify:track:first");
    assert_eq!(found.primary_artist(), "John Williams");
    assert_eq!(
        catalog.calls(),
        vec!["search:artist:john williams track:duel of the fates"]
    );
}

#[tokio::test]
async fn test_resolve_empty_result_is_not_found() {
    let catalog = FakeCatalog::default();
    let err = resolve(&catalog, &query(None, "nothing")).await.unwrap_err();
    assert!(matches!(err, ResolveError::NotFound));
}

#[tokio::test]
async fn test_resolve_passes_provider_error_through() {
    let catalog = FakeCatalog::failing(Failure::Api);
    let err = resolve(&catalog, &query(None, "anything")).await.unwrap_err();

    match err {
        ResolveError::Provider(e) => assert!(e.to_string().contains("upstream exploded")),
        other => panic!("unexpected error {other:?}"),
    }
}
