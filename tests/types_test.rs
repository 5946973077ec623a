use slackify::types::*;

fn track(uri: &str, artists: &[&str]) -> Track {
    Track {
        id: "t1".to_string(),
        name: "Duel of the Fates".to_string(),
        uri: uri.to_string(),
        artists: artists
            .iter()
            .map(|name| TrackArtist {
                id: None,
                name: name.to_string(),
            })
            .collect(),
    }
}

#[test]
fn test_track_ref_uses_first_artist() {
    let track_ref = TrackRef::from(track(
        "spotify:track:t1",
        &["John Williams", "London Symphony Orchestra"],
    ));

    assert_eq!(track_ref.primary_artist(), "John Williams");
    assert_eq!(
        track_ref.link(),
        "<spotify:track:t1|*Duel of the Fates* by *John Williams*>"
    );
}

#[test]
fn test_track_ref_without_uri_or_artist() {
    let track_ref = TrackRef::from(track("", &[]));

    assert_eq!(track_ref.uri, "spotify:track:t1");
    assert_eq!(track_ref.describe(), "*Duel of the Fates* by *unknown artist*");
}

#[test]
fn test_slack_message_visibility() {
    let private = SlackMessage::from(&OutboundMessage::private("only you"));
    let broadcast = SlackMessage::from(&OutboundMessage::broadcast("everyone"));

    assert_eq!(
        serde_json::to_value(&private).unwrap(),
        serde_json::json!({"response_type": "ephemeral", "text": "only you"})
    );
    assert_eq!(
        serde_json::to_value(&broadcast).unwrap(),
        serde_json::json!({"response_type": "in_channel", "text": "everyone"})
    );
}

#[test]
fn test_current_playlist_sentinel() {
    let empty = CurrentPlaylist::empty();
    assert!(!empty.is_set());
    assert_eq!(empty.link(), "");

    let playlist = Playlist {
        id: "p1".to_string(),
        name: "Office Mix".to_string(),
        uri: "spotify:playlist:p1".to_string(),
        owner: None,
    };
    let current = CurrentPlaylist::from(&playlist);
    assert!(current.is_set());
    assert_eq!(current.link(), "<spotify:playlist:p1|Office Mix>");
}

#[test]
fn test_playlist_listing_deserializes_without_next() {
    let json = r#"{"items":[{"id":"p1","name":"Mix","uri":"spotify:playlist:p1","owner":{"id":"me"}}]}"#;
    let page: GetUserPlaylistsResponse = serde_json::from_str(json).unwrap();

    assert_eq!(page.items.len(), 1);
    assert!(page.next.is_none());
    assert_eq!(page.items[0].owner.as_ref().unwrap().id, "me");
}

#[test]
fn test_requester_mention() {
    let requester = Requester {
        id: "U42".to_string(),
        name: "alice".to_string(),
    };
    assert_eq!(requester.mention(), "<@U42|alice>");
}
