//! User-visible texts.

use crate::command::Verb;

pub const NO_PLAYLIST: &str = "A playlist has not been set.";
pub const TRACK_NOT_FOUND: &str = "Could not find that track.";
pub const PLAYLIST_NOT_FOUND: &str = "Playlist not found.";
pub const INTERNAL_ERROR: &str = "Something went wrong while running that command.";

pub fn missing_separator(slash_command: &str) -> String {
    format!("Enter an appropriate command. Try `{slash_command} help` for usage details.")
}

pub fn invalid_command(slash_command: &str) -> String {
    format!("That is not a valid command. Try `{slash_command} help` for usage details.")
}

pub fn reauthorise(home_url: &str) -> String {
    format!(
        "Could not refresh access token. You probably need to re-authorise yourself from your <{home_url}|app's homepage.>"
    )
}

/// Usage error for a command given the wrong number of arguments.
pub fn usage(slash_command: &str, verb: Verb) -> String {
    match verb {
        Verb::Add | Verb::Remove | Verb::Share => format!(
            "Incorrect form, use `{slash_command} {verb} - artist - track` or `{slash_command} {verb} - track`"
        ),
        Verb::Create => format!(
            "Incorrect form for playlist creation, use `{slash_command} create - playlist name`"
        ),
        Verb::DeletePlaylist => format!(
            "Incorrect form for playlist deletion, use `{slash_command} deleteplaylist - playlist name`"
        ),
        Verb::SetPlaylist => format!(
            "Incorrect form for setting the playlist, use `{slash_command} setplaylist - playlist name`"
        ),
        Verb::Help => format!("Try `{slash_command} help` for usage details."),
    }
}

pub fn help(slash_command: &str) -> String {
    let c = slash_command;
    format!(
        "```
SPOTIFY - SLACK USAGE:

add           - add a track to the current playlist. Example: add - artist - track i.e. {c} add - john williams - duel of the fates
              - add also works with just a track name, i.e. {c} add - duel of the fates.

remove        - remove a track from a playlist. Example: remove - artist - track i.e. {c} remove - john williams - duel of the fates
              - remove also works with just a track name, but is more unreliable than specifying the artist name.

share         - share a track with the channel without adding it to the playlist.
              - {c} share - artist - track, i.e. {c} share - john williams - duel of the fates

create        - create a new playlist and set this to the current working playlist.
              - {c} create - playlist name, i.e. {c} create - MAR/17

deleteplaylist- delete a playlist (if you create a dummy playlist or give an incorrect name).
              - {c} deleteplaylist - playlist name, i.e. {c} deleteplaylist - MAR/17

setplaylist   - set the current working playlist.
              - {c} setplaylist - best of 2017

help          - display this message! {c} help
```"
    )
}
