use super::{CommandError, Context, messages};
use crate::{
    command::Command,
    types::{CurrentPlaylist, OutboundMessage, Playlist},
    warning,
};

fn playlist_name<'c>(ctx: &Context<'_>, command: &'c Command) -> Result<&'c str, CommandError> {
    command
        .single_arg()
        .ok_or_else(|| CommandError::Validation(messages::usage(ctx.slash_command, command.verb)))
}

/// Scans the complete owned playlist listing; the first exact name match wins.
async fn find_owned(ctx: &Context<'_>, name: &str) -> Result<Playlist, CommandError> {
    ctx.catalog
        .user_playlists()
        .await?
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| CommandError::NotFound(messages::PLAYLIST_NOT_FOUND.to_string()))
}

pub async fn create(ctx: &Context<'_>, command: &Command) -> Result<OutboundMessage, CommandError> {
    let name = playlist_name(ctx, command)?;
    let playlist = ctx.catalog.create_playlist(name).await?;
    ctx.store.write(&CurrentPlaylist::from(&playlist)).await?;

    Ok(OutboundMessage::broadcast(format!(
        "{} created a playlist <{}|*{}*>.",
        ctx.requester.mention(),
        playlist.uri,
        playlist.name
    )))
}

pub async fn delete(ctx: &Context<'_>, command: &Command) -> Result<OutboundMessage, CommandError> {
    let name = playlist_name(ctx, command)?;
    let playlist = find_owned(ctx, name).await?;
    let current = ctx.store.read().await?;
    ctx.catalog.unfollow_playlist(&playlist.id).await?;

    let mut text = format!(
        "Playlist *{}* has been deleted by {}.",
        playlist.name,
        ctx.requester.mention()
    );
    // The playlist is gone at this point; a failed reset must not hide that.
    if current.id == playlist.id {
        if let Err(e) = ctx.store.write(&CurrentPlaylist::empty()).await {
            warning!("Cannot reset current playlist after deleting {}: {}", playlist.id, e);
            text.push_str(&format!(" The current playlist could not be reset: {}", e));
        }
    }

    Ok(OutboundMessage::broadcast(text))
}

pub async fn set(ctx: &Context<'_>, command: &Command) -> Result<OutboundMessage, CommandError> {
    let name = playlist_name(ctx, command)?;
    let playlist = find_owned(ctx, name).await?;
    ctx.store.write(&CurrentPlaylist::from(&playlist)).await?;

    Ok(OutboundMessage::broadcast(format!(
        "{} has set the playlist to <{}|*{}*>.",
        ctx.requester.mention(),
        playlist.uri,
        playlist.name
    )))
}
