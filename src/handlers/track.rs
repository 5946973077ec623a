use super::{CommandError, Context, messages};
use crate::{
    command::{Command, TrackQuery},
    resolver,
    types::{CurrentPlaylist, OutboundMessage},
};

/// Reads the current playlist and fails fast when none is selected.
async fn selected_playlist(ctx: &Context<'_>) -> Result<CurrentPlaylist, CommandError> {
    let playlist = ctx.store.read().await?;
    if !playlist.is_set() {
        return Err(CommandError::Validation(messages::NO_PLAYLIST.to_string()));
    }
    Ok(playlist)
}

fn track_query(ctx: &Context<'_>, command: &Command) -> Result<TrackQuery, CommandError> {
    TrackQuery::from_args(&command.args)
        .ok_or_else(|| CommandError::Validation(messages::usage(ctx.slash_command, command.verb)))
}

pub async fn add(ctx: &Context<'_>, command: &Command) -> Result<OutboundMessage, CommandError> {
    let playlist = selected_playlist(ctx).await?;
    let query = track_query(ctx, command)?;
    let track = resolver::resolve(ctx.catalog, &query).await?;

    ctx.catalog
        .add_tracks(&playlist.id, std::slice::from_ref(&track.uri))
        .await?;

    let added = format!(
        "{} added {} to the playlist {}",
        ctx.requester.mention(),
        track.link(),
        playlist.link()
    );
    Ok(OutboundMessage::broadcast(format!(
        "{}\n type `{} help` for details on how to add songs like this.",
        added.trim_end(),
        ctx.slash_command
    )))
}

pub async fn remove(ctx: &Context<'_>, command: &Command) -> Result<OutboundMessage, CommandError> {
    let playlist = selected_playlist(ctx).await?;
    let query = track_query(ctx, command)?;
    let track = resolver::resolve(ctx.catalog, &query).await?;

    ctx.catalog
        .remove_tracks(&playlist.id, std::slice::from_ref(&track.uri))
        .await?;

    let text = format!(
        "All instances of {} have been removed from the playlist {}",
        track.describe(),
        playlist.link()
    );
    Ok(OutboundMessage::private(text.trim_end()))
}

pub async fn share(ctx: &Context<'_>, command: &Command) -> Result<OutboundMessage, CommandError> {
    let query = track_query(ctx, command)?;
    let track = resolver::resolve(ctx.catalog, &query).await?;

    Ok(OutboundMessage::broadcast(format!(
        "{} shared {} but has not added it to a playlist.",
        ctx.requester.mention(),
        track.link()
    )))
}
