//! # Command Handlers
//!
//! One handler per [`Verb`]. Each handler returns
//! `Result<OutboundMessage, CommandError>` and [`Dispatcher::dispatch`]
//! folds both arms into a single [`OutboundMessage`], so every invocation
//! yields exactly one message for the notifier.
//!
//! | Verb | Needs playlist | Success visibility |
//! |---|---|---|
//! | add | yes | broadcast |
//! | remove | yes | private |
//! | share | no | broadcast |
//! | create | no | broadcast |
//! | deleteplaylist | no | broadcast |
//! | setplaylist | no | broadcast |
//! | help | no | private |
//!
//! Failures are always private.

pub mod messages;
mod playlist;
mod track;

use std::sync::Arc;

use thiserror::Error;

use crate::{
    command::{Command, Verb},
    management::{PlaylistStore, StoreError},
    resolver::ResolveError,
    spotify::{MusicCatalog, SpotifyError},
    types::{OutboundMessage, Requester},
    warning,
};

#[derive(Debug, Error)]
pub enum CommandError {
    /// Bad command shape, arity or missing precondition.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Provider(#[from] SpotifyError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ResolveError> for CommandError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound => CommandError::NotFound(messages::TRACK_NOT_FOUND.to_string()),
            ResolveError::Provider(e) => CommandError::Provider(e),
        }
    }
}

/// What a handler gets to work with for one request.
pub(crate) struct Context<'a> {
    pub catalog: &'a dyn MusicCatalog,
    pub store: &'a dyn PlaylistStore,
    pub requester: &'a Requester,
    pub slash_command: &'a str,
}

/// Routes a parsed [`Command`] to its handler.
pub struct Dispatcher {
    catalog: Arc<dyn MusicCatalog>,
    store: Arc<dyn PlaylistStore>,
    slash_command: String,
    home_url: String,
}

impl Dispatcher {
    pub fn new(
        catalog: Arc<dyn MusicCatalog>,
        store: Arc<dyn PlaylistStore>,
        slash_command: impl Into<String>,
        home_url: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            store,
            slash_command: slash_command.into(),
            home_url: home_url.into(),
        }
    }

    pub fn slash_command(&self) -> &str {
        &self.slash_command
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    pub async fn dispatch(&self, command: &Command, requester: &Requester) -> OutboundMessage {
        let ctx = Context {
            catalog: self.catalog.as_ref(),
            store: self.store.as_ref(),
            requester,
            slash_command: &self.slash_command,
        };

        let result = match command.verb {
            Verb::Add => track::add(&ctx, command).await,
            Verb::Remove => track::remove(&ctx, command).await,
            Verb::Share => track::share(&ctx, command).await,
            Verb::Create => playlist::create(&ctx, command).await,
            Verb::DeletePlaylist => playlist::delete(&ctx, command).await,
            Verb::SetPlaylist => playlist::set(&ctx, command).await,
            Verb::Help => Ok(OutboundMessage::private(messages::help(&self.slash_command))),
        };

        result.unwrap_or_else(|err| {
            warning!("{} from {} failed: {}", command.verb, requester.name, err);
            self.error_message(command.verb, &err)
        })
    }

    /// Private message describing a failed command.
    pub fn error_message(&self, verb: Verb, err: &CommandError) -> OutboundMessage {
        let text = match err {
            CommandError::Validation(msg) | CommandError::NotFound(msg) => msg.clone(),
            CommandError::Provider(e) if e.needs_reauthorisation() => {
                messages::reauthorise(&self.home_url)
            }
            CommandError::Provider(e) => format!("{} error: {}", verb.action(), e),
            CommandError::Store(e) => format!("{} error: {}", verb.action(), e),
        };
        OutboundMessage::private(text)
    }
}
