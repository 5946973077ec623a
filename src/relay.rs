//! Per-request pipeline of a slash command.
//!
//! ```text
//! refresh token → parse text → dispatch to handler → notify
//! ```
//!
//! Each inbound webhook runs [`Relay::process`] as its own task. Requests
//! are not coordinated with each other; concurrent playlist changes race
//! and the last write wins.

use std::sync::Arc;

use crate::{
    command::{self, ParseError},
    handlers::{Dispatcher, messages},
    notifier::Notifier,
    spotify::Authenticator,
    types::{OutboundMessage, Requester, SlashCommand},
    warning,
};

pub struct Relay {
    auth: Arc<dyn Authenticator>,
    dispatcher: Dispatcher,
    notifier: Arc<dyn Notifier>,
}

impl Relay {
    pub fn new(
        auth: Arc<dyn Authenticator>,
        dispatcher: Dispatcher,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            auth,
            dispatcher,
            notifier,
        }
    }

    /// Runs one slash command to completion and sends exactly one message
    /// to its `response_url`.
    pub async fn process(&self, request: SlashCommand) {
        let message = self.handle(&request).await;
        self.notifier.notify(&message, &request.response_url).await;
    }

    /// Sends the private fallback reply for a request whose task died
    /// before [`Relay::process`] could answer it.
    pub async fn report_failure(&self, response_url: &str) {
        let message = OutboundMessage::private(messages::INTERNAL_ERROR);
        self.notifier.notify(&message, response_url).await;
    }

    /// Produces the single reply for a slash command without sending it.
    pub async fn handle(&self, request: &SlashCommand) -> OutboundMessage {
        if let Err(e) = self.auth.refresh().await {
            warning!("Token refresh failed: {}", e);
            let text = if e.needs_reauthorisation() {
                messages::reauthorise(self.dispatcher.home_url())
            } else {
                format!("Could not refresh access token: {}", e)
            };
            return OutboundMessage::private(text);
        }

        let slash_command = self.dispatcher.slash_command();
        let command = match command::parse(&request.text) {
            Ok(command) => command,
            Err(ParseError::MissingSeparator) => {
                return OutboundMessage::private(messages::missing_separator(slash_command));
            }
            Err(ParseError::InvalidCommand(_)) => {
                return OutboundMessage::private(messages::invalid_command(slash_command));
            }
        };

        let requester = Requester {
            id: request.user_id.clone(),
            name: request.user_name.clone(),
        };
        self.dispatcher.dispatch(&command, &requester).await
    }
}
