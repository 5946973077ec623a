//! Delivery of command results back to Slack.

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    info,
    types::{OutboundMessage, SlackMessage},
    warning,
};

/// Sends a message to the `response_url` of a slash command.
///
/// Delivery failures are logged by the implementation and never reach the
/// caller: there is no channel left to report them to the user.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &OutboundMessage, response_url: &str);
}

/// Posts `{response_type, text}` JSON to Slack.
pub struct SlackNotifier {
    http: Client,
}

impl SlackNotifier {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

impl Default for SlackNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, message: &OutboundMessage, response_url: &str) {
        let payload = SlackMessage::from(message);
        let result = self.http.post(response_url).json(&payload).send().await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!("sendToSlack: {}", message.text);
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warning!("sendToSlack: error, code == {}, {}.", status.as_u16(), body);
            }
            Err(e) => {
                warning!("sendToSlack: transport error: {}", e);
            }
        }
    }
}
