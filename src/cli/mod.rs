//! # CLI Module
//!
//! Command-line entry points of the `slackify` binary.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the relay: restores the Spotify session and serves the
//!   Slack webhook and OAuth endpoints
//! - [`auth`] - Opens the relay's `/authorise` page in the browser
//! - [`playlist`] - Shows or clears the stored current playlist
//!
//! ## Usage Patterns
//!
//! ```bash
//! slackify serve                 # start the relay
//! slackify auth                  # log the relay in to Spotify
//! slackify playlist              # which playlist do commands target?
//! slackify playlist --clear      # unset it
//! ```

mod auth;
mod playlist;
mod serve;

pub use auth::auth;
pub use playlist::playlist;
pub use serve::serve;
