//! Slack to Spotify Command Relay Library
//!
//! This library receives Slack slash commands, interprets them as playlist
//! operations and carries them out against the Spotify Web API. Results are
//! posted back to Slack through the `response_url` of the original request.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints (slash command webhook, OAuth flow, status pages)
//! - `cli` - Command-line interface implementations
//! - `command` - Parsing of the free-text command into a verb and arguments
//! - `config` - Configuration management and environment variables
//! - `handlers` - One handler per verb, producing a single outbound message
//! - `management` - Persisted state (current playlist, OAuth token)
//! - `notifier` - Delivery of messages back to Slack
//! - `relay` - Per-request pipeline: refresh, parse, dispatch, notify
//! - `resolver` - Free text to track resolution through catalog search
//! - `server` - HTTP server bootstrap
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use slackify::config;
//!
//! #[tokio::main]
//! async fn main() -> slackify::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod command;
pub mod config;
pub mod handlers;
pub mod management;
pub mod notifier;
pub mod relay;
pub mod resolver;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer edges of the application (start-up, CLI commands)
/// where the concrete error type does not matter. Request handling uses
/// the typed errors of each module instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for start-up failures. Code running inside a request must
/// report problems with [`warning!`] and keep the server alive.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues: failed notifications, provider errors,
/// panicked request tasks.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
