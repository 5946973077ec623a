//! Parsing of slash command text.
//!
//! A command looks like `verb - arg - arg`, e.g.
//! `add - john williams - duel of the fates`. The literal `help` is accepted
//! on its own. Parsing is pure: no I/O happens here.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Separator between the verb and each argument.
pub const SEPARATOR: &str = " - ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Add,
    Remove,
    Share,
    Create,
    DeletePlaylist,
    SetPlaylist,
    Help,
}

impl Verb {
    pub const ALL: [Verb; 7] = [
        Verb::Add,
        Verb::Remove,
        Verb::Share,
        Verb::Create,
        Verb::DeletePlaylist,
        Verb::SetPlaylist,
        Verb::Help,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Add => "add",
            Verb::Remove => "remove",
            Verb::Share => "share",
            Verb::Create => "create",
            Verb::DeletePlaylist => "deleteplaylist",
            Verb::SetPlaylist => "setplaylist",
            Verb::Help => "help",
        }
    }

    /// Label used as prefix of provider error messages, e.g. `add track error: ...`.
    pub fn action(&self) -> &'static str {
        match self {
            Verb::Add => "add track",
            Verb::Remove => "remove track",
            Verb::Share => "share track",
            Verb::Create => "create playlist",
            Verb::DeletePlaylist => "delete playlist",
            Verb::SetPlaylist => "set playlist",
            Verb::Help => "help",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Verb::ALL
            .into_iter()
            .find(|v| v.as_str() == needle)
            .ok_or(ParseError::InvalidCommand(needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("command needs a command separator")]
    MissingSeparator,

    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub args: Vec<String>,
}

impl Command {
    /// The single argument of `create`/`deleteplaylist`/`setplaylist`.
    ///
    /// Returns `None` unless exactly one argument was given.
    pub fn single_arg(&self) -> Option<&str> {
        match self.args.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }
}

/// Parses raw slash command text into a [`Command`].
pub fn parse(raw: &str) -> Result<Command, ParseError> {
    let text = raw.trim();

    if text.eq_ignore_ascii_case(Verb::Help.as_str()) {
        return Ok(Command {
            verb: Verb::Help,
            args: Vec::new(),
        });
    }

    if text.is_empty() || !text.contains(SEPARATOR) {
        return Err(ParseError::MissingSeparator);
    }

    let mut pieces = text.split(SEPARATOR);
    let verb: Verb = pieces.next().unwrap_or_default().parse()?;
    let args = pieces.map(|p| p.trim().to_string()).collect();

    Ok(Command { verb, args })
}

/// Search terms for a track: optional artist plus title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    pub artist: Option<String>,
    pub title: String,
}

impl TrackQuery {
    /// One argument is a bare title; two or more are artist then title.
    /// Arguments past the second are ignored.
    ///
    /// Returns `None` when there is no usable title.
    pub fn from_args(args: &[String]) -> Option<Self> {
        let query = match args {
            [] => return None,
            [title] => TrackQuery {
                artist: None,
                title: title.clone(),
            },
            [artist, title, ..] => TrackQuery {
                artist: Some(artist.clone()).filter(|a| !a.is_empty()),
                title: title.clone(),
            },
        };

        if query.title.is_empty() {
            None
        } else {
            Some(query)
        }
    }
}
