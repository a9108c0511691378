use crate::app::location::{ChainLink, Location};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures turning a raw file reference into a usable path.
#[derive(Debug, Error)]
pub enum FileNameError {
    #[error("cannot determine the home directory")]
    NoHomeDir,
    #[error("unknown user: {0}")]
    UnknownUser(String),
    #[error("cannot read the password database: {0}")]
    Passwd(#[source] io::Error),
}

/// An error recorded while parsing a file tree. None of these stop the
/// overall parse; each one abandons at most the file or line it names.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{note}: couldn't expand '{name}': {source}")]
    Expand {
        note: String,
        name: String,
        #[source]
        source: FileNameError,
    },

    #[error("{note}: loop found: '{}' has been visited before: {link}", path.display())]
    IncludeLoop {
        note: String,
        path: PathBuf,
        link: ChainLink,
    },

    #[error("{note}: couldn't open '{}': {source}", path.display())]
    Open {
        note: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {location}: missing include file name: {:?}", location.note(), location.content().unwrap_or_default())]
    MissingIncludeName { location: Location },

    #[error("{}: {location}: {source}", location.note())]
    Line {
        location: Location,
        #[source]
        source: anyhow::Error,
    },

    #[error("{}: {location}: read failed: {source}", location.note())]
    Read {
        location: Location,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    /// The location the error was raised at, for errors tied to a line.
    pub fn location(&self) -> Option<&Location> {
        match self {
            ParseError::MissingIncludeName { location }
            | ParseError::Line { location, .. }
            | ParseError::Read { location, .. } => Some(location),
            _ => None,
        }
    }
}
