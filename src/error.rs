//! Error taxonomy for a release notes run.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Broad category of a failed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required environment value was absent
    Configuration,
    /// An input file was missing or unreadable
    Input,
    /// The text-generation call failed (network, auth, quota, model error)
    Transport,
    /// The output file could not be written
    Write,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Input => "input",
            Self::Transport => "transport",
            Self::Write => "write",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    #[error("environment variable {name} is not set")]
    MissingEnv { name: &'static str },

    #[error("failed to read {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("text generation failed: {0:#}")]
    Generation(#[source] anyhow::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NotesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingEnv { .. } => ErrorKind::Configuration,
            Self::Input { .. } => ErrorKind::Input,
            Self::Generation(_) => ErrorKind::Transport,
            Self::Write { .. } => ErrorKind::Write,
        }
    }
}
