//! Error types for the dialogue crate.
//!
//! Validation problems are not errors here: flows handle them in place by
//! re-prompting, so only the two failure classes a dialogue step cannot
//! absorb locally remain.

use station_roster_directory::DirectoryError;
use station_roster_transport::TransportError;
use std::fmt;

/// A dialogue step failed in a way that needs the caller's rollback policy.
///
/// The dispatcher restores the session to its pre-step state and tells the
/// user to retry, so neither variant ever claims a commit that didn't
/// happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueError {
    /// An outbound send the step depends on failed.
    Send(TransportError),
    /// Reading or writing the roster failed.
    Store(DirectoryError),
}

impl fmt::Display for DialogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Send(error) => write!(f, "outbound send failed: {error}"),
            Self::Store(error) => write!(f, "roster access failed: {error}"),
        }
    }
}

impl std::error::Error for DialogueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Send(error) => Some(error),
            Self::Store(error) => Some(error),
        }
    }
}

impl From<TransportError> for DialogueError {
    fn from(error: TransportError) -> Self {
        Self::Send(error)
    }
}

impl From<DirectoryError> for DialogueError {
    fn from(error: DirectoryError) -> Self {
        Self::Store(error)
    }
}

/// Errors from session bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The user already has a dialogue in progress.
    AlreadyActive { kind: &'static str },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyActive { kind } => {
                write!(f, "a {kind} dialogue is already in progress")
            }
        }
    }
}

impl std::error::Error for SessionError {}
