//! Errors from roster storage operations.

use station_roster_core::{StationId, WorkerId};

/// Errors a [`Directory`](crate::Directory) implementation can return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The storage backend failed to execute the operation.
    Backend { message: String },
    /// The worker the operation targets does not exist.
    WorkerNotFound { id: WorkerId },
    /// The station the operation targets does not exist.
    StationNotFound { id: StationId },
}

impl std::fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend { message } => write!(f, "roster backend error: {message}"),
            Self::WorkerNotFound { id } => write!(f, "worker not found: {id}"),
            Self::StationNotFound { id } => write!(f, "station not found: {id}"),
        }
    }
}

impl std::error::Error for DirectoryError {}
