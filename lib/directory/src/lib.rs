//! Roster records for metro stations: stations, workers, and station heads.
//!
//! The [`Directory`] trait is the storage seam; the binary provides the
//! Postgres implementation and [`MemoryDirectory`] backs the tests.

pub mod error;
pub mod position;
pub mod station;
pub mod store;
pub mod worker;

pub use error::DirectoryError;
pub use position::{InvalidShift, Position, Shift, UnknownPosition};
pub use station::{HeadAssignment, Station, StationHead};
pub use store::{Directory, MemoryDirectory};
pub use worker::{Worker, WorkerDraft, WorkerPatch};
