//! Core domain types shared across the station-roster workspace.
//!
//! This crate holds the strongly-typed identifiers every other crate
//! builds on. It deliberately has no async or I/O dependencies.

pub mod id;

pub use id::{ChatId, ChatUserId, ParseIdError, StationId, WorkerId};
