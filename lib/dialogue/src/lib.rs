//! Conversation engine and command dispatch for station-roster.
//!
//! An inbound event becomes at most one dialogue step: the [`Router`]
//! resolves the sender's role, runs commands, and advances the sender's
//! session through the typed state machines in [`state`]. Session records
//! live in the bounded [`SessionStore`], which the binary sweeps on a
//! timer.

pub mod callback;
pub mod error;
pub mod keyboards;
pub mod router;
pub mod session;
pub mod state;
pub mod texts;
pub mod validate;

mod browse;
mod commands;
mod engine;
mod head_admin;
mod worker_edit;
mod worker_entry;

pub use error::{DialogueError, SessionError};
pub use router::Router;
pub use session::{EvictedSession, EvictionReason, SessionEntry, SessionStore};
pub use state::Dialogue;
