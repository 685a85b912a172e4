//! Chat platform transport layer for station-roster.
//!
//! Defines the inbound event model and the [`Messenger`] seam for outbound
//! traffic. Everything here is platform-shaped but wire-format free; the
//! binary owns the actual HTTP client.

pub mod event;
pub mod markup;
pub mod messenger;

pub use event::{EventPayload, InboundEvent};
pub use markup::{InlineButton, ReplyMarkup};
pub use messenger::{Messenger, Outgoing, RecordingMessenger, TransportError};
