//! Inbound events from the chat platform.
//!
//! The polling loop in the binary translates raw platform updates into
//! [`InboundEvent`]s so the rest of the system never touches wire formats.

use station_roster_core::{ChatId, ChatUserId};

/// A single inbound event, normalized from a platform update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// The user the event originated from.
    pub from: ChatUserId,
    /// The sender's display name, as the platform reports it.
    pub from_name: String,
    /// The chat the event arrived in.
    pub chat: ChatId,
    /// Whether the chat is a one-on-one conversation with the bot.
    pub private: bool,
    /// What the user actually sent.
    pub payload: EventPayload,
}

/// The content of an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    /// A plain text message, including `/command` messages.
    Text { text: String },
    /// A photo attachment, identified by the platform's file id.
    Photo { file_id: String },
    /// A tap on an inline keyboard button.
    Callback {
        /// Platform id of the tap itself, used to acknowledge it.
        id: String,
        /// Id of the message the tapped keyboard was attached to.
        message_id: i64,
        /// The payload string the button carried.
        data: String,
    },
}

impl InboundEvent {
    /// Returns the text content if this event is a plain text message.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::Text { text } => Some(text),
            _ => None,
        }
    }
}
