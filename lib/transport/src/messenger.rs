//! Outbound messaging abstraction.
//!
//! The [`Messenger`] trait is the only seam through which the system talks
//! back to the chat platform. The production implementation lives in the
//! binary; tests use [`RecordingMessenger`].

use crate::markup::ReplyMarkup;
use async_trait::async_trait;
use station_roster_core::ChatId;
use std::collections::HashSet;
use std::sync::Mutex;

/// Errors from talking to the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The HTTP round-trip to the platform failed.
    RequestFailed { message: String },
    /// The platform accepted the request but answered with an error.
    Rejected { description: String },
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequestFailed { message } => write!(f, "platform request failed: {message}"),
            Self::Rejected { description } => {
                write!(f, "platform rejected request: {description}")
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// Trait for sending messages to the chat platform.
///
/// This abstraction allows exercising dialogue flows without network access.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a text message, optionally with keyboard markup.
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        markup: Option<&ReplyMarkup>,
    ) -> Result<(), TransportError>;

    /// Sends a photo by file id or URL, optionally with a caption.
    async fn send_photo(
        &self,
        chat: ChatId,
        photo: &str,
        caption: Option<&str>,
    ) -> Result<(), TransportError>;

    /// Replaces the text (and markup) of a previously sent message.
    async fn edit_text(
        &self,
        chat: ChatId,
        message_id: i64,
        text: &str,
    ) -> Result<(), TransportError>;

    /// Acknowledges an inline button tap so the client stops its spinner.
    async fn ack_callback(&self, callback_id: &str) -> Result<(), TransportError>;

    /// Sends a plain text message with no markup.
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<(), TransportError> {
        self.send_message(chat, text, None).await
    }
}

/// One captured outgoing call on a [`RecordingMessenger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    Message {
        chat: ChatId,
        text: String,
        markup: Option<ReplyMarkup>,
    },
    Photo {
        chat: ChatId,
        photo: String,
        caption: Option<String>,
    },
    Edit {
        chat: ChatId,
        message_id: i64,
        text: String,
    },
}

impl Outgoing {
    /// The chat this call targeted.
    #[must_use]
    pub fn chat(&self) -> ChatId {
        match self {
            Self::Message { chat, .. } | Self::Photo { chat, .. } | Self::Edit { chat, .. } => {
                *chat
            }
        }
    }

    /// The visible text of this call (message text, caption, or edit text).
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Message { text, .. } | Self::Edit { text, .. } => text,
            Self::Photo { caption, .. } => caption.as_deref().unwrap_or(""),
        }
    }
}

/// A messenger that records every call and can be told to fail per chat.
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Outgoing>>,
    acked: Mutex<Vec<String>>,
    failing_chats: Mutex<HashSet<ChatId>>,
}

impl RecordingMessenger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every future send to `chat` fail with a request error.
    pub fn fail_chat(&self, chat: ChatId) {
        self.failing_chats.lock().unwrap().insert(chat);
    }

    /// Returns a copy of everything sent so far, in order.
    #[must_use]
    pub fn sent(&self) -> Vec<Outgoing> {
        self.sent.lock().unwrap().clone()
    }

    /// Returns the visible texts sent to one chat, in order.
    #[must_use]
    pub fn texts_to(&self, chat: ChatId) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.chat() == chat)
            .map(|o| o.text().to_string())
            .collect()
    }

    /// Returns the callback ids acknowledged so far.
    #[must_use]
    pub fn acked(&self) -> Vec<String> {
        self.acked.lock().unwrap().clone()
    }

    /// Drops everything recorded so far.
    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
        self.acked.lock().unwrap().clear();
    }

    fn check(&self, chat: ChatId) -> Result<(), TransportError> {
        if self.failing_chats.lock().unwrap().contains(&chat) {
            return Err(TransportError::RequestFailed {
                message: format!("injected failure for chat {chat}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        markup: Option<&ReplyMarkup>,
    ) -> Result<(), TransportError> {
        self.check(chat)?;
        self.sent.lock().unwrap().push(Outgoing::Message {
            chat,
            text: text.to_string(),
            markup: markup.cloned(),
        });
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: ChatId,
        photo: &str,
        caption: Option<&str>,
    ) -> Result<(), TransportError> {
        self.check(chat)?;
        self.sent.lock().unwrap().push(Outgoing::Photo {
            chat,
            photo: photo.to_string(),
            caption: caption.map(str::to_string),
        });
        Ok(())
    }

    async fn edit_text(
        &self,
        chat: ChatId,
        message_id: i64,
        text: &str,
    ) -> Result<(), TransportError> {
        self.check(chat)?;
        self.sent.lock().unwrap().push(Outgoing::Edit {
            chat,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn ack_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.acked.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_sends_in_order() {
        let messenger = RecordingMessenger::new();
        let chat = ChatId::new(5);

        messenger.send_text(chat, "first").await.expect("send");
        messenger
            .send_photo(chat, "file123", Some("second"))
            .await
            .expect("send");

        let texts = messenger.texts_to(chat);
        assert_eq!(texts, ["first", "second"]);
    }

    #[tokio::test]
    async fn injected_failure_only_hits_target_chat() {
        let messenger = RecordingMessenger::new();
        let good = ChatId::new(1);
        let bad = ChatId::new(2);
        messenger.fail_chat(bad);

        assert!(messenger.send_text(good, "hello").await.is_ok());
        let err = messenger
            .send_text(bad, "hello")
            .await
            .expect_err("should fail");
        assert!(matches!(err, TransportError::RequestFailed { .. }));
        assert_eq!(messenger.sent().len(), 1);
    }

    #[tokio::test]
    async fn send_text_delegates_without_markup() {
        let messenger = RecordingMessenger::new();
        messenger
            .send_text(ChatId::new(9), "plain")
            .await
            .expect("send");

        match &messenger.sent()[0] {
            Outgoing::Message { markup, .. } => assert!(markup.is_none()),
            other => panic!("unexpected outgoing: {other:?}"),
        }
    }
}
