//! Serde types for the Telegram Bot API wire format.
//!
//! Only the fields this bot reads are modeled; everything else in an update
//! is ignored during deserialization.

use serde::{Deserialize, Serialize};
use station_roster_core::{ChatId, ChatUserId};
use station_roster_transport::{EventPayload, InboundEvent, ReplyMarkup};

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// One update from `getUpdates`.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
    /// Thumbnail sizes in ascending resolution; the last is the original.
    pub photo: Option<Vec<PhotoSize>>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl User {
    fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

impl Update {
    /// Normalizes this update into an [`InboundEvent`].
    ///
    /// Returns `None` for update kinds the bot does not handle, such as
    /// stickers, message edits, or a callback whose source message is gone.
    #[must_use]
    pub fn into_event(self) -> Option<InboundEvent> {
        if let Some(callback) = self.callback_query {
            let message = callback.message?;
            let data = callback.data?;
            return Some(InboundEvent {
                from: ChatUserId::new(callback.from.id),
                from_name: callback.from.display_name(),
                chat: ChatId::new(message.chat.id),
                private: message.chat.kind == "private",
                payload: EventPayload::Callback {
                    id: callback.id,
                    message_id: message.message_id,
                    data,
                },
            });
        }

        let message = self.message?;
        let from = message.from?;
        let payload = match (message.photo, message.text) {
            (Some(sizes), _) => EventPayload::Photo {
                file_id: sizes.last()?.file_id.clone(),
            },
            (None, Some(text)) => EventPayload::Text { text },
            (None, None) => return None,
        };
        Some(InboundEvent {
            from: ChatUserId::new(from.id),
            from_name: from.display_name(),
            chat: ChatId::new(message.chat.id),
            private: message.chat.kind == "private",
            payload,
        })
    }
}

/// `reply_markup` in the shape the Bot API expects.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WireMarkup {
    Inline {
        inline_keyboard: Vec<Vec<WireInlineButton>>,
    },
    Keyboard {
        keyboard: Vec<Vec<WireKeyButton>>,
        resize_keyboard: bool,
    },
    Remove {
        remove_keyboard: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct WireInlineButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Serialize)]
pub struct WireKeyButton {
    pub text: String,
}

impl From<&ReplyMarkup> for WireMarkup {
    fn from(markup: &ReplyMarkup) -> Self {
        match markup {
            ReplyMarkup::Inline { rows } => Self::Inline {
                inline_keyboard: rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|b| WireInlineButton {
                                text: b.label.clone(),
                                callback_data: b.data.clone(),
                            })
                            .collect()
                    })
                    .collect(),
            },
            ReplyMarkup::Keyboard { rows } => Self::Keyboard {
                keyboard: rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|text| WireKeyButton { text: text.clone() })
                            .collect()
                    })
                    .collect(),
                resize_keyboard: true,
            },
            ReplyMarkup::Remove => Self::Remove {
                remove_keyboard: true,
            },
        }
    }
}

/// Body for `getUpdates`.
#[derive(Debug, Serialize)]
pub struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: [&'static str; 2],
}

/// Body for `sendMessage`.
#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<WireMarkup>,
}

/// Body for `sendPhoto`; `photo` is a file id or an http(s) URL.
#[derive(Debug, Serialize)]
pub struct SendPhoto<'a> {
    pub chat_id: i64,
    pub photo: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<&'a str>,
}

/// Body for `editMessageText`.
#[derive(Debug, Serialize)]
pub struct EditMessageText<'a> {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: &'a str,
}

/// Body for `answerCallbackQuery`.
#[derive(Debug, Serialize)]
pub struct AnswerCallbackQuery<'a> {
    pub callback_query_id: &'a str,
}
