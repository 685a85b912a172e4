//! HTTP client for the Telegram Bot API.
//!
//! Implements [`Messenger`] for outbound traffic and exposes long polling
//! for inbound updates. Everything above this module works in terms of
//! [`InboundEvent`](station_roster_transport::InboundEvent)s and never sees
//! the wire format.

pub mod wire;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use station_roster_core::ChatId;
use station_roster_transport::{Messenger, ReplyMarkup, TransportError};
use std::time::Duration;
use wire::{ApiResponse, Update, WireMarkup};

/// Extra headroom over the long-poll timeout before the HTTP client gives up.
const HTTP_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// A Telegram Bot API client bound to one bot token.
pub struct TelegramApi {
    client: reqwest::Client,
    base_url: String,
    poll_timeout: Duration,
}

impl TelegramApi {
    /// Creates a client for the given bot token.
    ///
    /// `poll_timeout` is how long `getUpdates` keeps the connection open
    /// waiting for new updates.
    pub fn new(token: &str, poll_timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(poll_timeout + HTTP_TIMEOUT_MARGIN)
            .build()
            .map_err(|e| TransportError::RequestFailed {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: format!("https://api.telegram.org/bot{token}"),
            poll_timeout,
        })
    }

    /// Long-polls for the next batch of updates.
    ///
    /// `offset` must be one past the highest `update_id` already handled so
    /// the platform stops redelivering it.
    pub async fn updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TransportError> {
        self.call(
            "getUpdates",
            &wire::GetUpdates {
                offset,
                timeout: self.poll_timeout.as_secs(),
                allowed_updates: ["message", "callback_query"],
            },
        )
        .await
    }

    async fn call<P, T>(&self, method: &str, payload: &P) -> Result<T, TransportError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::RequestFailed {
                message: format!("{method}: {e}"),
            })?;

        let body: ApiResponse<T> =
            response
                .json()
                .await
                .map_err(|e| TransportError::RequestFailed {
                    message: format!("{method}: unreadable response: {e}"),
                })?;

        if !body.ok {
            return Err(TransportError::Rejected {
                description: body
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }
        body.result.ok_or_else(|| TransportError::Rejected {
            description: format!("{method}: ok response without a result"),
        })
    }
}

#[async_trait]
impl Messenger for TelegramApi {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        markup: Option<&ReplyMarkup>,
    ) -> Result<(), TransportError> {
        self.call::<_, serde_json::Value>(
            "sendMessage",
            &wire::SendMessage {
                chat_id: chat.get(),
                text,
                reply_markup: markup.map(WireMarkup::from),
            },
        )
        .await?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: ChatId,
        photo: &str,
        caption: Option<&str>,
    ) -> Result<(), TransportError> {
        self.call::<_, serde_json::Value>(
            "sendPhoto",
            &wire::SendPhoto {
                chat_id: chat.get(),
                photo,
                caption,
            },
        )
        .await?;
        Ok(())
    }

    async fn edit_text(
        &self,
        chat: ChatId,
        message_id: i64,
        text: &str,
    ) -> Result<(), TransportError> {
        self.call::<_, serde_json::Value>(
            "editMessageText",
            &wire::EditMessageText {
                chat_id: chat.get(),
                message_id,
                text,
            },
        )
        .await?;
        Ok(())
    }

    async fn ack_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.call::<_, serde_json::Value>(
            "answerCallbackQuery",
            &wire::AnswerCallbackQuery {
                callback_query_id: callback_id,
            },
        )
        .await?;
        Ok(())
    }
}
