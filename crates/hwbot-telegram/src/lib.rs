//! Telegram adapter (teloxide).
//!
//! Implements the `hwbot-core` MessagingPort with a single `sendMessage` call
//! per message. Failures, including rate limiting, are returned as delivery
//! errors; the notifier decides what to do with them.

use async_trait::async_trait;
use teloxide::prelude::*;

use hwbot_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::port::{MessagingCapabilities, MessagingPort},
    Result,
};

pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Username of the bot account, for the startup log line.
    pub async fn username(&self) -> Result<String> {
        let me = self.bot.get_me().await.map_err(delivery_error)?;
        Ok(me.username().to_string())
    }
}

fn delivery_error(e: teloxide::RequestError) -> Error {
    match e {
        teloxide::RequestError::RetryAfter(d) => {
            Error::Delivery(format!("telegram rate limited, retry after {d:?}"))
        }
        other => Error::Delivery(format!("telegram error: {other}")),
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: TELEGRAM_MESSAGE_LIMIT,
        }
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let msg = self
            .bot
            .send_message(teloxide::types::ChatId(chat_id.0), text)
            .await
            .map_err(delivery_error)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }
}
