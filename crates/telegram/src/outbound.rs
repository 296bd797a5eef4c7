use {
    async_trait::async_trait,
    teloxide::{
        payloads::{SendMessageSetters, SendPhotoSetters, SendVideoSetters},
        prelude::*,
        types::{ChatId, InputFile, ParseMode},
    },
};

use crate::{error::Result, keyboard};

/// Outbound boundary toward the messaging transport.
///
/// Handlers and the broadcast dispatcher talk to this trait; production uses
/// [`TelegramGateway`], tests substitute recording mocks.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send a text reply with lightweight HTML markup (bold, link).
    async fn send_html(&self, chat_id: i64, html: &str) -> Result<()>;

    /// Send a text reply with inline keyboard rows attached.
    async fn send_with_keyboard(
        &self,
        chat_id: i64,
        html: &str,
        rows: &[Vec<keyboard::Button>],
    ) -> Result<()>;

    /// Re-send a previously uploaded photo by file id.
    async fn send_photo(&self, chat_id: i64, file_id: &str, caption: &str) -> Result<()>;

    /// Re-send a previously uploaded video by file id.
    async fn send_video(&self, chat_id: i64, file_id: &str, caption: &str) -> Result<()>;
}

/// Production gateway over the Telegram Bot API.
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessagingGateway for TelegramGateway {
    async fn send_html(&self, chat_id: i64, html: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), html)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }

    async fn send_with_keyboard(
        &self,
        chat_id: i64,
        html: &str,
        rows: &[Vec<keyboard::Button>],
    ) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), html)
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard::to_markup(rows))
            .await?;
        Ok(())
    }

    async fn send_photo(&self, chat_id: i64, file_id: &str, caption: &str) -> Result<()> {
        let mut req = self
            .bot
            .send_photo(ChatId(chat_id), InputFile::file_id(file_id.to_owned()));
        if !caption.is_empty() {
            req = req.caption(caption);
        }
        req.await?;
        Ok(())
    }

    async fn send_video(&self, chat_id: i64, file_id: &str, caption: &str) -> Result<()> {
        let mut req = self
            .bot
            .send_video(ChatId(chat_id), InputFile::file_id(file_id.to_owned()));
        if !caption.is_empty() {
            req = req.caption(caption);
        }
        req.await?;
        Ok(())
    }
}
