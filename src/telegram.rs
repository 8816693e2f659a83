use telegram_bot_api::{bot, methods::SendMessage, types::ChatId};

use crate::model;
use crate::scanner::Notifier;

/// Telegram delivery for scan reports. Messages go out in plain-text mode so
/// symbol names cannot collide with markup.
pub struct TelegramNotifier {
    bot: bot::BotApi,
    chat_id: i64,
}

impl TelegramNotifier {
    /// Connects to the Bot API. Fails fast when the token is rejected so a
    /// misconfigured deployment never starts scanning.
    pub async fn new(token: String, chat_id: i64) -> model::Result<TelegramNotifier> {
        let bot = bot::BotApi::new(token, None).await?;
        Ok(TelegramNotifier { bot, chat_id })
    }
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> model::Result<()> {
        let resp = self
            .bot
            .send_message(SendMessage {
                chat_id: ChatId::IntType(self.chat_id),
                text: text.to_string(),
                parse_mode: None,
                entities: None,
                disable_web_page_preview: Some(true),
                disable_notification: None,
                protect_content: None,
                reply_to_message_id: None,
                allow_sending_without_reply: None,
                reply_markup: None,
            })
            .await;
        match resp {
            Ok(_) => log::debug!("telegram send message ok"),
            Err(err) => {
                log::error!("telegram send message failed: {:?}", err);
                return Err(model::ScanError::TelegramError(err));
            }
        }
        Ok(())
    }
}
