//! Telegram bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::Config;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// `sendMessage` request body
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

/// Telegram notification sender
pub struct TelegramNotifier {
    api_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        // The token goes into the path as-is.
        let api_url = format!(
            "{}{}/sendMessage",
            config.telegram_base, config.telegram_token
        );

        tracing::debug!("Created TelegramNotifier for chat '{}'", config.telegram_chat);

        Self {
            api_url,
            chat_id: config.telegram_chat.clone(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> crate::Result<()> {
        let body = serde_json::to_value(SendMessage {
            chat_id: &self.chat_id,
            text: message,
            disable_web_page_preview: true,
        })?;

        tracing::debug!("Sending Telegram message to chat '{}'", self.chat_id);

        let response = self.http.post_json(&self.api_url, &body).await?;

        if response.status != 200 {
            return Err(crate::RelayError::Notifier(format!(
                "telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        tracing::info!("Telegram message sent successfully");
        Ok(())
    }
}
