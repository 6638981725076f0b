//! Telegram Bot API notifier
//!
//! Uses the `sendMessage` method. The user ID doubles as the chat ID,
//! which holds for private chats with the bot.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NotifyError, Result};
use crate::notifier::Notifier;

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends notifications through the Telegram Bot API
pub struct TelegramNotifier {
    client: reqwest::Client,
    send_url: String,
}

impl TelegramNotifier {
    /// Create a notifier for `token` against `api_base`
    /// (normally `https://api.telegram.org`)
    pub fn new(api_base: &str, token: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            send_url: format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token),
        }
    }
}

impl fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The URL embeds the bot token
        f.debug_struct("TelegramNotifier").finish_non_exhaustive()
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, user_id: &str, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.send_url)
            .json(&SendMessage {
                chat_id: user_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        let body: Option<ApiResponse> = response.json().await.ok();

        match body {
            Some(body) if status.is_success() && body.ok => {
                debug!(user_id, "notification delivered");
                Ok(())
            }
            Some(body) => Err(NotifyError::api(
                status.as_u16(),
                body.description.unwrap_or_else(|| "no description".to_string()),
            )),
            None => Err(NotifyError::api(status.as_u16(), "unreadable response body")),
        }
    }
}
