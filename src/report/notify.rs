//! Change notification through the Telegram Bot API
//!
//! Both the bot token and the chat id are required. A missing credential or
//! a failed delivery is reported to the caller, which logs it and carries on.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::NotifyStyle;
use crate::mods::types::{ModRecord, UpdateSet};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification skipped: {0} is not set")]
    MissingCredentials(&'static str),

    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Fails with [`NotifyError::MissingCredentials`] when either value is absent or blank
    pub fn new(
        client: reqwest::Client,
        api_url: &str,
        token: Option<String>,
        chat_id: Option<String>,
    ) -> Result<Self, NotifyError> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(NotifyError::MissingCredentials("TELEGRAM_BOT_TOKEN"))?;
        let chat_id = chat_id
            .filter(|c| !c.trim().is_empty())
            .ok_or(NotifyError::MissingCredentials("TELEGRAM_CHAT_ID"))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            chat_id,
        })
    }

    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, self.token);
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
            disable_web_page_preview: true,
        };
        debug!("Sending notification to chat {}", self.chat_id);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            // The request URL embeds the token
            .map_err(|e| NotifyError::Delivery(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Delivery(format!(
                "Telegram API error {}: {}",
                status, body
            )));
        }

        info!("Sent Telegram notification");
        Ok(())
    }
}

/// Build the notification text.
///
/// `total` is the number of entries in the mod list, so the message shows
/// how many of them were actually received from the registry.
pub fn compose_message(
    records: &[ModRecord],
    updates: &UpdateSet,
    total: usize,
    style: NotifyStyle,
) -> String {
    let received = format!("Received {} of {} mods from Thunderstore.", records.len(), total);

    if updates.is_empty() {
        return format!("No mod updates. {}", received);
    }

    let mut message = format!(
        "Updated {} of {} mods. {}",
        updates.len(),
        records.len(),
        received
    );

    if style == NotifyStyle::PerMod {
        for record in records.iter().filter(|r| updates.contains(&r.name)) {
            message.push_str(&format!(
                "\n- {} {} ({})",
                record.name,
                record.version.as_deref().unwrap_or("?"),
                record.date_updated
            ));
        }
    }

    message
}
