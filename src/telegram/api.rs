use crate::telegram::types::{ApiResponse, Message, Update};
use crate::utils::error::{BotError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;

/// Long-poll wait passed to getUpdates. The HTTP timeout is kept above it so
/// an idle poll does not error out.
const POLL_TIMEOUT_SECS: u64 = 30;

/// Thin client for the subset of the Telegram Bot API this bot needs:
/// getUpdates long polling, sendMessage, sendChatAction.
pub struct TelegramApi {
    client: Client,
    base: String,
}

impl TelegramApi {
    pub fn new(api_base: &str, token: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .build()?;

        Ok(Self {
            client,
            base: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: &serde_json::Value) -> Result<T> {
        let url = format!("{}/{}", self.base, method);
        let response = self.client.post(&url).json(params).send().await?;
        let body: ApiResponse<T> = response.json().await?;

        if !body.ok {
            return Err(BotError::Telegram {
                description: body
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        body.result.ok_or_else(|| BotError::Telegram {
            description: "response marked ok but carried no result".to_string(),
        })
    }

    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": POLL_TIMEOUT_SECS,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message> {
        self.call(
            "sendMessage",
            &json!({
                "chat_id": chat_id,
                "text": text,
            }),
        )
        .await
    }

    pub async fn send_typing(&self, chat_id: i64) -> Result<bool> {
        self.call(
            "sendChatAction",
            &json!({
                "chat_id": chat_id,
                "action": "typing",
            }),
        )
        .await
    }
}
