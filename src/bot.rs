use crate::domain::ports::PointsSource;
use crate::telegram::{Action, Conversations, TelegramApi};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

const FETCHING_TEXT: &str = "Logging in to the portal...";

/// Long-poll runner: pulls updates, feeds text through the conversation
/// state machine, and spawns a task per portal fetch so one slow portal
/// round-trip never blocks other chats.
pub struct Bot<S: PointsSource + 'static> {
    api: Arc<TelegramApi>,
    source: Arc<S>,
    conversations: Conversations,
}

impl<S: PointsSource + 'static> Bot<S> {
    pub fn new(api: TelegramApi, source: S) -> Self {
        Self {
            api: Arc::new(api),
            source: Arc::new(source),
            conversations: Conversations::new(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        tracing::info!("Bot started, long-polling for updates");
        let mut offset = 0i64;

        loop {
            let updates = match self.api.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::warn!("getUpdates failed: {}", e);
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);

                let Some(message) = update.message else {
                    continue;
                };
                let Some(text) = message.text else {
                    continue;
                };

                self.handle_text(message.chat.id, &text).await;
            }
        }
    }

    async fn handle_text(&mut self, chat_id: i64, text: &str) {
        match self.conversations.handle(chat_id, text) {
            Action::Reply(reply) => {
                if let Err(e) = self.api.send_message(chat_id, &reply).await {
                    tracing::warn!("Failed to send reply to chat {}: {}", chat_id, e);
                }
            }
            Action::StartFetch { credentials } => {
                let api = Arc::clone(&self.api);
                let source = Arc::clone(&self.source);

                tokio::spawn(async move {
                    if let Err(e) = api.send_typing(chat_id).await {
                        tracing::warn!("Failed to send typing action to chat {}: {}", chat_id, e);
                    }
                    if let Err(e) = api.send_message(chat_id, FETCHING_TEXT).await {
                        tracing::warn!("Failed to send progress message to chat {}: {}", chat_id, e);
                    }

                    let reply = match source.fetch_points(&credentials).await {
                        Ok(points) => {
                            tracing::info!("Fetch succeeded for chat {}", chat_id);
                            format!("Your points: {}", points)
                        }
                        Err(e) => {
                            tracing::warn!("Fetch failed for chat {}: {}", chat_id, e);
                            e.user_message().to_string()
                        }
                    };

                    if let Err(e) = api.send_message(chat_id, &reply).await {
                        tracing::warn!("Failed to send result to chat {}: {}", chat_id, e);
                    }
                    // Credentials are dropped here, with the task
                });
            }
        }
    }
}
