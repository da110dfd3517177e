use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Portal request failed: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("Portal rejected the login (status {status})")]
    Authentication { status: StatusCode },

    #[error("Could not find {what} in the portal response")]
    Parse { what: String },

    #[error("Telegram API error: {description}")]
    Telegram { description: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, BotError>;

impl BotError {
    /// Message safe to send back to the chat. Must never contain credentials,
    /// portal URLs, or transport detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            BotError::Connection(_) => {
                "Network error while reaching the portal. Please try again later."
            }
            BotError::Authentication { .. } => {
                "Could not log in. Check your username and password, then use /login to try again."
            }
            BotError::Parse { .. } => "Could not read your points from the portal page.",
            _ => "Something went wrong. Please try again later.",
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BotError::Connection(_) => "Check network connectivity and the portal base URL",
            BotError::Authentication { .. } => "Verify the login path and form field names",
            BotError::Parse { .. } => "Update the points selector to match the portal markup",
            BotError::Telegram { .. } => "Verify the bot token and Telegram API availability",
            BotError::Config { .. }
            | BotError::MissingConfig { .. }
            | BotError::InvalidConfigValue { .. } => "Fix the configuration file and restart",
            _ => "Check the logs for details and try again",
        }
    }
}
