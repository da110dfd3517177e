use crate::utils::error::{BotError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_selector, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_TIMEOUT_SECONDS: u64 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub portal: PortalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub token: String,
    /// Overridable so tests can point the client at a local mock server.
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    pub base_url: String,
    pub login_path: String,
    pub points_path: String,
    pub username_field: String,
    pub password_field: String,
    pub csrf_field: Option<String>,
    pub points_selector: String,
    pub timeout_seconds: Option<u64>,
}

impl TelegramConfig {
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_TELEGRAM_API_BASE)
    }
}

impl PortalConfig {
    /// Bounded request timeout so a stalled portal surfaces as a connection
    /// error instead of blocking a conversation indefinitely.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl BotConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BotError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BotError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with values from the environment.
    /// Unset variables are left as-is so validation can report them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BotError::Config {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.telegram.token.trim().is_empty() || self.telegram.token.starts_with("${") {
            return Err(BotError::MissingConfig {
                field: "telegram.token".to_string(),
            });
        }

        if let Some(api_base) = &self.telegram.api_base {
            validate_url("telegram.api_base", api_base)?;
        }

        validate_url("portal.base_url", &self.portal.base_url)?;
        validate_non_empty_string("portal.login_path", &self.portal.login_path)?;
        validate_non_empty_string("portal.points_path", &self.portal.points_path)?;
        validate_non_empty_string("portal.username_field", &self.portal.username_field)?;
        validate_non_empty_string("portal.password_field", &self.portal.password_field)?;
        validate_selector("portal.points_selector", &self.portal.points_selector)?;

        if let Some(csrf_field) = &self.portal.csrf_field {
            validate_non_empty_string("portal.csrf_field", csrf_field)?;
        }

        if let Some(timeout) = self.portal.timeout_seconds {
            if timeout == 0 {
                return Err(BotError::InvalidConfigValue {
                    field: "portal.timeout_seconds".to_string(),
                    value: timeout.to_string(),
                    reason: "Timeout must be at least 1 second".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
