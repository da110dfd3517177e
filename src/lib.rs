pub mod bot;
pub mod config;
pub mod domain;
pub mod portal;
pub mod telegram;
pub mod utils;

pub use bot::Bot;
pub use config::{BotConfig, CliArgs, PortalConfig, TelegramConfig};
pub use domain::model::{Credentials, FetchResult};
pub use domain::ports::PointsSource;
pub use portal::PortalClient;
pub use telegram::TelegramApi;
pub use utils::error::{BotError, Result};
