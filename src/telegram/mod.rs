pub mod api;
pub mod conversation;
pub mod types;

pub use api::TelegramApi;
pub use conversation::{Action, Conversations};
