use crate::domain::model::Credentials;
use std::collections::HashMap;

const WELCOME_TEXT: &str = "Welcome to the Points Bot.";
const HELP_TEXT: &str = "Available commands:\n\
    /start - Welcome message\n\
    /login - Check your points\n\
    /cancel - Cancel current action";
const ASK_USERNAME_TEXT: &str = "Please enter your username:";
const ASK_PASSWORD_TEXT: &str = "Please enter your password:";
const EMPTY_USERNAME_TEXT: &str = "Username cannot be empty. Please enter your username:";
const EMPTY_PASSWORD_TEXT: &str = "Password cannot be empty. Please enter your password:";
const CANCELLED_TEXT: &str = "Cancelled. Use /login to try again.";
const UNKNOWN_COMMAND_TEXT: &str =
    "I didn't understand that command. Use /help to see available commands.";
const IDLE_TEXT: &str = "Please use /login to check your points or /help to see commands.";

/// Where a single chat stands in the two-turn credential exchange.
enum ConvState {
    AwaitingUsername,
    AwaitingPassword { username: String },
}

/// What the runner should do in response to one incoming message.
#[derive(Debug)]
pub enum Action {
    Reply(String),
    /// Both inputs collected; run the portal fetch and reply with the result.
    StartFetch { credentials: Credentials },
}

/// Per-chat conversation state machine. Synchronous and free of I/O so the
/// flow can be tested without a network; the runner interprets the actions.
///
/// Chats are independent: state is keyed by chat id and an in-flight fetch
/// for one chat never touches another's entry.
#[derive(Default)]
pub struct Conversations {
    states: HashMap<i64, ConvState>,
}

impl Conversations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, chat_id: i64, text: &str) -> Action {
        let text = text.trim();

        if let Some(rest) = text.strip_prefix('/') {
            // "/login@SomeBot arg" -> "login"
            let command = rest
                .split_whitespace()
                .next()
                .unwrap_or("")
                .split('@')
                .next()
                .unwrap_or("");
            return self.handle_command(chat_id, command);
        }

        match self.states.remove(&chat_id) {
            None => Action::Reply(IDLE_TEXT.to_string()),
            Some(ConvState::AwaitingUsername) => {
                if text.is_empty() {
                    self.states.insert(chat_id, ConvState::AwaitingUsername);
                    Action::Reply(EMPTY_USERNAME_TEXT.to_string())
                } else {
                    self.states.insert(
                        chat_id,
                        ConvState::AwaitingPassword {
                            username: text.to_string(),
                        },
                    );
                    Action::Reply(ASK_PASSWORD_TEXT.to_string())
                }
            }
            Some(ConvState::AwaitingPassword { username }) => {
                if text.is_empty() {
                    self.states
                        .insert(chat_id, ConvState::AwaitingPassword { username });
                    Action::Reply(EMPTY_PASSWORD_TEXT.to_string())
                } else {
                    // State entry is already gone; the credentials move into
                    // the fetch task and are dropped with it.
                    Action::StartFetch {
                        credentials: Credentials::new(username, text.to_string()),
                    }
                }
            }
        }
    }

    fn handle_command(&mut self, chat_id: i64, command: &str) -> Action {
        match command {
            "start" => {
                self.states.remove(&chat_id);
                Action::Reply(format!("{}\n\n{}", WELCOME_TEXT, HELP_TEXT))
            }
            "help" => Action::Reply(HELP_TEXT.to_string()),
            "login" => {
                // Drop any half-collected credentials and start fresh
                self.states.insert(chat_id, ConvState::AwaitingUsername);
                Action::Reply(ASK_USERNAME_TEXT.to_string())
            }
            "cancel" => {
                self.states.remove(&chat_id);
                Action::Reply(CANCELLED_TEXT.to_string())
            }
            _ => Action::Reply(UNKNOWN_COMMAND_TEXT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(action: Action) -> String {
        match action {
            Action::Reply(text) => text,
            other => panic!("expected a reply, got {:?}", other),
        }
    }

    #[test]
    fn test_full_login_flow_produces_fetch() {
        let mut conversations = Conversations::new();

        assert_eq!(reply(conversations.handle(1, "/login")), ASK_USERNAME_TEXT);
        assert_eq!(reply(conversations.handle(1, "alice")), ASK_PASSWORD_TEXT);

        match conversations.handle(1, "s3cret") {
            Action::StartFetch { credentials } => {
                assert_eq!(credentials.username, "alice");
                assert_eq!(credentials.password, "s3cret");
            }
            other => panic!("expected a fetch, got {:?}", other),
        }

        // Conversation is over; stray text goes back to the idle prompt
        assert_eq!(reply(conversations.handle(1, "anything")), IDLE_TEXT);
    }

    #[test]
    fn test_empty_inputs_reprompt_without_losing_state() {
        let mut conversations = Conversations::new();

        conversations.handle(1, "/login");
        assert_eq!(reply(conversations.handle(1, "   ")), EMPTY_USERNAME_TEXT);
        assert_eq!(reply(conversations.handle(1, "alice")), ASK_PASSWORD_TEXT);
        assert_eq!(reply(conversations.handle(1, "")), EMPTY_PASSWORD_TEXT);

        match conversations.handle(1, "pw") {
            Action::StartFetch { credentials } => {
                assert_eq!(credentials.username, "alice");
            }
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_clears_state() {
        let mut conversations = Conversations::new();

        conversations.handle(1, "/login");
        conversations.handle(1, "alice");
        assert_eq!(reply(conversations.handle(1, "/cancel")), CANCELLED_TEXT);

        // The pending username is gone
        assert_eq!(reply(conversations.handle(1, "s3cret")), IDLE_TEXT);
    }

    #[test]
    fn test_login_restarts_a_half_finished_conversation() {
        let mut conversations = Conversations::new();

        conversations.handle(1, "/login");
        conversations.handle(1, "alice");
        assert_eq!(reply(conversations.handle(1, "/login")), ASK_USERNAME_TEXT);
        assert_eq!(reply(conversations.handle(1, "bob")), ASK_PASSWORD_TEXT);

        match conversations.handle(1, "pw") {
            Action::StartFetch { credentials } => {
                assert_eq!(credentials.username, "bob");
            }
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_chats_are_independent() {
        let mut conversations = Conversations::new();

        conversations.handle(1, "/login");
        conversations.handle(2, "/login");
        conversations.handle(1, "alice");
        conversations.handle(2, "bob");

        match conversations.handle(2, "pw2") {
            Action::StartFetch { credentials } => {
                assert_eq!(credentials.username, "bob");
            }
            other => panic!("expected a fetch, got {:?}", other),
        }

        match conversations.handle(1, "pw1") {
            Action::StartFetch { credentials } => {
                assert_eq!(credentials.username, "alice");
            }
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_command_suffixes_are_stripped() {
        let mut conversations = Conversations::new();

        assert_eq!(
            reply(conversations.handle(1, "/login@PointsBot")),
            ASK_USERNAME_TEXT
        );
        assert_eq!(
            reply(conversations.handle(2, "/help extra words")),
            HELP_TEXT
        );
    }

    #[test]
    fn test_unknown_command_and_stray_text() {
        let mut conversations = Conversations::new();

        assert_eq!(
            reply(conversations.handle(1, "/frobnicate")),
            UNKNOWN_COMMAND_TEXT
        );
        assert_eq!(reply(conversations.handle(1, "hello there")), IDLE_TEXT);
    }

    #[test]
    fn test_start_resets_and_greets() {
        let mut conversations = Conversations::new();

        conversations.handle(1, "/login");
        let greeting = reply(conversations.handle(1, "/start"));
        assert!(greeting.contains(WELCOME_TEXT));
        assert!(greeting.contains("/login"));

        // /start dropped the pending conversation
        assert_eq!(reply(conversations.handle(1, "alice")), IDLE_TEXT);
    }
}
