use std::fmt;

use crate::utils::error::Result;

/// One username/password pair collected over a conversation.
///
/// Lives in memory only: built once both inputs arrive, moved into the fetch
/// task, dropped when the fetch finishes. The hand-written `Debug` keeps
/// either field out of logs even through an accidental `{:?}`.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &"***")
            .field("password", &"***")
            .finish()
    }
}

/// The scraped points text, or a typed failure.
pub type FetchResult = Result<String>;
