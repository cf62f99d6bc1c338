use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::prefs::Preferences;
use crate::errors::AppResult;
use crate::models::session::SessionState;

const GROUP: &str = "session";
const KEY_EMAIL: &str = "email";
const KEY_USERNAME: &str = "username";
const KEY_LOGGED_IN: &str = "logged_in";

/// Persisted login state of the local user.
#[derive(Clone)]
pub struct SessionStore {
    prefs: Arc<Preferences>,
}

impl SessionStore {
    pub fn new(prefs: Arc<Preferences>) -> Self {
        Self { prefs }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(Preferences::open(path)))
    }

    /// Store email, username and the logged-in flag in one commit.
    pub fn save_session(&self, email: &str, username: &str) -> AppResult<()> {
        self.prefs
            .edit(GROUP)
            .put_string(KEY_EMAIL, email)
            .put_string(KEY_USERNAME, username)
            .put_bool(KEY_LOGGED_IN, true)
            .commit()?;
        debug!(%email, "session saved");
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        self.prefs.edit(GROUP).clear().commit()?;
        debug!("session cleared");
        Ok(())
    }

    /// Current session; absent keys read as `false` / `""`.
    ///
    /// A logged-in flag without an email can only come from a damaged or
    /// hand-edited file and is reported as logged out.
    pub fn load(&self) -> AppResult<SessionState> {
        let group = self.prefs.group(GROUP)?;
        let text = |key: &str| {
            group
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let mut state = SessionState {
            is_logged_in: group
                .get(KEY_LOGGED_IN)
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            email: text(KEY_EMAIL),
            username: text(KEY_USERNAME),
        };

        if state.is_logged_in && state.email.is_empty() {
            warn!("session flagged as logged in without an email, treating as logged out");
            state.is_logged_in = false;
        }

        Ok(state)
    }

    pub fn is_logged_in(&self) -> AppResult<bool> {
        Ok(self.load()?.is_logged_in)
    }

    pub fn email(&self) -> AppResult<String> {
        Ok(self.load()?.email)
    }

    pub fn username(&self) -> AppResult<String> {
        Ok(self.load()?.username)
    }
}
