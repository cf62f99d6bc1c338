use serde::Serialize;

/// Persisted identity of the single local user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub is_logged_in: bool,
    pub email: String,
    pub username: String,
}
