use chrono::Local;
use serde::Serialize;

/// A registered account, as stored in the `users` table.
///
/// `password` holds an Argon2id PHC string, never the clear text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: i64,               // ⇔ users.id (INTEGER PRIMARY KEY AUTOINCREMENT)
    pub first_name: String,    // ⇔ users.first_name
    pub last_name: String,     // ⇔ users.last_name
    pub date_of_birth: String, // ⇔ users.date_of_birth (TEXT "DD/MM/YYYY")
    pub email: String,         // ⇔ users.email (UNIQUE)
    #[serde(skip_serializing)]
    pub password: String, // ⇔ users.password (PHC hash)
    pub created_at: String,    // ⇔ users.created_at (TEXT, ISO8601)
}

impl UserRecord {
    /// Name shown on the profile tab and stored in the session.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Fields collected by the sign-up screen, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth: date_of_birth.into(),
            email: email.into(),
            password: password.into(),
            created_at: Local::now().to_rfc3339(),
        }
    }
}
