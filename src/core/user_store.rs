//! Account table access for the screens.
//!
//! Every call runs on tokio's blocking pool so the interactive side never
//! waits on SQLite or Argon2; the caller simply awaits the result.

use parking_lot::Mutex;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::password::{hash_password, verify_password};
use crate::db::initialize::init_db;
use crate::db::log::write_log;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, UserRecord};

#[derive(Clone)]
pub struct UserStore {
    conn: Arc<Mutex<Connection>>,
}

impl UserStore {
    /// Open (or create) the database at `path` and apply pending migrations.
    pub fn open(path: &str) -> AppResult<Self> {
        if let Some(dir) = Path::new(path).parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let pool = DbPool::new(path)?;
        Self::from_connection(pool.into_inner())
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_connection(DbPool::in_memory()?.into_inner())
    }

    pub fn from_connection(conn: Connection) -> AppResult<Self> {
        init_db(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn blocking<T, F>(&self, func: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Mutex<Connection>) -> AppResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || func(&conn))
            .await
            .map_err(|e| AppError::Task(e.to_string()))?
    }

    /// Insert a new account. `user.password` is the clear text and is
    /// hashed before it reaches the table.
    ///
    /// Fails with `DuplicateEmail` when the email is already registered.
    pub async fn insert(&self, mut user: NewUser) -> AppResult<i64> {
        self.blocking(move |conn| {
            user.password = hash_password(&user.password)?;
            let id = queries::insert_user(&conn.lock(), &user)?;
            info!(id, email = %user.email, "account created");
            Ok(id)
        })
        .await
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let email = email.to_string();
        self.blocking(move |conn| queries::find_user_by_email(&conn.lock(), &email))
            .await
    }

    /// The account matching both email and password, if any.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Option<UserRecord>> {
        let email = email.to_string();
        let password = password.to_string();
        self.blocking(move |conn| {
            let found = queries::find_user_by_email(&conn.lock(), &email)?;
            let Some(user) = found else {
                debug!(%email, "login: unknown email");
                return Ok(None);
            };

            if verify_password(&password, &user.password)? {
                Ok(Some(user))
            } else {
                debug!(%email, "login: password mismatch");
                Ok(None)
            }
        })
        .await
    }

    /// Replace the password of every account with this email.
    /// An unknown email is not an error and creates nothing.
    pub async fn update_password(&self, email: &str, new_password: &str) -> AppResult<()> {
        let email = email.to_string();
        let new_password = new_password.to_string();
        self.blocking(move |conn| {
            let hash = hash_password(&new_password)?;
            let n = queries::update_password_hash(&conn.lock(), &email, &hash)?;
            if n == 0 {
                debug!(%email, "password update matched no account");
            }
            Ok(())
        })
        .await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.blocking(|conn| queries::count_users(&conn.lock())).await
    }

    /// Append to the internal log. Best effort: failures are only logged.
    pub async fn audit(&self, operation: &str, target: &str, message: &str) {
        let (operation, target, message) =
            (operation.to_string(), target.to_string(), message.to_string());
        let res = self
            .blocking(move |conn| write_log(&conn.lock(), &operation, &target, &message))
            .await;
        if let Err(e) = res {
            warn!(error = %e, "failed to write internal log");
        }
    }
}
