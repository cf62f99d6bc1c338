use rusqlite::{Connection, ErrorCode, OptionalExtension, Result, Row, params};

use crate::errors::{AppError, AppResult};
use crate::models::user::{NewUser, UserRecord};

const USER_COLUMNS: &str =
    "id, first_name, last_name, date_of_birth, email, password, created_at";

pub fn map_user_row(row: &Row) -> Result<UserRecord> {
    Ok(UserRecord {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        date_of_birth: row.get("date_of_birth")?,
        email: row.get("email")?,
        password: row.get("password")?,
        created_at: row.get("created_at")?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Insert a user whose `password` is already hashed.
///
/// Uniqueness is decided by the `idx_users_email` index in the same
/// statement, so two concurrent sign-ups cannot both succeed.
pub fn insert_user(conn: &Connection, user: &NewUser) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO users (first_name, last_name, date_of_birth, email, password, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user.first_name,
            user.last_name,
            user.date_of_birth,
            user.email,
            user.password,
            user.created_at,
        ],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::DuplicateEmail(user.email.clone())),
        Err(e) => Err(e.into()),
    }
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> AppResult<Option<UserRecord>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {} FROM users WHERE email = ?1 LIMIT 1",
        USER_COLUMNS
    ))?;

    Ok(stmt.query_row([email], map_user_row).optional()?)
}

/// Replace the stored hash of every row matching `email`.
/// Returns the number of rows touched (0 when the email is unknown).
pub fn update_password_hash(conn: &Connection, email: &str, hash: &str) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE users SET password = ?1 WHERE email = ?2",
        params![hash, email],
    )?;
    Ok(n)
}

pub fn count_users(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}
