use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashSet;

use crate::core::password::{hash_password, is_hashed};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `users` table exists.
fn users_table_exists(conn: &Connection) -> AppResult<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='users'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Column names of the `users` table.
fn users_columns(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info('users')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

const CREATE_USERS_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name     TEXT NOT NULL,
        last_name      TEXT NOT NULL DEFAULT '',
        date_of_birth  TEXT NOT NULL DEFAULT '',
        email          TEXT NOT NULL,
        password       TEXT NOT NULL,
        created_at     TEXT NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#;

/// Create the `users` table with the modern schema.
fn create_users_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(CREATE_USERS_SQL)?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![Local::now().to_rfc3339(), version, message],
    )?;
    Ok(())
}

/// A row read from one of the camelCase tables written by the first
/// releases (`fullName` or `firstName`/`lastName`/`dateOfBirth`).
struct LegacyUser {
    id: i64,
    first_name: String,
    last_name: String,
    date_of_birth: String,
    email: String,
    password: String,
}

fn is_legacy_layout(columns: &[String]) -> bool {
    columns.iter().any(|c| c == "fullName" || c == "firstName")
}

fn load_legacy_users(conn: &Connection, columns: &[String]) -> AppResult<Vec<LegacyUser>> {
    let has = |name: &str| columns.iter().any(|c| c == name);

    let name_cols = if has("fullName") {
        "fullName, '', ''"
    } else {
        "firstName, lastName, dateOfBirth"
    };
    let sql = format!(
        "SELECT id, {}, email, password FROM users ORDER BY id ASC",
        name_cols
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        ))
    })?;

    let single_name = has("fullName");
    let mut out = Vec::new();
    for r in rows {
        let (id, first, last, dob, email, password) = r?;
        let (first_name, last_name) = if single_name {
            split_full_name(&first)
        } else {
            (first, last)
        };
        out.push(LegacyUser {
            id,
            first_name,
            last_name,
            date_of_birth: dob,
            email,
            password,
        });
    }
    Ok(out)
}

/// "Ada King Lovelace" → ("Ada", "King Lovelace")
fn split_full_name(full: &str) -> (String, String) {
    match full.trim().split_once(' ') {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (full.trim().to_string(), String::new()),
    }
}

/// Rebuild a legacy `users` table into the modern schema.
///
/// Rows sharing an email keep the lowest id; clear-text passwords are hashed.
fn rebuild_legacy_users(conn: &Connection, columns: &[String]) -> AppResult<()> {
    warning("Legacy users table detected, rebuilding with the current schema...");

    let legacy = load_legacy_users(conn, columns)?;
    let now = Local::now().to_rfc3339();

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch("ALTER TABLE users RENAME TO users_old;")?;
    tx.execute_batch(CREATE_USERS_SQL)?;

    let mut seen = HashSet::new();
    let mut dropped = 0usize;
    for user in legacy {
        if !seen.insert(user.email.clone()) {
            dropped += 1;
            continue;
        }
        let password = if is_hashed(&user.password) {
            user.password
        } else {
            hash_password(&user.password)?
        };
        tx.execute(
            "INSERT INTO users (id, first_name, last_name, date_of_birth, email, password, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.id,
                user.first_name,
                user.last_name,
                user.date_of_birth,
                user.email,
                password,
                now
            ],
        )?;
    }

    tx.execute_batch(
        r#"
        DROP TABLE users_old;

        UPDATE sqlite_sequence
            SET seq = (SELECT IFNULL(MAX(id), 0) FROM users)
        WHERE name = 'users';
        "#,
    )?;
    tx.commit()?;

    if dropped > 0 {
        warning(format!("Dropped {} duplicate account(s) sharing an email.", dropped));
    }
    success("Users table migrated to the current schema.");
    Ok(())
}

/// Remove duplicate emails (keeping the oldest account) and enforce
/// uniqueness at the storage layer.
fn migrate_unique_user_email(conn: &Connection) -> AppResult<()> {
    let version = "20251019_0001_unique_user_email";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    let removed = conn.execute(
        "DELETE FROM users
         WHERE id NOT IN (SELECT MIN(id) FROM users GROUP BY email)",
        [],
    )?;

    conn.execute_batch("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);")
        .map_err(|e| AppError::Migration(format!("Failed to add unique email index: {}", e)))?;

    mark_applied(
        conn,
        version,
        &format!("Unique index on users.email ({} duplicate row(s) removed)", removed),
    )?;
    Ok(())
}

/// Hash every password still stored in clear text.
fn migrate_hash_plaintext_passwords(conn: &Connection) -> AppResult<()> {
    let pending: Vec<(i64, String)> = {
        let mut stmt =
            conn.prepare("SELECT id, password FROM users WHERE password NOT LIKE '$argon2%'")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        out
    };

    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.unchecked_transaction()?;
    for (id, clear) in &pending {
        tx.execute(
            "UPDATE users SET password = ?1 WHERE id = ?2",
            params![hash_password(clear)?, id],
        )?;
    }
    tx.commit()?;

    mark_applied(
        conn,
        "hash_plaintext_passwords",
        &format!("Hashed {} clear-text password(s)", pending.len()),
    )?;
    success(format!("Hashed {} clear-text password(s).", pending.len()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create or upgrade the users table
    if !users_table_exists(conn)? {
        create_users_table(conn)?;
    } else {
        let columns = users_columns(conn)?;
        if is_legacy_layout(&columns) {
            rebuild_legacy_users(conn, &columns)?;
        }
    }

    // 3) Storage-level uniqueness
    migrate_unique_user_email(conn)?;

    // 4) No clear-text passwords left behind
    migrate_hash_plaintext_passwords(conn)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::split_full_name;

    #[test]
    fn full_name_splits_on_first_space() {
        assert_eq!(
            split_full_name("Ada King Lovelace"),
            ("Ada".to_string(), "King Lovelace".to_string())
        );
        assert_eq!(split_full_name("Cher"), ("Cher".to_string(), String::new()));
    }
}
