use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Connection pragmas first, then every schema change through the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    // in-memory databases stay in "memory" mode
    let _mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    conn.pragma_update(None, "foreign_keys", "ON")?;

    run_pending_migrations(conn)?;
    Ok(())
}
