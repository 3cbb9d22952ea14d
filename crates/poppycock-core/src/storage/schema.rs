//! SQLite schema for the sentence history
//!
//! A single `sentence` table plus a small `schema_info` key/value table
//! recording which schema version created the file.

use rusqlite::{Connection, Result};

/// Current schema version. There is no migration path; other versions are refused.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_info (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- AUTOINCREMENT keeps ids monotonic and never reuses deleted ones
        CREATE TABLE IF NOT EXISTS sentence (
            item_id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_ts INTEGER NOT NULL,
            sentence TEXT NOT NULL,
            favorite INTEGER NOT NULL DEFAULT 0
        );

        -- History listings sort by timestamp
        CREATE INDEX IF NOT EXISTS idx_sentence_item_ts ON sentence(item_ts);

        -- Favorites listings and category deletion filter on the flag
        CREATE INDEX IF NOT EXISTS idx_sentence_favorite ON sentence(favorite);
        "#,
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO schema_info (key, value) VALUES ('version', ?)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Get the recorded schema version exactly as stored
///
/// Returns `None` if no version row exists.
pub fn get_schema_version(conn: &Connection) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM schema_info WHERE key = 'version'")?;
    let result: Result<String> = stmt.query_row([], |row| row.get(0));

    match result {
        Ok(version) => Ok(Some(version)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Check if the schema has never been created in this database
///
/// A version row that is present, even one that does not parse, means the
/// schema was created by someone and must not be overwritten.
pub fn needs_init(conn: &Connection) -> bool {
    let table_exists: bool = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_info'")
        .and_then(|mut stmt| stmt.exists([]))
        .unwrap_or(false);

    if !table_exists {
        return true;
    }

    !matches!(get_schema_version(conn), Ok(Some(_)))
}
