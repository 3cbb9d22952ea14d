//! Sentence storage
//!
//! `SentenceStore` is the only way in or out of the sentence history. It
//! owns the SQLite connection behind a mutex, so a single store can be
//! shared between threads (`Arc<SentenceStore>`); every operation holds the
//! lock for its whole duration, which serializes all access to the handle.
//!
//! ## Orderings
//!
//! - History listings sort by timestamp (ties broken by id).
//! - Neighbor navigation (`get_next_id` / `get_previous_id`) walks the id
//!   axis, which follows insertion order.
//!
//! ## Usage
//!
//! ```ignore
//! let store = SentenceStore::new(config);
//! store.open()?;
//!
//! let mut sentence = store.insert(Sentence::new("The moon is cheese."))?;
//! store.toggle_favorite(&mut sentence)?;
//!
//! let favorites = store.get_favorites(false)?;
//! store.close();
//! ```

use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::Sentence;
use crate::storage::schema::{get_schema_version, init_schema, needs_init, SCHEMA_VERSION};
use crate::storage::{StoreError, StoreResult};

const SENTENCE_COLUMNS: &str = "item_id, item_ts, sentence, favorite";

/// Thread-safe handle on the sentence database
pub struct SentenceStore {
    config: Config,
    /// `None` while closed
    conn: Mutex<Option<Connection>>,
}

impl SentenceStore {
    /// Create a closed store for the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            conn: Mutex::new(None),
        }
    }

    /// Create a store and open it immediately
    pub fn open_with_config(config: Config) -> StoreResult<Self> {
        let store = Self::new(config);
        store.open()?;
        Ok(store)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Lifecycle ====================

    /// Open the database, creating the data directory and schema if absent
    ///
    /// Calling this on an already open store does nothing.
    pub fn open(&self) -> StoreResult<()> {
        let mut guard = self.lock();
        if guard.is_some() {
            debug!("Sentence store already open");
            return Ok(());
        }

        let path = self.config.database_path();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| {
                    StoreError::CreateDirectory {
                        path: parent.to_path_buf(),
                        source,
                    }
                })?;
            }
        }

        let conn = Connection::open(&path).map_err(|source| StoreError::OpenFailed {
            path: path.clone(),
            source,
        })?;

        // A file that is not a database only fails on first use
        prepare_schema(&conn).map_err(|e| match e {
            StoreError::Database(source) => StoreError::OpenFailed {
                path: path.clone(),
                source,
            },
            other => other,
        })?;

        info!("Opened sentence store at {:?}", path);
        *guard = Some(conn);
        Ok(())
    }

    /// Release the database handle
    ///
    /// Safe to call on a closed store.
    pub fn close(&self) {
        let mut guard = self.lock();
        if let Some(conn) = guard.take() {
            match conn.close() {
                Ok(()) => info!("Closed sentence store"),
                Err((_conn, e)) => warn!("Error while closing sentence store: {}", e),
            }
        }
    }

    /// Check whether the store currently holds an open handle
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    // ==================== Write Operations ====================

    /// Store a new sentence and return it with its assigned id
    ///
    /// Fails with `InvalidRecord` if the sentence already has an identity.
    pub fn insert(&self, mut sentence: Sentence) -> StoreResult<Sentence> {
        self.with_conn(move |conn| {
            if sentence.is_identified() {
                return Err(StoreError::InvalidRecord(format!(
                    "sentence already stored with id {}",
                    sentence.id.unwrap_or_default()
                )));
            }

            conn.execute(
                "INSERT INTO sentence (item_ts, sentence, favorite) VALUES (?1, ?2, ?3)",
                params![sentence.timestamp, sentence.text, sentence.favorite],
            )?;
            let id = conn.last_insert_rowid();
            sentence.id = Some(id);

            debug!(
                "Inserted sentence {}: {}{}",
                id,
                sentence.text,
                if sentence.favorite { " ***" } else { "" }
            );
            Ok(sentence)
        })
    }

    /// Flip the favorite flag of a sentence and persist the new value
    ///
    /// Returns `true` if a stored row was updated. A sentence that was never
    /// stored, or whose row no longer exists, is flipped in memory only and
    /// `false` is returned. On a closed store the sentence is left untouched.
    pub fn toggle_favorite(&self, sentence: &mut Sentence) -> StoreResult<bool> {
        self.with_conn(|conn| {
            let favorite = !sentence.favorite;

            let id = match sentence.id {
                Some(id) if id >= 0 => id,
                _ => {
                    warn!("Toggled favorite on a sentence that was never stored");
                    sentence.favorite = favorite;
                    return Ok(false);
                }
            };

            let updated = conn.execute(
                "UPDATE sentence SET favorite = ?1 WHERE item_id = ?2",
                params![favorite, id],
            )?;
            sentence.favorite = favorite;

            if updated == 0 {
                warn!("No stored sentence {} to mark favorite={}", id, favorite);
                return Ok(false);
            }

            debug!("Sentence {} favorite={}", id, favorite);
            Ok(true)
        })
    }

    /// Delete a single sentence
    ///
    /// Returns whether a row was removed. Negative ids never match.
    pub fn delete_one(&self, id: i64) -> StoreResult<bool> {
        self.with_conn(|conn| {
            if id < 0 {
                debug!("Ignoring delete of unidentified sentence");
                return Ok(false);
            }

            let removed = conn.execute("DELETE FROM sentence WHERE item_id = ?1", [id])?;
            if removed == 0 {
                warn!("No stored sentence {} to delete", id);
                return Ok(false);
            }

            debug!("Deleted sentence {}", id);
            Ok(true)
        })
    }

    /// Delete every sentence whose favorite flag equals `favorites`
    ///
    /// Returns the number of sentences removed.
    pub fn delete_category(&self, favorites: bool) -> StoreResult<usize> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            let removed = tx.execute(
                "DELETE FROM sentence WHERE IFNULL(favorite, 0) = ?1",
                params![favorites],
            )?;
            tx.commit()?;

            debug!("Deleted {} sentence(s) with favorite={}", removed, favorites);
            Ok(removed)
        })
    }

    // ==================== Read Operations ====================

    /// Get a sentence by id
    pub fn get_by_id(&self, id: i64) -> StoreResult<Option<Sentence>> {
        self.with_conn(|conn| {
            if id < 0 {
                return Ok(None);
            }

            let sql = format!("SELECT {} FROM sentence WHERE item_id = ?1", SENTENCE_COLUMNS);
            conn.query_row(&sql, [id], row_to_sentence)
                .optional()
                .map_err(Into::into)
        })
    }

    /// Get every sentence, sorted by timestamp
    pub fn get_history(&self, oldest_first: bool) -> StoreResult<Vec<Sentence>> {
        self.with_conn(|conn| query_sentences(conn, None, oldest_first))
    }

    /// Get favorite sentences, sorted by timestamp
    pub fn get_favorites(&self, oldest_first: bool) -> StoreResult<Vec<Sentence>> {
        self.with_conn(|conn| query_sentences(conn, Some("favorite = 1"), oldest_first))
    }

    /// Smallest id strictly greater than `after_id`
    pub fn get_next_id(&self, after_id: i64) -> StoreResult<Option<i64>> {
        self.with_conn(|conn| {
            if after_id < 0 {
                return Ok(None);
            }

            conn.query_row(
                "SELECT item_id FROM sentence WHERE item_id > ?1 ORDER BY item_id ASC LIMIT 1",
                [after_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    /// Largest id strictly less than `before_id`
    pub fn get_previous_id(&self, before_id: i64) -> StoreResult<Option<i64>> {
        self.with_conn(|conn| {
            if before_id < 0 {
                return Ok(None);
            }

            conn.query_row(
                "SELECT item_id FROM sentence WHERE item_id < ?1 ORDER BY item_id DESC LIMIT 1",
                [before_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    // ==================== Stats ====================

    /// Get count of stored sentences
    pub fn count(&self) -> StoreResult<i64> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM sentence", [], |row| row.get(0))
                .map_err(Into::into)
        })
    }

    /// Get count of favorite sentences
    pub fn favorite_count(&self) -> StoreResult<i64> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM sentence WHERE favorite = 1",
                [],
                |row| row.get(0),
            )
            .map_err(Into::into)
        })
    }

    // ==================== Private helpers ====================

    /// Lock the handle, recovering from a poisoned mutex
    fn lock(&self) -> MutexGuard<'_, Option<Connection>> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` against the open connection while holding the lock
    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut guard = self.lock();
        let conn = guard.as_mut().ok_or(StoreError::Unavailable)?;
        f(conn)
    }
}

impl Drop for SentenceStore {
    fn drop(&mut self) {
        self.close();
    }
}

/// Create the schema on first use and refuse databases from other versions
fn prepare_schema(conn: &Connection) -> StoreResult<()> {
    if needs_init(conn) {
        init_schema(conn)?;
    }

    match get_schema_version(conn)? {
        Some(version) if version.trim().parse::<i32>().ok() == Some(SCHEMA_VERSION) => Ok(()),
        found => Err(StoreError::UnsupportedSchema {
            found: found.unwrap_or_default(),
            expected: SCHEMA_VERSION,
        }),
    }
}

fn query_sentences(
    conn: &Connection,
    filter: Option<&str>,
    oldest_first: bool,
) -> StoreResult<Vec<Sentence>> {
    let order = if oldest_first { "ASC" } else { "DESC" };
    let filter = filter
        .map(|f| format!("WHERE {}", f))
        .unwrap_or_default();
    let sql = format!(
        "SELECT {} FROM sentence {} ORDER BY IFNULL(item_ts, 0) {}, item_id {}",
        SENTENCE_COLUMNS, filter, order, order
    );

    let mut stmt = conn.prepare(&sql)?;
    let sentences = stmt
        .query_map([], row_to_sentence)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sentences)
}

/// Map a row to a `Sentence`
///
/// Tables created by older releases have no NOT NULL constraints, so a
/// missing timestamp reads as 0, missing text as empty and a missing flag
/// as not favorite.
fn row_to_sentence(row: &Row<'_>) -> rusqlite::Result<Sentence> {
    Ok(Sentence {
        id: Some(row.get(0)?),
        timestamp: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
        text: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        favorite: row.get::<_, Option<bool>>(3)?.unwrap_or(false),
    })
}
