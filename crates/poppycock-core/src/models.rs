//! Data models for Poppycock
//!
//! A `Sentence` is a single bit of generated nonsense together with the
//! moment it was created and whether it has been marked as a favorite.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Legacy marker for "not yet stored".
///
/// Sentences carry `Option<i64>` ids; this constant exists for callers that
/// still pass raw integers across their own boundaries. Any negative id is
/// treated the same way by the store.
pub const NOT_IDENTIFIED: i64 = -1;

/// A stored (or soon to be stored) sentence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sentence {
    /// Identity assigned by the store on insertion; `None` until then
    pub id: Option<i64>,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
    /// The nonsense itself
    pub text: String,
    /// Whether the sentence has been marked as a favorite
    pub favorite: bool,
}

impl Sentence {
    /// Create a new, unsaved sentence stamped with the current time
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_timestamp(text, Utc::now().timestamp_millis())
    }

    /// Create a new, unsaved sentence with an explicit timestamp
    pub fn with_timestamp(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: None,
            timestamp,
            text: text.into(),
            favorite: false,
        }
    }

    /// Whether the store has assigned this sentence an identity
    pub fn is_identified(&self) -> bool {
        matches!(self.id, Some(id) if id >= 0)
    }

    /// The creation time as a UTC datetime
    ///
    /// Returns `None` if the timestamp is outside chrono's representable range.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
