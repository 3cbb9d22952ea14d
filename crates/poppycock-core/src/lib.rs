//! Poppycock Core Library
//!
//! This crate provides the storage layer for Poppycock, a keeper of
//! generated nonsense sentences.
//!
//! # Architecture
//!
//! - **SQLite**: one `sentence` table in a single-file database
//! - **SentenceStore**: mutex-guarded handle, safe to share across threads
//!
//! # Quick Start
//!
//! ```text
//! let store = SentenceStore::open_with_config(Config::load()?)?;
//!
//! // Record a sentence
//! let mut sentence = store.insert(Sentence::new("The teapot dreams of ships."))?;
//!
//! // Mark it as a favorite
//! store.toggle_favorite(&mut sentence)?;
//!
//! // Walk the history
//! let history = store.get_history(false)?;
//! let next = store.get_next_id(sentence.id.unwrap_or_default())?;
//! ```
//!
//! # Modules
//!
//! - `store`: Sentence store (main entry point)
//! - `models`: The `Sentence` record
//! - `storage`: Schema and error types
//! - `config`: Application configuration

pub mod config;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::{Sentence, NOT_IDENTIFIED};
pub use storage::{StoreError, StoreResult, SCHEMA_VERSION};
pub use store::SentenceStore;
