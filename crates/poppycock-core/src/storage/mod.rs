//! Storage layer
//!
//! SQLite schema definition and the typed errors raised by the store.

pub mod error;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use schema::{init_schema, needs_init, SCHEMA_VERSION};
