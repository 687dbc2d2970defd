//! Synapse Store: SQLite-backed key-value storage for inbox entries and notes.

pub mod classify;
pub mod export;
pub mod schema;
pub mod sqlite;
pub mod types;

pub use classify::detect_entry_type;
pub use export::notes_to_markdown;
pub use sqlite::SqliteStore;
pub use types::*;
