//! Database schema SQL.

/// Key-value table. Each key holds one JSON document.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

/// Key holding the JSON array of unprocessed inbox entries.
pub const INBOX_KEY: &str = "digitalBrain.inbox";

/// Key holding the JSON array of processed notes.
pub const NOTES_KEY: &str = "digitalBrain.notes";
