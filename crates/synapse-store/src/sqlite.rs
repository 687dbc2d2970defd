//! SQLite-backed store for inbox entries and notes.
//!
//! Each list lives as one JSON array under a fixed key in `kv_store`, so the
//! stored shape matches what the capture UI reads and writes.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::classify::detect_entry_type;
use crate::export::notes_to_markdown;
use crate::schema::{INBOX_KEY, NOTES_KEY, SCHEMA_SQL};
use crate::types::*;
use synapse_core::{Error, Result};
use synapse_trends::Item;

pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the store. The file will be `db_dir/synapse.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let db_path = db_dir.join("synapse.db");

        let conn = Self::create_connection(&db_path)?;
        Self::init_schema(&conn)?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };
        info!(
            "SqliteStore initialized: {} inbox entries, {} notes, path={}",
            store.load_inbox()?.len(),
            store.load_notes()?.len(),
            store.db_path.display()
        );
        Ok(store)
    }

    /// In-memory store, used by tests and ephemeral servers.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::Database(e.to_string()))?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            db_path: PathBuf::from(":memory:"),
        })
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;
        Ok(())
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    // ---------------------------------------------------------------
    // Raw key-value access
    // ---------------------------------------------------------------

    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock();
        read_value(&conn, key)
    }

    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock();
        write_value(&conn, key, value)
    }

    /// Run `f` inside one immediate transaction while holding the connection
    /// lock, so list read-modify-write cycles never interleave.
    fn write_txn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn.lock();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| Error::Database(e.to_string()))?;
        let out = f(&tx)?;
        tx.commit().map_err(|e| Error::Database(e.to_string()))?;
        Ok(out)
    }

    // ---------------------------------------------------------------
    // Inbox
    // ---------------------------------------------------------------

    pub fn load_inbox(&self) -> Result<Vec<InboxEntry>> {
        let conn = self.conn.lock();
        read_list(&conn, INBOX_KEY)
    }

    pub fn save_inbox(&self, entries: &[InboxEntry]) -> Result<()> {
        self.write_txn(|conn| write_list(conn, INBOX_KEY, entries))
    }

    /// Capture raw text into the inbox. Newest entries go first.
    pub fn add_inbox_entry(&self, raw_content: &str, source: Option<&str>) -> Result<InboxEntry> {
        let entry = InboxEntry {
            id: uuid::Uuid::new_v4().to_string(),
            raw_content: raw_content.to_string(),
            kind: detect_entry_type(raw_content).to_string(),
            created_at: now_iso(),
            source: source.unwrap_or("manual").to_string(),
            status: "inbox".to_string(),
        };
        self.write_txn(|conn| {
            let mut inbox: Vec<InboxEntry> = read_list(conn, INBOX_KEY)?;
            inbox.insert(0, entry.clone());
            write_list(conn, INBOX_KEY, &inbox)
        })?;
        debug!("Inbox entry {} captured as {}", entry.id, entry.kind);
        Ok(entry)
    }

    /// Turn an inbox entry into a note and drop it from the inbox.
    /// Both lists are rewritten in the same transaction.
    pub fn process_entry(&self, entry_id: &str, draft: NoteDraft) -> Result<Note> {
        let (entry_id, note) = self.write_txn(|conn| {
            let mut inbox: Vec<InboxEntry> = read_list(conn, INBOX_KEY)?;
            let pos = inbox
                .iter()
                .position(|e| e.id == entry_id)
                .ok_or_else(|| Error::NotFound(format!("inbox entry {}", entry_id)))?;
            let entry = inbox.remove(pos);

            let note = note_from_entry(&entry, draft);
            let mut notes: Vec<Note> = read_list(conn, NOTES_KEY)?;
            notes.insert(0, note.clone());
            write_list(conn, NOTES_KEY, &notes)?;
            write_list(conn, INBOX_KEY, &inbox)?;
            Ok((entry.id, note))
        })?;

        info!("Processed inbox entry {} into note {}", entry_id, note.id);
        Ok(note)
    }

    // ---------------------------------------------------------------
    // Notes
    // ---------------------------------------------------------------

    pub fn load_notes(&self) -> Result<Vec<Note>> {
        let conn = self.conn.lock();
        read_list(&conn, NOTES_KEY)
    }

    pub fn save_notes(&self, notes: &[Note]) -> Result<()> {
        self.write_txn(|conn| write_list(conn, NOTES_KEY, notes))
    }

    /// Delete a note by id. Returns the remaining notes.
    pub fn delete_note(&self, note_id: &str) -> Result<Vec<Note>> {
        self.write_txn(|conn| {
            let mut notes: Vec<Note> = read_list(conn, NOTES_KEY)?;
            let before = notes.len();
            notes.retain(|n| n.id != note_id);
            if notes.len() == before {
                return Err(Error::NotFound(format!("note {}", note_id)));
            }
            write_list(conn, NOTES_KEY, &notes)?;
            Ok(notes)
        })
    }

    /// Flip a note's read flag. Returns the updated notes.
    pub fn toggle_note_read(&self, note_id: &str) -> Result<Vec<Note>> {
        self.write_txn(|conn| {
            let mut notes: Vec<Note> = read_list(conn, NOTES_KEY)?;
            let note = notes
                .iter_mut()
                .find(|n| n.id == note_id)
                .ok_or_else(|| Error::NotFound(format!("note {}", note_id)))?;
            note.is_read = !note.is_read;
            write_list(conn, NOTES_KEY, &notes)?;
            Ok(notes)
        })
    }

    pub fn export_notes_markdown(&self) -> Result<String> {
        Ok(notes_to_markdown(&self.load_notes()?))
    }

    // ---------------------------------------------------------------
    // Trend radar input
    // ---------------------------------------------------------------

    /// All stored captures as radar items: notes first, then inbox entries.
    pub fn trend_items(&self) -> Result<Vec<Item>> {
        let conn = self.conn.lock();
        let notes: Vec<Note> = read_list(&conn, NOTES_KEY)?;
        let inbox: Vec<InboxEntry> = read_list(&conn, INBOX_KEY)?;
        Ok(notes
            .iter()
            .map(Item::from)
            .chain(inbox.iter().map(Item::from))
            .collect())
    }
}

fn read_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .prepare_cached("SELECT value FROM kv_store WHERE key = ?1")
        .map_err(|e| Error::Database(e.to_string()))?
        .query_row(params![key], |row| row.get(0))
        .optional()
        .map_err(|e| Error::Database(e.to_string()));
    value
}

fn write_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let now = Utc::now().timestamp_millis();
    conn.prepare_cached(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .map_err(|e| Error::Database(e.to_string()))?
    .execute(params![key, value, now])
    .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}

/// Read a JSON list. Missing keys and unreadable JSON both give an empty list.
fn read_list<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Vec<T>> {
    let Some(raw) = read_value(conn, key)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(list) => Ok(list),
        Err(e) => {
            warn!("Stored value under {} is not a valid list, ignoring: {}", key, e);
            Ok(Vec::new())
        }
    }
}

fn write_list<T: Serialize>(conn: &Connection, key: &str, list: &[T]) -> Result<()> {
    let json = serde_json::to_string(list)?;
    write_value(conn, key, &json)
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn note_from_entry(entry: &InboxEntry, draft: NoteDraft) -> Note {
    let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let media = non_blank(draft.media_url).map(|url| Media {
        url,
        content_type: draft.media_content_type.unwrap_or_default(),
    });
    Note {
        id: format!("note-{}", uuid::Uuid::new_v4()),
        entry_id: Some(entry.id.clone()),
        title: non_blank(draft.title).unwrap_or_else(|| UNTITLED_NOTE.to_string()),
        destination: non_blank(draft.destination).unwrap_or_else(|| "nota".to_string()),
        tags: draft
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        content: non_blank(draft.structured_content).unwrap_or_else(|| entry.raw_content.clone()),
        kind: non_blank(draft.kind).unwrap_or_else(|| entry.kind.clone()),
        created_at: now_iso(),
        is_read: false,
        media,
    }
}
