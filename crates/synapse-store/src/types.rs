//! Stored record types: inbox entries and processed notes.

use serde::{Deserialize, Serialize};
use synapse_trends::Item;

/// An unprocessed capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxEntry {
    pub id: String,
    pub raw_content: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: String,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_source() -> String {
    "manual".to_string()
}

fn default_status() -> String {
    "inbox".to_string()
}

/// Attached media reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub content_type: String,
}

/// A processed note. Notes saved before the read flag existed load as unread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub created_at: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
}

/// Fields chosen while processing an inbox entry into a note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub structured_content: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_content_type: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

pub const UNTITLED_NOTE: &str = "Untitled note";

impl From<&InboxEntry> for Item {
    fn from(entry: &InboxEntry) -> Self {
        Item::new(entry.created_at.clone())
            .with_id(entry.id.clone())
            .with_kind(entry.kind.clone())
            .with_raw_content(entry.raw_content.clone())
    }
}

impl From<&Note> for Item {
    fn from(note: &Note) -> Self {
        let mut item = Item::new(note.created_at.clone())
            .with_id(note.id.clone())
            .with_tags(note.tags.iter().cloned())
            .with_title(note.title.clone())
            .with_content(note.content.clone());
        if !note.kind.is_empty() {
            item = item.with_kind(note.kind.clone());
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_note_defaults() {
        let note: Note = serde_json::from_str(
            r#"{"id": "n1", "title": "Old", "createdAt": "2025-01-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert!(!note.is_read);
        assert!(note.tags.is_empty());
        assert!(note.media.is_none());
    }

    #[test]
    fn test_note_to_item() {
        let note = Note {
            id: "n1".into(),
            entry_id: None,
            title: "Rust".into(),
            destination: "nota".into(),
            tags: vec!["rust".into()],
            content: "ownership".into(),
            kind: "nota".into(),
            created_at: "2026-01-01T00:00:00Z".into(),
            is_read: false,
            media: None,
        };
        let item = Item::from(&note);
        assert_eq!(item.tags, vec!["rust"]);
        assert_eq!(item.body(), "ownership");
        assert_eq!(item.kind.as_deref(), Some("nota"));
    }

    #[test]
    fn test_entry_to_item_uses_raw_content() {
        let entry: InboxEntry = serde_json::from_str(
            r#"{"id": "1", "rawContent": "hello", "type": "nota", "createdAt": "2026-01-01"}"#,
        )
        .unwrap();
        assert_eq!(entry.source, "manual");
        assert_eq!(Item::from(&entry).body(), "hello");
    }
}
