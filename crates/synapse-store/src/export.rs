//! Markdown export of processed notes.

use crate::types::{Note, UNTITLED_NOTE};

/// Render notes as one Markdown document, separated by horizontal rules.
pub fn notes_to_markdown(notes: &[Note]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for note in notes {
        let title = if note.title.is_empty() {
            UNTITLED_NOTE
        } else {
            note.title.as_str()
        };
        lines.push(format!("# {}", title));
        lines.push(String::new());
        if !note.tags.is_empty() {
            let tags: Vec<String> = note.tags.iter().map(|t| format!("#{}", t)).collect();
            lines.push(format!("Tags: {}", tags.join(" ")));
            lines.push(String::new());
        }
        lines.push(note.content.clone());
        lines.push("\n---\n".to_string());
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, tags: &[&str], content: &str) -> Note {
        Note {
            id: "n".into(),
            entry_id: None,
            title: title.into(),
            destination: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            content: content.into(),
            kind: String::new(),
            created_at: "2026-01-01T00:00:00Z".into(),
            is_read: false,
            media: None,
        }
    }

    #[test]
    fn test_markdown_contains_titles_tags_and_content() {
        let md = notes_to_markdown(&[note("T1", &["rust", "ia"], "C1"), note("", &[], "C2")]);
        assert!(md.starts_with("# T1\n\nTags: #rust #ia\n\nC1\n"));
        assert!(md.contains(&format!("# {}", UNTITLED_NOTE)));
        assert!(md.contains("C2"));
        assert_eq!(md.matches("---").count(), 2);
    }

    #[test]
    fn test_empty() {
        assert_eq!(notes_to_markdown(&[]), "");
    }
}
