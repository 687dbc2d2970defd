//! Capture classification: guess an inbox entry's type from its text.
//!
//! Checks run from most to least specific; the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://\S+").expect("valid regex"));
static VIDEO_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)youtube\.com|youtu\.be|vimeo\.com").expect("valid regex"));
static TASK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^\s*(- \[ \]|\[ \]\s|TODO[:\s])").expect("valid regex"));
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[a-z]*[\s\S]*```").expect("valid regex"));
static CODE_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(function|const|let|var|class)\b").expect("valid regex"));

/// Classify captured text as `video`, `link`, `tarea`, `codigo` or `nota`.
/// Empty input is `texto`.
pub fn detect_entry_type(content: &str) -> &'static str {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return "texto";
    }

    let has_url = URL.is_match(trimmed);
    if has_url && VIDEO_HOST.is_match(trimmed) {
        return "video";
    }
    if has_url {
        return "link";
    }
    if TASK.is_match(trimmed) {
        return "tarea";
    }
    if CODE_FENCE.is_match(trimmed) || CODE_KEYWORD.is_match(trimmed) {
        return "codigo";
    }
    "nota"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(detect_entry_type(""), "texto");
        assert_eq!(detect_entry_type("   "), "texto");
    }

    #[test]
    fn test_urls() {
        assert_eq!(detect_entry_type("https://www.youtube.com/watch?v=x"), "video");
        assert_eq!(detect_entry_type("see https://youtu.be/abc"), "video");
        assert_eq!(detect_entry_type("https://example.com"), "link");
    }

    #[test]
    fn test_tasks() {
        assert_eq!(detect_entry_type("- [ ] buy milk"), "tarea");
        assert_eq!(detect_entry_type("notes\nTODO: call back"), "tarea");
    }

    #[test]
    fn test_code() {
        assert_eq!(detect_entry_type("```js\nx()\n```"), "codigo");
        assert_eq!(detect_entry_type("const x = 1;"), "codigo");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(detect_entry_type("just some text"), "nota");
    }
}
