//! Text normalization: accent folding, URL and code-fence removal, tokenizing.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z][a-z0-9+.\-]*://\S+").expect("valid URL regex"));
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?```").expect("valid code fence regex"));
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9+._\-]+").expect("valid charset regex"));

/// Decompose (NFD), drop combining marks, lowercase.
pub fn fold(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_combining_mark(*c)).collect();
    stripped.to_lowercase()
}

/// Split free text into candidate tokens.
///
/// Order matters: folding runs first so URL schemes and fences match
/// lowercase input, and the charset pass runs last.
pub fn tokenize(text: &str) -> Vec<String> {
    let folded = fold(text);
    let no_urls = URL.replace_all(&folded, " ");
    let no_code = CODE_FENCE.replace_all(&no_urls, " ");
    let clean = DISALLOWED.replace_all(&no_code, " ");
    clean.split_whitespace().map(str::to_string).collect()
}

/// Normalize a short label (tag, type) to its topic form.
///
/// Only folding and the charset pass apply; inner runs collapse to a single
/// space, so multi-word tags stay multi-word.
pub fn normalize_label(raw: &str) -> String {
    let folded = fold(raw);
    DISALLOWED
        .replace_all(&folded, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
