//! Bilingual (Spanish/English) stopword filter with a minimum token length.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::normalize::fold;

/// Tokens shorter than this (in characters) never become topics.
pub const MIN_TOKEN_LEN: usize = 4;

/// Articles, conjunctions and common pronouns. Accented forms are folded
/// at load time, so `qué` and `que` are the same entry.
pub const STOPWORDS: &[&str] = &[
    // Spanish
    "de", "la", "el", "y", "o", "a", "en", "un", "una", "unos", "unas", "por", "para",
    "con", "sin", "del", "al", "se", "su", "sus", "es", "son", "ser", "fue", "era",
    "que", "como", "cuando", "donde", "porque", "qué", "cómo", "cuándo", "dónde",
    "este", "esta", "estos", "estas", "ese", "esa", "esos", "esas", "lo", "las", "los",
    "más", "menos", "muy", "ya", "también", "pero", "si", "no", "sí",
    // English
    "the", "and", "or", "to", "in", "of", "for", "with", "without", "is", "are", "was",
    "be", "as", "on", "at", "by", "from", "it", "this", "that", "these", "those",
];

static STOPWORD_SET: Lazy<HashSet<String>> =
    Lazy::new(|| STOPWORDS.iter().map(|w| fold(w)).collect());

/// Whether a normalized token is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Whether a normalized token survives both the length cutoff and the list.
pub fn keep_token(token: &str) -> bool {
    token.chars().count() >= MIN_TOKEN_LEN && !is_stopword(token)
}

/// Drop stopwords and short tokens, preserving order.
pub fn filter_tokens(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().filter(|t| keep_token(t)).collect()
}
