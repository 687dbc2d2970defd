//! Per-item topic extraction: tags, informative type label, and text topics.

use std::collections::{BTreeSet, HashMap};

use crate::bucket::bucket_topic;
use crate::normalize::tokenize;
use crate::stopwords::filter_tokens;
use crate::types::Item;

/// Characters of `title + body` considered for text mining.
pub const TEXT_PREFIX_CHARS: usize = 1500;

/// Distinct text topics kept per item.
pub const TOP_TOPICS_PER_ITEM: usize = 6;

/// Type labels that say nothing about the subject.
pub const GENERIC_TYPES: &[&str] = &["link", "nota", "note", "texto", "text", "plain text"];

/// Most frequent topics in a text, at most `limit`.
///
/// Ties keep the order in which topics first appear in the text.
pub fn extract_topics_from_text(text: &str, limit: usize) -> Vec<String> {
    let tokens = filter_tokens(tokenize(text));

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        let Some(topic) = bucket_topic(&token) else {
            continue;
        };
        match index.get(&topic) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(topic.clone(), counts.len());
                counts.push((topic, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(t, _)| t).collect()
}

/// Distinct topics for one item.
pub fn extract_topics_from_item(item: &Item) -> BTreeSet<String> {
    let mut topics = BTreeSet::new();

    for tag in &item.tags {
        if let Some(topic) = bucket_topic(tag) {
            topics.insert(topic);
        }
    }

    if let Some(kind) = item.kind.as_deref().and_then(bucket_topic) {
        if !GENERIC_TYPES.contains(&kind.as_str()) {
            topics.insert(kind);
        }
    }

    let combined = format!("{}\n{}", item.title.as_deref().unwrap_or(""), item.body());
    let prefix: String = combined.chars().take(TEXT_PREFIX_CHARS).collect();
    topics.extend(extract_topics_from_text(&prefix, TOP_TOPICS_PER_ITEM));

    topics
}
