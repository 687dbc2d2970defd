//! Ranking plus the short insight and recommendation sentences.

use crate::classify::topic_stat;
use crate::types::{TopicStat, Trend};

/// Upper bound on recommendations in a report.
pub const MAX_RECOMMENDATIONS: usize = 3;

pub const INSUFFICIENT_HISTORY: &str = "Not enough recent history yet to detect trends.";
pub const STABLE_INTERESTS: &str = "Your interests have stayed fairly stable over this period.";

/// Rank `(topic, recent, previous)` rows into at most `max_topics` stats.
///
/// Sorted by total presence, descending; equal totals fall back to topic
/// name so the output never depends on input order.
pub fn rank_topics(
    counts: Vec<(String, u32, u32)>,
    max_topics: usize,
    window_days: u32,
) -> Vec<TopicStat> {
    let mut rows: Vec<(String, u32, u32)> =
        counts.into_iter().filter(|(_, r, p)| r + p > 0).collect();
    rows.sort_by(|a, b| (b.1 + b.2).cmp(&(a.1 + a.2)).then_with(|| a.0.cmp(&b.0)));
    rows.truncate(max_topics);
    rows.into_iter()
        .map(|(topic, recent, previous)| topic_stat(&topic, recent, previous, window_days))
        .collect()
}

fn with_trend(topics: &[TopicStat], trend: Trend) -> Vec<&TopicStat> {
    topics.iter().filter(|t| t.trend == trend).collect()
}

fn join_topics(topics: &[&TopicStat]) -> String {
    topics
        .iter()
        .map(|t| t.topic.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn insights(topics: &[TopicStat]) -> Vec<String> {
    if topics.is_empty() {
        return vec![INSUFFICIENT_HISTORY.to_string()];
    }

    let ups = with_trend(topics, Trend::Up);
    let downs = with_trend(topics, Trend::Down);

    let mut out = Vec::new();
    if !ups.is_empty() {
        out.push(format!("Your recent interest is rising in: {}.", join_topics(&ups)));
    }
    if !downs.is_empty() {
        out.push(format!("Your recent interest is falling in: {}.", join_topics(&downs)));
    }
    if out.is_empty() {
        out.push(STABLE_INTERESTS.to_string());
    }
    out
}

/// Up to three suggestions: top rising topic, runner-up rising topic, top
/// falling topic, in that order.
pub fn recommendations(topics: &[TopicStat]) -> Vec<String> {
    let ups = with_trend(topics, Trend::Up);
    let downs = with_trend(topics, Trend::Down);

    let mut out = Vec::new();
    if let Some(first) = ups.first() {
        out.push(format!(
            "Create an index note for \"{}\" (key concepts, links and a checklist).",
            first.topic
        ));
    }
    if let Some(second) = ups.get(1) {
        out.push(format!(
            "Turn 1-2 recent \"{}\" entries into smaller, linked notes.",
            second.topic
        ));
    }
    if let Some(fading) = downs.first() {
        out.push(format!(
            "If \"{}\" no longer helps you, archive it or tag a summary note so it isn't lost.",
            fading.topic
        ));
    }
    out.truncate(MAX_RECOMMENDATIONS);
    out
}
