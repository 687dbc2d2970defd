//! Window aggregation: split items into recent/previous windows and count
//! topic presence per window.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::extract::extract_topics_from_item;
use crate::types::Item;

/// The two adjacent, equal-length windows ending at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub previous_start: DateTime<Utc>,
    pub recent_start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WindowBounds {
    /// Windows reaching past chrono's earliest date saturate at `MIN_UTC`.
    pub fn new(now: DateTime<Utc>, window_days: u32) -> Self {
        let window = Duration::days(i64::from(window_days));
        let back = |from: DateTime<Utc>| {
            from.checked_sub_signed(window)
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        };
        let recent_start = back(now);
        Self {
            previous_start: back(recent_start),
            recent_start,
            end: now,
        }
    }

    /// Inside `[previous_start, end]`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.previous_start && at <= self.end
    }

    /// Inside `[recent_start, end]`.
    pub fn is_recent(&self, at: DateTime<Utc>) -> bool {
        at >= self.recent_start && at <= self.end
    }
}

/// Per-topic presence counts for both windows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowCounts {
    pub total_items_analyzed: usize,
    pub recent: BTreeMap<String, u32>,
    pub previous: BTreeMap<String, u32>,
}

impl WindowCounts {
    /// `(topic, recent, previous)` for every topic seen in either window,
    /// in topic order.
    pub fn topic_counts(&self) -> Vec<(String, u32, u32)> {
        let mut merged: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
        for (topic, n) in &self.recent {
            merged.entry(topic.as_str()).or_default().0 = *n;
        }
        for (topic, n) in &self.previous {
            merged.entry(topic.as_str()).or_default().1 = *n;
        }
        merged
            .into_iter()
            .map(|(t, (r, p))| (t.to_string(), r, p))
            .collect()
    }
}

/// Parse an item timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC), or a
/// bare `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Count topic presence per window. Out-of-window and unparseable items are
/// skipped.
pub fn aggregate(items: &[Item], bounds: &WindowBounds) -> WindowCounts {
    let mut counts = WindowCounts::default();
    let mut skipped = 0usize;

    for item in items {
        let Some(created_at) = item.created_at.as_deref().and_then(parse_timestamp) else {
            skipped += 1;
            continue;
        };
        if !bounds.contains(created_at) {
            skipped += 1;
            continue;
        }

        counts.total_items_analyzed += 1;

        let target = if bounds.is_recent(created_at) {
            &mut counts.recent
        } else {
            &mut counts.previous
        };
        // The set holds each topic once, so an item adds at most 1 per topic.
        for topic in extract_topics_from_item(item) {
            *target.entry(topic).or_insert(0) += 1;
        }
    }

    debug!(
        "Aggregated {} items ({} skipped): {} recent topics, {} previous topics",
        counts.total_items_analyzed,
        skipped,
        counts.recent.len(),
        counts.previous.len()
    );

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn at_days_ago(days: i64) -> String {
        (now() - Duration::days(days)).to_rfc3339()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2026-03-15T12:00:00Z").is_some());
        assert!(parse_timestamp("2026-03-15T12:00:00.123+02:00").is_some());
        assert!(parse_timestamp("2026-03-15T12:00:00").is_some());
        assert_eq!(
            parse_timestamp("2026-03-15"),
            Some(Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_window_edges() {
        let bounds = WindowBounds::new(now(), 14);
        assert!(bounds.is_recent(now()));
        assert!(bounds.is_recent(now() - Duration::days(14)));
        assert!(!bounds.is_recent(now() - Duration::days(14) - Duration::seconds(1)));
        assert!(bounds.contains(now() - Duration::days(28)));
        assert!(!bounds.contains(now() - Duration::days(28) - Duration::seconds(1)));
        assert!(!bounds.contains(now() + Duration::seconds(1)));
    }

    #[test]
    fn test_huge_window_saturates() {
        let bounds = WindowBounds::new(now(), u32::MAX);
        assert_eq!(bounds.previous_start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(bounds.recent_start, DateTime::<Utc>::MIN_UTC);
        assert!(bounds.is_recent(now() - Duration::days(365 * 100)));

        let items = vec![Item::new("2026-03-10T00:00:00Z").with_tags(["ia"])];
        let counts = aggregate(&items, &WindowBounds::new(now(), 100_000_000));
        assert_eq!(counts.total_items_analyzed, 1);
        assert_eq!(counts.recent.get("ia"), Some(&1));
    }

    #[test]
    fn test_aggregate_partitions_and_skips() {
        let items = vec![
            Item::new(at_days_ago(1)).with_tags(["rust"]),
            Item::new(at_days_ago(20)).with_tags(["rust"]),
            Item::new(at_days_ago(40)).with_tags(["rust"]),
            Item::new("garbage").with_tags(["rust"]),
            Item::default().with_tags(["rust"]),
        ];
        let counts = aggregate(&items, &WindowBounds::new(now(), 14));
        assert_eq!(counts.total_items_analyzed, 2);
        assert_eq!(counts.recent.get("rust"), Some(&1));
        assert_eq!(counts.previous.get("rust"), Some(&1));
    }

    #[test]
    fn test_presence_not_frequency() {
        let items = vec![Item::new(at_days_ago(2))
            .with_tags(["rust", "Rust"])
            .with_content("rust rust rust rust")];
        let counts = aggregate(&items, &WindowBounds::new(now(), 14));
        assert_eq!(counts.recent.get("rust"), Some(&1));
        assert!(counts.previous.is_empty());
    }

    #[test]
    fn test_topic_counts_merges_windows() {
        let items = vec![
            Item::new(at_days_ago(1)).with_tags(["alpha"]),
            Item::new(at_days_ago(20)).with_tags(["beta", "alpha"]),
        ];
        let counts = aggregate(&items, &WindowBounds::new(now(), 14));
        assert_eq!(
            counts.topic_counts(),
            vec![("alpha".to_string(), 1, 1), ("beta".to_string(), 0, 1)]
        );
    }
}
