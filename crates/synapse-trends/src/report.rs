//! Report assembly: windows → counts → ranked stats → narrative.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::narrative::{insights, rank_topics, recommendations};
use crate::types::{Item, TrendsOptions, TrendsReport};
use crate::window::{aggregate, WindowBounds};

/// Build a report as of `now`. Pure: identical inputs give identical output.
pub fn build_trends_report_at(
    items: &[Item],
    now: DateTime<Utc>,
    options: &TrendsOptions,
) -> TrendsReport {
    let window_days = options.window_days();
    let max_topics = options.max_topics();

    let bounds = WindowBounds::new(now, window_days);
    let counts = aggregate(items, &bounds);
    let topics = rank_topics(counts.topic_counts(), max_topics, window_days);

    debug!(
        "Trends report: {} of {} items analyzed, {} topics ranked (window={}d, max={})",
        counts.total_items_analyzed,
        items.len(),
        topics.len(),
        window_days,
        max_topics
    );

    TrendsReport {
        generated_at: now,
        window_days,
        total_items_analyzed: counts.total_items_analyzed,
        insights: insights(&topics),
        recommendations: recommendations(&topics),
        topics,
    }
}

/// Build a report as of the current time.
pub fn build_trends_report(items: &[Item], options: &TrendsOptions) -> TrendsReport {
    build_trends_report_at(items, Utc::now(), options)
}
