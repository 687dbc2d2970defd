//! Trend classification from raw window counts.

use crate::types::{TopicStat, Trend};

/// Recent/previous ratio at or above which a topic is rising.
pub const UP_RATIO: f64 = 1.5;

/// Recent/previous ratio at or below which a topic is falling.
pub const DOWN_RATIO: f64 = 0.67;

/// Classify a topic's direction. Rules apply in order; the first match wins.
pub fn classify(recent: u32, previous: u32) -> Trend {
    if previous == 0 && recent > 0 {
        return Trend::Up;
    }
    if recent == 0 && previous > 0 {
        return Trend::Down;
    }
    if previous > 0 {
        let ratio = f64::from(recent) / f64::from(previous);
        let delta = i64::from(recent) - i64::from(previous);
        if ratio >= UP_RATIO && delta >= 1 {
            return Trend::Up;
        }
        if ratio <= DOWN_RATIO && delta <= -1 {
            return Trend::Down;
        }
    }
    Trend::Stable
}

pub fn explanation(recent: u32, previous: u32, window_days: u32) -> String {
    format!(
        "{} in the last {} days vs {} in the previous {} days",
        recent, window_days, previous, window_days
    )
}

/// Build the stat for one topic. Callers filter out zero totals first.
pub fn topic_stat(topic: &str, recent: u32, previous: u32, window_days: u32) -> TopicStat {
    let trend = classify(recent, previous);
    TopicStat {
        topic: topic.to_string(),
        recent_count: recent,
        previous_count: previous,
        trend,
        arrow: trend.arrow().to_string(),
        explanation: explanation(recent, previous, window_days),
        label: None,
    }
}
