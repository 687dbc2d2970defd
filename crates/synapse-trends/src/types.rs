//! Trend radar data types: input items, per-topic stats, and the report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use synapse_core::config::{DEFAULT_MAX_TOPICS, DEFAULT_WINDOW_DAYS};

/// A captured inbox entry or processed note, as seen by the radar.
///
/// Every field is optional on the wire; missing or `null` values read as
/// empty so that any stored record can be analyzed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
}

impl Item {
    pub fn new(created_at: impl Into<String>) -> Self {
        Self {
            created_at: Some(created_at.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_raw_content(mut self, raw: impl Into<String>) -> Self {
        self.raw_content = Some(raw.into());
        self
    }

    /// Free-text body: `content` when non-empty, otherwise `rawContent`.
    pub fn body(&self) -> &str {
        match self.content.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => self.raw_content.as_deref().unwrap_or(""),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Direction of a topic between the previous and the recent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Glyph shown next to the topic.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Stable => "→",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Presence counts and classification for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStat {
    pub topic: String,
    pub recent_count: u32,
    pub previous_count: u32,
    pub trend: Trend,
    pub arrow: String,
    pub explanation: String,
    /// Friendlier name supplied by an insights backend, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl TopicStat {
    pub fn total(&self) -> u32 {
        self.recent_count + self.previous_count
    }
}

/// Output of one radar run. Built fresh on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsReport {
    pub generated_at: DateTime<Utc>,
    pub window_days: u32,
    pub total_items_analyzed: usize,
    pub topics: Vec<TopicStat>,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Caller-supplied knobs; `None` means the documented default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsOptions {
    #[serde(default)]
    pub window_days: Option<u32>,
    #[serde(default)]
    pub max_topics: Option<usize>,
}

impl TrendsOptions {
    pub fn window_days(&self) -> u32 {
        self.window_days.unwrap_or(DEFAULT_WINDOW_DAYS)
    }

    pub fn max_topics(&self) -> usize {
        self.max_topics.unwrap_or(DEFAULT_MAX_TOPICS)
    }
}
