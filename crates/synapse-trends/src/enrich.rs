//! Optional AI enrichment of a deterministic report.
//!
//! The radar never needs a model. When an [`InsightsProvider`] is wired in,
//! it receives a compact summary (topic counts plus a sample of in-window
//! items) and may return friendlier topic labels and rewritten narrative.
//! Anything it leaves empty keeps the deterministic text, and any error
//! falls back to the report unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use synapse_core::Result;
use tracing::{debug, warn};

use crate::narrative::MAX_RECOMMENDATIONS;
use crate::types::{Item, Trend, TrendsReport};
use crate::window::{parse_timestamp, WindowBounds};

/// Items sent as evidence alongside the counts.
pub const MAX_SAMPLE_ITEMS: usize = 60;

/// Characters of item body kept per sample.
pub const SAMPLE_CONTENT_CHARS: usize = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCount {
    pub topic: String,
    pub trend: Trend,
    pub recent_count: u32,
    pub previous_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub content: String,
}

/// Payload handed to an insights backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsInsightsRequest {
    pub window_days: u32,
    pub topics: Vec<TopicCount>,
    pub items: Vec<SampleItem>,
}

impl TrendsInsightsRequest {
    /// Summarize `report`, sampling from the items that fell in its windows.
    pub fn from_report(report: &TrendsReport, items: &[Item]) -> Self {
        let bounds = WindowBounds::new(report.generated_at, report.window_days);

        let topics = report
            .topics
            .iter()
            .map(|t| TopicCount {
                topic: t.topic.clone(),
                trend: t.trend,
                recent_count: t.recent_count,
                previous_count: t.previous_count,
            })
            .collect();

        let items = items
            .iter()
            .filter(|item| {
                item.created_at
                    .as_deref()
                    .and_then(parse_timestamp)
                    .is_some_and(|at| bounds.contains(at))
            })
            .take(MAX_SAMPLE_ITEMS)
            .map(sample_item)
            .collect();

        Self {
            window_days: report.window_days,
            topics,
            items,
        }
    }
}

fn sample_item(item: &Item) -> SampleItem {
    let body = item.body();
    let content = if body.chars().count() > SAMPLE_CONTENT_CHARS {
        let head: String = body.chars().take(SAMPLE_CONTENT_CHARS).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    };

    SampleItem {
        created_at: item.created_at.clone(),
        kind: item.kind.clone(),
        title: item.title.clone(),
        tags: item
            .tags
            .iter()
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .collect(),
        content,
    }
}

/// What an insights backend may return. Every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsInsightsResponse {
    #[serde(default)]
    pub topic_labels: BTreeMap<String, String>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A backend that turns radar counts into labels and narrative.
pub trait InsightsProvider: Send + Sync {
    fn generate(&self, request: &TrendsInsightsRequest) -> Result<TrendsInsightsResponse>;
}

impl TrendsReport {
    /// Merge a backend response into a copy of this report.
    pub fn with_insights(&self, response: TrendsInsightsResponse) -> TrendsReport {
        let mut report = self.clone();

        for stat in &mut report.topics {
            if let Some(label) = response.topic_labels.get(&stat.topic) {
                let label = label.trim();
                if !label.is_empty() {
                    stat.label = Some(label.to_string());
                }
            }
        }

        let insights = non_blank(response.insights);
        if !insights.is_empty() {
            report.insights = insights;
        }

        let mut recommendations = non_blank(response.recommendations);
        if !recommendations.is_empty() {
            recommendations.truncate(MAX_RECOMMENDATIONS);
            report.recommendations = recommendations;
        }

        report
    }
}

fn non_blank(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Ask `provider` to enrich `report`; on failure the report is returned as is.
pub fn enrich_report(
    report: TrendsReport,
    items: &[Item],
    provider: &dyn InsightsProvider,
) -> TrendsReport {
    let request = TrendsInsightsRequest::from_report(&report, items);
    match provider.generate(&request) {
        Ok(response) => {
            debug!(
                "Insights backend returned {} labels, {} insights",
                response.topic_labels.len(),
                response.insights.len()
            );
            report.with_insights(response)
        }
        Err(e) => {
            warn!("Insights backend failed, keeping deterministic report: {}", e);
            report
        }
    }
}
