//! Synapse Trends: personal trend radar over captured items.
//!
//! Deterministic and pure: topics come from tags, informative type labels
//! and frequent words in each item's text (accent-folded, stopword-filtered,
//! synonym-bucketed). Items are split into two adjacent windows ending now,
//! per-topic presence is compared, and the result is ranked and narrated.

pub mod bucket;
pub mod classify;
pub mod enrich;
pub mod extract;
pub mod narrative;
pub mod normalize;
pub mod report;
pub mod stopwords;
pub mod types;
pub mod window;

pub use enrich::{
    enrich_report, InsightsProvider, TrendsInsightsRequest, TrendsInsightsResponse,
};
pub use extract::extract_topics_from_item;
pub use report::{build_trends_report, build_trends_report_at};
pub use types::{Item, TopicStat, Trend, TrendsOptions, TrendsReport};
