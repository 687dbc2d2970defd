//! Trend radar routes: reports over stored or posted items.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::routes::error_response;
use crate::state::AppState;
use synapse_trends::{
    build_trends_report, enrich_report, Item, TrendsInsightsRequest, TrendsInsightsResponse,
    TrendsOptions,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trends", get(get_trends).post(post_trends))
        .route("/trends/insights-request", get(get_insights_request))
        .route("/trends/enrich", post(post_enrich))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendsQuery {
    window_days: Option<u32>,
    max_topics: Option<usize>,
    #[serde(default)]
    enrich: bool,
}

fn resolve_options(
    state: &AppState,
    window_days: Option<u32>,
    max_topics: Option<usize>,
) -> Result<TrendsOptions, (StatusCode, Json<serde_json::Value>)> {
    if window_days == Some(0) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "windowDays must be at least 1" })),
        ));
    }
    Ok(state.trends_options(window_days, max_topics))
}

/// GET /api/trends — report over every stored note and inbox entry.
async fn get_trends(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TrendsQuery>,
) -> impl IntoResponse {
    let options = match resolve_options(&state, q.window_days, q.max_topics) {
        Ok(o) => o,
        Err(resp) => return resp,
    };
    let items = match state.store.trend_items() {
        Ok(items) => items,
        Err(e) => return error_response(e),
    };
    let report = build_trends_report(&items, &options);

    let report = match (q.enrich, state.insights.clone()) {
        (true, Some(provider)) => {
            let fallback = report.clone();
            tokio::task::spawn_blocking(move || enrich_report(report, &items, provider.as_ref()))
                .await
                .unwrap_or_else(|e| {
                    warn!("Insights task failed: {}", e);
                    fallback
                })
        }
        (true, None) => {
            debug!("Enrichment requested but no insights backend is configured");
            report
        }
        (false, _) => report,
    };

    (StatusCode::OK, Json(serde_json::json!(report)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrendsRequest {
    #[serde(default)]
    items: Vec<Item>,
    window_days: Option<u32>,
    max_topics: Option<usize>,
}

/// POST /api/trends — report over the items in the request body.
async fn post_trends(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrendsRequest>,
) -> impl IntoResponse {
    let options = match resolve_options(&state, req.window_days, req.max_topics) {
        Ok(o) => o,
        Err(resp) => return resp,
    };
    let report = build_trends_report(&req.items, &options);
    (StatusCode::OK, Json(serde_json::json!(report)))
}

/// GET /api/trends/insights-request — payload for an external AI backend.
async fn get_insights_request(
    State(state): State<Arc<AppState>>,
    Query(q): Query<TrendsQuery>,
) -> impl IntoResponse {
    let options = match resolve_options(&state, q.window_days, q.max_topics) {
        Ok(o) => o,
        Err(resp) => return resp,
    };
    match state.store.trend_items() {
        Ok(items) => {
            let report = build_trends_report(&items, &options);
            let request = TrendsInsightsRequest::from_report(&report, &items);
            (StatusCode::OK, Json(serde_json::json!(request)))
        }
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnrichRequest {
    #[serde(default)]
    insights: TrendsInsightsResponse,
    window_days: Option<u32>,
    max_topics: Option<usize>,
}

/// POST /api/trends/enrich — apply an AI response produced elsewhere to the stored report.
async fn post_enrich(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnrichRequest>,
) -> impl IntoResponse {
    let options = match resolve_options(&state, req.window_days, req.max_topics) {
        Ok(o) => o,
        Err(resp) => return resp,
    };
    match state.store.trend_items() {
        Ok(items) => {
            let report = build_trends_report(&items, &options).with_insights(req.insights);
            (StatusCode::OK, Json(serde_json::json!(report)))
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{send_json, test_state};
    use chrono::{Duration, Utc};
    use synapse_core::{Error, Result};
    use synapse_store::NoteDraft;

    struct FixedInsights;

    impl synapse_trends::InsightsProvider for FixedInsights {
        fn generate(&self, request: &TrendsInsightsRequest) -> Result<TrendsInsightsResponse> {
            let mut response = TrendsInsightsResponse::default();
            for t in &request.topics {
                response
                    .topic_labels
                    .insert(t.topic.clone(), format!("Label {}", t.topic));
            }
            response.insights = vec!["AI insight".to_string()];
            Ok(response)
        }
    }

    struct FailingInsights;

    impl synapse_trends::InsightsProvider for FailingInsights {
        fn generate(&self, _: &TrendsInsightsRequest) -> Result<TrendsInsightsResponse> {
            Err(Error::Insights("backend offline".into()))
        }
    }

    fn days_ago(days: i64) -> String {
        (Utc::now() - Duration::days(days)).to_rfc3339()
    }

    #[tokio::test]
    async fn test_get_trends_empty_store() {
        let (state, _dir) = test_state();
        let (status, body) = send_json(state, "GET", "/api/trends", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalItemsAnalyzed"], 0);
        assert_eq!(body["windowDays"], 14);
        assert!(body["topics"].as_array().unwrap().is_empty());
        assert_eq!(body["insights"].as_array().unwrap().len(), 1);
        assert!(body["generatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_get_trends_over_stored_notes() {
        let (state, _dir) = test_state();
        let entry = state.store.add_inbox_entry("docker compose files", None).unwrap();
        state
            .store
            .process_entry(
                &entry.id,
                NoteDraft {
                    tags: vec!["kubernetes".into()],
                    ..Default::default()
                },
            )
            .unwrap();

        let (status, body) = send_json(state, "GET", "/api/trends?windowDays=7", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["windowDays"], 7);
        assert_eq!(body["totalItemsAnalyzed"], 1);
        let topics = body["topics"].as_array().unwrap();
        let devops = topics.iter().find(|t| t["topic"] == "devops").unwrap();
        assert_eq!(devops["recentCount"], 1);
        assert_eq!(devops["previousCount"], 0);
        assert_eq!(devops["trend"], "up");
        assert_eq!(devops["arrow"], "↑");
    }

    #[tokio::test]
    async fn test_post_trends() {
        let (state, _dir) = test_state();
        let body = serde_json::json!({
            "items": [
                {"createdAt": days_ago(1), "tags": ["react"]},
                {"createdAt": days_ago(2), "tags": ["ux"], "type": "link"},
                {"createdAt": days_ago(20), "tags": ["rust"]},
                {"createdAt": "garbage", "tags": ["rust"]},
            ],
            "maxTopics": 1,
        });
        let (status, report) = send_json(state, "POST", "/api/trends", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["totalItemsAnalyzed"], 3);
        let topics = report["topics"].as_array().unwrap();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0]["topic"], "frontend");
        assert_eq!(topics[0]["recentCount"], 2);
    }

    #[tokio::test]
    async fn test_zero_window_rejected() {
        let (state, _dir) = test_state();
        let (status, body) = send_json(state, "GET", "/api/trends?windowDays=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_huge_window_is_served() {
        let (state, _dir) = test_state();
        state.store.add_inbox_entry("kubernetes operators", None).unwrap();
        let (status, body) =
            send_json(state.clone(), "GET", "/api/trends?windowDays=100000000", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["windowDays"], 100_000_000);
        assert_eq!(body["totalItemsAnalyzed"], 1);

        let (status, body) = send_json(
            state,
            "POST",
            "/api/trends",
            Some(serde_json::json!({
                "items": [{"createdAt": days_ago(1), "tags": ["ia"]}],
                "windowDays": u32::MAX,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["topics"][0]["topic"], "ia");
    }

    #[tokio::test]
    async fn test_enrich_with_provider() {
        let (state, _dir) = test_state();
        state.store.add_inbox_entry("kubernetes operators", None).unwrap();
        let state = Arc::new(
            Arc::try_unwrap(state)
                .ok()
                .unwrap()
                .with_insights(Arc::new(FixedInsights)),
        );

        let (_, body) = send_json(state.clone(), "GET", "/api/trends?enrich=true", None).await;
        assert_eq!(body["insights"], serde_json::json!(["AI insight"]));
        let topics = body["topics"].as_array().unwrap();
        assert!(topics.iter().all(|t| t["label"].as_str().unwrap().starts_with("Label ")));

        let (_, plain) = send_json(state, "GET", "/api/trends", None).await;
        assert!(plain["topics"][0].get("label").is_none());
    }

    #[tokio::test]
    async fn test_enrich_failure_falls_back() {
        let (state, _dir) = test_state();
        state.store.add_inbox_entry("kubernetes operators", None).unwrap();
        let state = Arc::new(
            Arc::try_unwrap(state)
                .ok()
                .unwrap()
                .with_insights(Arc::new(FailingInsights)),
        );
        let (status, body) = send_json(state, "GET", "/api/trends?enrich=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_ne!(body["insights"][0], "AI insight");
        assert!(body["topics"][0].get("label").is_none());
    }

    #[tokio::test]
    async fn test_insights_request_and_manual_enrich() {
        let (state, _dir) = test_state();
        state.store.add_inbox_entry("llama quantization notes", None).unwrap();

        let (status, req) =
            send_json(state.clone(), "GET", "/api/trends/insights-request", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(req["windowDays"], 14);
        assert_eq!(req["items"].as_array().unwrap().len(), 1);
        assert!(req["topics"].as_array().unwrap().iter().any(|t| t["topic"] == "ia"));

        let body = serde_json::json!({
            "insights": {
                "topicLabels": {"ia": "Artificial intelligence"},
                "recommendations": ["a", "b", "c", "d"],
            }
        });
        let (status, report) = send_json(state, "POST", "/api/trends/enrich", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        let ia = report["topics"]
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["topic"] == "ia")
            .unwrap()
            .clone();
        assert_eq!(ia["label"], "Artificial intelligence");
        assert_eq!(report["recommendations"].as_array().unwrap().len(), 3);
    }
}
