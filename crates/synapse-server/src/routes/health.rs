//! Health route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// GET /api/health — liveness plus stored item counts.
async fn get_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let inbox = state.store.load_inbox().map(|v| v.len()).unwrap_or(0);
    let notes = state.store.load_notes().map(|v| v.len()).unwrap_or(0);
    Json(serde_json::json!({
        "status": "healthy",
        "service": "synapse",
        "version": env!("CARGO_PKG_VERSION"),
        "inbox": inbox,
        "notes": notes,
        "trends": state.config.trends,
    }))
}
