//! HTTP route handlers.

pub mod brain;
pub mod health;
pub mod trends;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Json;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::routes())
        .merge(trends::routes())
        .merge(brain::routes())
}

/// Map a store error onto a status code and `{"error": ...}` body.
pub(crate) fn error_response(e: synapse_core::Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = match e {
        synapse_core::Error::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": e.to_string() })))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    pub fn test_state() -> (Arc<AppState>, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = synapse_core::SynapseConfig::from_lookup(dir.path(), |_| None).unwrap();
        let store = synapse_store::SqliteStore::open(&config.data_paths.db).unwrap();
        (Arc::new(AppState::new(config, store)), dir)
    }

    /// Send one request through a fresh router; returns status and body bytes.
    pub async fn send(
        state: Arc<AppState>,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                req = req.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let resp = build_router(state)
            .oneshot(req.body(body).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub async fn send_json(
        state: Arc<AppState>,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let (status, bytes) = send(state, method, uri, body).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
