use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use notes_core::{NoteService, NoteStore};
use tokio::time::timeout;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn message_handler() -> Response {
    let msg = serde_json::json!({"message": "Secret Notes API - Ready for encryption!"});
    (StatusCode::OK, Json(msg)).into_response()
}

pub async fn health_handler<S: NoteStore + 'static>(
    State(service): State<Arc<NoteService<S>>>,
) -> Response {
    let timestamp = Utc::now().to_rfc3339();
    match timeout(HEALTH_CHECK_TIMEOUT, service.health()).await {
        Ok(Ok(())) => {
            let msg = serde_json::json!({
                "status": "healthy",
                "database": "connected",
                "timestamp": timestamp,
            });
            (StatusCode::OK, Json(msg)).into_response()
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "health check failed");
            unhealthy(timestamp)
        }
        Err(_) => {
            tracing::warn!("health check timed out");
            unhealthy(timestamp)
        }
    }
}

fn unhealthy(timestamp: String) -> Response {
    let msg = serde_json::json!({
        "status": "unhealthy",
        "database": "disconnected",
        "timestamp": timestamp,
    });
    (StatusCode::SERVICE_UNAVAILABLE, Json(msg)).into_response()
}
