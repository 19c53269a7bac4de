use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use notes_core::{NoteService, NoteStore};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

pub mod error;
pub mod health;
pub mod notes;

pub use error::ApiError;

const API_PREFIX: &str = "/api";

/// Build the full application router over a shared note service.
pub fn router<S: NoteStore + 'static>(
    service: Arc<NoteService<S>>,
    max_body_bytes: usize,
    log_level: tracing::Level,
) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .on_response(
            DefaultOnResponse::new()
                .include_headers(false)
                .level(log_level)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().latency_unit(LatencyUnit::Micros));

    let cors = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST])
        .allow_headers(vec![CONTENT_TYPE, ACCEPT, ORIGIN])
        .allow_origin(Any)
        .allow_credentials(false);

    let api = Router::new()
        .route("/message", get(health::message_handler))
        .route("/health", get(health::health_handler::<S>))
        .route(
            "/notes",
            get(notes::list_handler::<S>).post(notes::create_handler::<S>),
        )
        .route("/notes/:id/decrypt", post(notes::decrypt_handler::<S>));

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(service)
        .layer(cors)
        .layer(trace_layer)
}

/// Serve `router` on `listener` until `shutdown_rx` fires.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown_rx: watch::Receiver<()>,
) -> Result<(), HttpServerError> {
    let addr = listener.local_addr()?;
    tracing::info!(addr = ?addr, "API server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn not_found_handler() -> Response {
    let msg = serde_json::json!({"error": "not found"});
    (StatusCode::NOT_FOUND, Json(msg)).into_response()
}

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error("an error occurred running the HTTP server: {0}")]
    ServingFailed(#[from] std::io::Error),
}
