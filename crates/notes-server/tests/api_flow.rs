use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use notes_core::crypto::fingerprint;
use notes_core::storage::{NewNote, Note, NoteFilter, NoteStore, NoteSummary, SqliteNoteStore};
use notes_core::{NoteService, NotesError, Result};
use notes_server::constants::defaults;
use notes_server::http::router;

fn app_with<S: NoteStore + 'static>(store: S) -> Router {
    router(
        Arc::new(NoteService::new(store)),
        defaults::MAX_BODY_BYTES,
        tracing::Level::DEBUG,
    )
}

fn app() -> Router {
    app_with(SqliteNoteStore::open_in_memory().expect("in-memory store"))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let request = builder.body(body).expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

/// Store whose backend is unreachable.
struct DownStore;

#[async_trait]
impl NoteStore for DownStore {
    async fn insert(&self, _note: NewNote) -> Result<NoteSummary> {
        Err(NotesError::Storage("connection refused".to_string()))
    }

    async fn get(&self, _id: i64) -> Result<Option<Note>> {
        Err(NotesError::Storage("connection refused".to_string()))
    }

    async fn scan(&self, _filter: &NoteFilter) -> Result<Vec<NoteSummary>> {
        Err(NotesError::Storage("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<()> {
        Err(NotesError::Storage("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_message_and_health() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/message", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Secret Notes API - Ready for encryption!");

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_then_decrypt() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"content": "hello", "key": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["message"], "Note encrypted and stored successfully");
    assert!(body["created_at"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes/1/decrypt",
        Some(json!({"key": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "hello");
    assert_eq!(body["message"], "Note decrypted successfully");
}

#[tokio::test]
async fn test_passphrase_alias_accepted() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"content": "hello", "passphrase": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes/1/decrypt",
        Some(json!({"passphrase": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "hello");
}

#[tokio::test]
async fn test_wrong_key_and_missing_note() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"content": "hello", "key": "abc"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes/1/decrypt",
        Some(json!({"key": "xyz"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid decryption key");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes/999/decrypt",
        Some(json!({"key": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Note not found");
}

#[tokio::test]
async fn test_missing_fields_rejected() {
    let app = app();

    for body in [
        json!({"content": "", "key": "abc"}),
        json!({"content": "hello", "key": ""}),
        json!({"content": "hello"}),
        json!({}),
    ] {
        let (status, body) = send(&app, Method::POST, "/api/notes", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Content and key are required");
    }

    let (status, body) = send(&app, Method::POST, "/api/notes/1/decrypt", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Decryption key is required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes/abc/decrypt",
        Some(json!({"key": "k"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid note id");
}

#[tokio::test]
async fn test_invalid_json_rejected() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/notes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let app = router(
        Arc::new(NoteService::new(
            SqliteNoteStore::open_in_memory().expect("in-memory store"),
        )),
        1024,
        tracing::Level::DEBUG,
    );
    let big = "x".repeat(4 * 1024);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"content": big, "key": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "Request body too large");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/notes/1/decrypt",
        Some(json!({"key": big})),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    // Under the limit still works.
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"content": "small", "key": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_hides_secrets_and_filters_owner() {
    let app = app();
    for (content, owner) in [("one", "alice"), ("two", "bob"), ("three", "alice")] {
        send(
            &app,
            Method::POST,
            "/api/notes",
            Some(json!({"content": content, "key": "k", "owner": owner})),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    let notes = body["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 3);
    assert_eq!(notes[0]["id"], 3);
    for note in notes {
        let fields = note.as_object().unwrap();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("id"));
        assert!(fields.contains_key("created_at"));
    }

    let (_, body) = send(&app, Method::GET, "/api/notes?owner=alice", None).await;
    let ids: Vec<i64> = body["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 1]);

    let (_, body) = send(&app, Method::GET, "/api/notes?limit=1", None).await;
    assert_eq!(body["notes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_corrupt_note_is_server_error() {
    let store = SqliteNoteStore::open_in_memory().unwrap();
    store
        .insert(NewNote::new("not-a-blob", fingerprint("abc")))
        .await
        .unwrap();
    let app = app_with(store);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes/1/decrypt",
        Some(json!({"key": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Stored note is corrupted");
}

#[tokio::test]
async fn test_store_outage_is_unavailable() {
    let app = app_with(DownStore);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes",
        Some(json!({"content": "hello", "key": "abc"})),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Storage unavailable");

    let (status, _) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not found");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/message")
        .header(header::ORIGIN, "http://example.test")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
