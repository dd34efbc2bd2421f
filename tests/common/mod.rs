//! Common test helpers for integration tests.
//!
//! This module provides shared utilities for building routers over
//! isolated stores and for driving them with in-process requests.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{create_test_app, send};
//! ```
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use futures::FutureExt;
use futures::future::BoxFuture;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use todo_service::api::{AppState, create_router};
use todo_service::domain::{Timestamp, Todo, TodoId, TodoPatch};
use todo_service::infrastructure::{InMemoryTodoStore, StoreError, TodoStore};

// =============================================================================
// Router Creation Helpers
// =============================================================================

/// Creates a router over a fresh, empty in-memory store.
pub fn create_test_app() -> Router {
    create_router(AppState::in_memory())
}

/// Creates a router over the given store.
pub fn create_test_app_with_store(store: Arc<dyn TodoStore>) -> Router {
    create_router(AppState::new(store))
}

// =============================================================================
// Rejecting Store
// =============================================================================

/// Store whose `modify` always fails, for exercising the 500 path.
///
/// Every other operation delegates to an in-memory store.
#[derive(Debug, Clone, Default)]
pub struct RejectingStore {
    inner: InMemoryTodoStore,
}

impl RejectingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoStore for RejectingStore {
    fn get_all(&self) -> BoxFuture<'static, Vec<Todo>> {
        self.inner.get_all()
    }

    fn get(&self, id: &TodoId) -> BoxFuture<'static, Option<Todo>> {
        self.inner.get(id)
    }

    fn create(&self, todo: Todo) -> BoxFuture<'static, ()> {
        self.inner.create(todo)
    }

    fn update(&self, id: &TodoId, todo: Todo) -> BoxFuture<'static, bool> {
        self.inner.update(id, todo)
    }

    fn delete(&self, id: &TodoId) -> BoxFuture<'static, bool> {
        self.inner.delete(id)
    }

    fn modify(
        &self,
        id: &TodoId,
        _patch: TodoPatch,
        _now: Timestamp,
    ) -> BoxFuture<'static, Result<Option<Todo>, StoreError>> {
        let id = id.clone();
        async move {
            Err(StoreError::Inconsistent {
                id,
                reason: "rejected by test store".to_string(),
            })
        }
        .boxed()
    }

    fn count(&self) -> BoxFuture<'static, usize> {
        self.inner.count()
    }
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Sends a request and returns the status with the decoded JSON body.
///
/// A `Some` body is sent with `Content-Type: application/json`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

/// Sends a prepared request and returns the status with the decoded JSON body.
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Creates a todo through the API and returns its JSON representation.
pub async fn create_todo(app: &Router, title: &str) -> Value {
    let body = serde_json::json!({ "title": title }).to_string();
    let (status, json) = send(app, Method::POST, "/todos", Some(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json["todo"].clone()
}

/// Extracts the id of a todo JSON value.
pub fn todo_id(todo: &Value) -> String {
    todo["id"].as_str().unwrap().to_string()
}
