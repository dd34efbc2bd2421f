//! HTTP handlers for the Todo API.
//!
//! Handlers are stateless: every request re-reads from the injected store
//! and never keeps a record past its own response.
//!
//! # Endpoints
//!
//! - `GET /todos` - List all todos
//! - `GET /todos/{id}` - Fetch one todo
//! - `POST /todos` - Create a todo
//! - `PUT /todos/{id}` - Partially update a todo
//! - `DELETE /todos/{id}` - Delete a todo
//! - `GET /health` - Liveness probe

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

use super::dto::{
    CreateTodoRequest, MessageResponse, TODO_CREATED, TODO_DELETED, TODO_UPDATED, TodoEnvelope,
    TodoListResponse, TodoResponse, UpdateTodoRequest,
};
use super::error::ApiErrorResponse;
use super::status_emoji::Operation;
use crate::domain::{Timestamp, Todo, TodoId, TodoPatch};
use crate::infrastructure::{InMemoryTodoStore, TodoStore};

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// The store is injected at startup so tests can build isolated instances.
#[derive(Clone)]
pub struct AppState {
    /// Todo store shared by every handler.
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    /// Creates a new `AppState` around the given store.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Creates a new `AppState` backed by an empty in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTodoStore::new()))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppState")
            .field("store", &"Arc<dyn TodoStore>")
            .finish()
    }
}

/// Extracts the todo id from a path, mapping undecodable ids to 404.
fn path_todo_id(
    operation: Operation,
    path: Result<Path<String>, PathRejection>,
) -> Result<TodoId, ApiErrorResponse> {
    path.map(|Path(id)| TodoId::from(id))
        .map_err(|rejection| ApiErrorResponse::from_path_rejection(operation, &rejection))
}

// =============================================================================
// GET /todos
// =============================================================================

/// Lists every todo.
///
/// # Response
///
/// - **200 OK**: `{"todos": [...], "status_emoji": "..."}`
pub async fn list_todos(State(state): State<AppState>) -> Json<TodoListResponse> {
    let todos = state.store.get_all().await;
    Json(TodoListResponse::new(
        todos.iter().map(TodoResponse::from).collect(),
    ))
}

// =============================================================================
// GET /todos/{id}
// =============================================================================

/// Fetches a single todo.
///
/// # Response
///
/// - **200 OK**: `{"todo": {...}, "status_emoji": "..."}`
/// - **404 Not Found**: No todo with that id
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 404 when the id is unknown.
pub async fn get_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<TodoEnvelope>, ApiErrorResponse> {
    let id = path_todo_id(Operation::Get, path)?;

    let todo = state.store.get(&id).await.ok_or_else(|| {
        tracing::debug!(todo_id = %id, "Todo not found");
        ApiErrorResponse::not_found(Operation::Get)
    })?;

    Ok(Json(TodoEnvelope::new(
        Operation::Get,
        None,
        TodoResponse::from(todo),
    )))
}

// =============================================================================
// POST /todos
// =============================================================================

/// Creates a new todo.
///
/// # Request Body
///
/// ```json
/// { "title": "Buy milk" }
/// ```
///
/// # Response
///
/// - **201 Created**: `{"message": "Todo created", "todo": {...}, "status_emoji": "..."}`
/// - **400 Bad Request**: Body is not valid JSON of the expected shape
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 400 when the body cannot be decoded.
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoEnvelope>), ApiErrorResponse> {
    let Json(request) = payload
        .map_err(|rejection| ApiErrorResponse::from_rejection(Operation::Create, &rejection))?;

    let todo = build_todo(TodoId::generate(), request, Timestamp::now());
    let response = TodoResponse::from(&todo);

    state.store.create(todo).await;
    tracing::info!(todo_id = %response.id, "Todo created");

    Ok((
        StatusCode::CREATED,
        Json(TodoEnvelope::new(
            Operation::Create,
            Some(TODO_CREATED),
            response,
        )),
    ))
}

/// Builds a new todo from a create request.
///
/// This is a pure function; the id and timestamp are generated by the caller.
fn build_todo(id: TodoId, request: CreateTodoRequest, now: Timestamp) -> Todo {
    Todo::new(id, request.title, now)
}

// =============================================================================
// PUT /todos/{id}
// =============================================================================

/// Partially updates a todo.
///
/// Only the fields present in the body are changed; `updated_at` is always
/// refreshed. The merge runs as a single store operation, so concurrent
/// updates to the same todo cannot overwrite each other's fields.
///
/// # Request Body
///
/// ```json
/// { "title": "New title", "completed": true }
/// ```
///
/// # Response
///
/// - **200 OK**: `{"message": "Todo updated", "todo": {...}, "status_emoji": "..."}`
/// - **400 Bad Request**: Body is not valid JSON of the expected shape
/// - **404 Not Found**: No todo with that id
/// - **500 Internal Server Error**: The store rejected the merged record
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] in the cases listed above.
pub async fn update_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoEnvelope>, ApiErrorResponse> {
    let id = path_todo_id(Operation::Update, path)?;
    let Json(request) = payload
        .map_err(|rejection| ApiErrorResponse::from_rejection(Operation::Update, &rejection))?;
    let patch = TodoPatch::from(request);
    if patch.is_empty() {
        tracing::debug!(todo_id = %id, "Empty update; only updated_at changes");
    }

    let updated = state
        .store
        .modify(&id, patch, Timestamp::now())
        .await?
        .ok_or_else(|| {
            tracing::debug!(todo_id = %id, "Todo not found");
            ApiErrorResponse::not_found(Operation::Update)
        })?;

    tracing::info!(todo_id = %id, completed = updated.completed, "Todo updated");

    Ok(Json(TodoEnvelope::new(
        Operation::Update,
        Some(TODO_UPDATED),
        TodoResponse::from(updated),
    )))
}

// =============================================================================
// DELETE /todos/{id}
// =============================================================================

/// Deletes a todo.
///
/// # Response
///
/// - **200 OK**: `{"message": "Todo deleted", "status_emoji": "..."}`
/// - **404 Not Found**: No todo with that id
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] with 404 when the id is unknown.
pub async fn delete_todo(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    let id = path_todo_id(Operation::Delete, path)?;

    if !state.store.delete(&id).await {
        tracing::debug!(todo_id = %id, "Todo not found");
        return Err(ApiErrorResponse::not_found(Operation::Delete));
    }

    tracing::info!(todo_id = %id, "Todo deleted");
    Ok(Json(MessageResponse::new(Operation::Delete, TODO_DELETED)))
}

// =============================================================================
// GET /health
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check endpoint.
///
/// ```json
/// { "status": "healthy", "version": "0.1.0" }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    async fn state_with(todos: &[Todo]) -> AppState {
        let state = AppState::in_memory();
        for todo in todos {
            state.store.create(todo.clone()).await;
        }
        state
    }

    fn existing_todo() -> Todo {
        Todo::new(TodoId::from("todo-1"), "A", Timestamp::now())
    }

    #[rstest]
    fn test_build_todo() {
        let now = Timestamp::now();
        let request = CreateTodoRequest {
            title: "Buy milk".to_string(),
        };

        let todo = build_todo(TodoId::from("todo-1"), request, now);

        assert_eq!(todo.id, TodoId::from("todo-1"));
        assert_eq!(todo.title, "Buy milk");
        assert!(!todo.completed);
        assert_eq!(todo.created_at, now);
        assert_eq!(todo.updated_at, now);
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_todos_empty() {
        let Json(response) = list_todos(State(AppState::in_memory())).await;
        assert!(response.todos.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_todo_stores_record() {
        let state = AppState::in_memory();
        let request = CreateTodoRequest {
            title: "Buy milk".to_string(),
        };

        let (status, Json(response)) = create_todo(State(state.clone()), Ok(Json(request)))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.message, Some("Todo created"));
        assert!(!response.todo.id.is_empty());
        assert_eq!(state.store.count().await, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_get_todo_not_found() {
        let error = get_todo(State(AppState::in_memory()), Ok(Path("missing".to_string())))
            .await
            .unwrap_err();

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_todo_only_completed() {
        let state = state_with(&[existing_todo()]).await;
        let request = UpdateTodoRequest {
            title: None,
            completed: Some(true),
        };

        let Json(response) = update_todo(
            State(state),
            Ok(Path("todo-1".to_string())),
            Ok(Json(request)),
        )
        .await
        .unwrap();

        assert_eq!(response.todo.title, "A");
        assert!(response.todo.completed);
        assert_eq!(response.message, Some("Todo updated"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_todo_not_found() {
        let error = update_todo(
            State(AppState::in_memory()),
            Ok(Path("missing".to_string())),
            Ok(Json(UpdateTodoRequest::default())),
        )
        .await
        .unwrap_err();

        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.operation, Operation::Update);
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_todo_twice() {
        let state = state_with(&[existing_todo()]).await;

        let first = delete_todo(State(state.clone()), Ok(Path("todo-1".to_string()))).await;
        let second = delete_todo(State(state), Ok(Path("todo-1".to_string()))).await;

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err().status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn test_health_check() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }
}
