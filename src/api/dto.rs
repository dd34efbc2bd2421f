//! Data Transfer Objects for API requests and responses.
//!
//! This module contains DTOs that are separate from domain models,
//! providing a clean API contract.

use serde::{Deserialize, Serialize};

use super::status_emoji::{Operation, Outcome, status_emoji};
use crate::domain::{Todo, TodoPatch};

/// Message returned after a successful create.
pub const TODO_CREATED: &str = "Todo created";
/// Message returned after a successful update.
pub const TODO_UPDATED: &str = "Todo updated";
/// Message returned after a successful delete.
pub const TODO_DELETED: &str = "Todo deleted";

// =============================================================================
// Request DTOs
// =============================================================================

/// Request DTO for creating a new todo.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    /// Title of the todo. An empty string is accepted.
    pub title: String,
}

/// Request DTO for updating a todo.
///
/// Both fields are optional; an explicit `null` is treated like an absent field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    /// New title for the todo.
    #[serde(default)]
    pub title: Option<String>,
    /// New completion flag for the todo.
    #[serde(default)]
    pub completed: Option<bool>,
}

impl From<UpdateTodoRequest> for TodoPatch {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            title: request.title,
            completed: request.completed,
        }
    }
}

// =============================================================================
// Response DTOs
// =============================================================================

/// Response DTO for a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoResponse {
    /// Todo ID.
    pub id: String,
    /// Title of the todo.
    pub title: String,
    /// Whether the todo is completed.
    pub completed: bool,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last update timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: todo.title.clone(),
            completed: todo.completed,
            created_at: todo.created_at.to_rfc3339(),
            updated_at: todo.updated_at.to_rfc3339(),
        }
    }
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self::from(&todo)
    }
}

/// Response body of `GET /todos`.
#[derive(Debug, Clone, Serialize)]
pub struct TodoListResponse {
    pub todos: Vec<TodoResponse>,
    pub status_emoji: &'static str,
}

impl TodoListResponse {
    #[must_use]
    pub fn new(todos: Vec<TodoResponse>) -> Self {
        Self {
            todos,
            status_emoji: status_emoji(Operation::List, Outcome::Success),
        }
    }
}

/// Response body carrying a single todo.
///
/// `message` is omitted on plain reads.
#[derive(Debug, Clone, Serialize)]
pub struct TodoEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub todo: TodoResponse,
    pub status_emoji: &'static str,
}

impl TodoEnvelope {
    /// Builds the successful response body of `operation`.
    #[must_use]
    pub fn new(operation: Operation, message: Option<&'static str>, todo: TodoResponse) -> Self {
        Self {
            message,
            todo,
            status_emoji: status_emoji(operation, Outcome::Success),
        }
    }
}

/// Response body carrying only a message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
    pub status_emoji: &'static str,
}

impl MessageResponse {
    /// Builds the successful response body of `operation`.
    #[must_use]
    pub const fn new(operation: Operation, message: &'static str) -> Self {
        Self {
            message,
            status_emoji: status_emoji(operation, Outcome::Success),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
