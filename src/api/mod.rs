//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod status_emoji;

pub use dto::{
    CreateTodoRequest, MessageResponse, TodoEnvelope, TodoListResponse, TodoResponse,
    UpdateTodoRequest,
};
pub use error::{ApiError, ApiErrorKind, ApiErrorResponse};
pub use handlers::{
    AppState, HealthResponse, create_todo, delete_todo, get_todo, health_check, list_todos,
    update_todo,
};
pub use routes::create_router;
pub use status_emoji::{Operation, Outcome, status_emoji};
