//! API error handling.
//!
//! This module provides error types and response formatting for the API.
//! Every error body carries `message` and `status_emoji`; input errors also
//! carry the parse failure under `error`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::status_emoji::{Operation, Outcome, status_emoji};
use crate::infrastructure::StoreError;

/// Message returned for malformed request bodies.
pub const INVALID_INPUT: &str = "Invalid input";
/// Message returned for unknown ids.
pub const TODO_NOT_FOUND: &str = "Todo not found";
/// Message returned when the store rejects an update.
pub const UPDATE_FAILED: &str = "Failed to update todo";

// =============================================================================
// API Error Body
// =============================================================================

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub message: String,
    /// Underlying parse failure, for input errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Display token for the outcome.
    pub status_emoji: String,
}

// =============================================================================
// API Error Response
// =============================================================================

/// Error category of a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request body could not be decoded.
    InvalidInput(String),
    /// No todo exists under the requested id.
    NotFound,
    /// The store rejected a write it should have accepted.
    UpdateFailed,
}

impl ApiErrorKind {
    const fn outcome(&self) -> Outcome {
        match self {
            Self::InvalidInput(_) => Outcome::InvalidInput,
            Self::NotFound => Outcome::NotFound,
            Self::UpdateFailed => Outcome::Failed,
        }
    }
}

/// API error response tied to the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorResponse {
    /// The operation that failed.
    pub operation: Operation,
    /// What went wrong.
    pub kind: ApiErrorKind,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(operation: Operation, kind: ApiErrorKind) -> Self {
        Self { operation, kind }
    }

    /// Creates a 400 Bad Request response carrying the parse failure.
    #[must_use]
    pub fn invalid_input(operation: Operation, detail: impl Into<String>) -> Self {
        Self::new(operation, ApiErrorKind::InvalidInput(detail.into()))
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub const fn not_found(operation: Operation) -> Self {
        Self::new(operation, ApiErrorKind::NotFound)
    }

    /// Creates a 500 Internal Server Error response for a rejected update.
    #[must_use]
    pub const fn update_failed() -> Self {
        Self::new(Operation::Update, ApiErrorKind::UpdateFailed)
    }

    /// Converts a JSON extractor rejection into a 400 response.
    #[must_use]
    pub fn from_rejection(operation: Operation, rejection: &JsonRejection) -> Self {
        Self::invalid_input(operation, rejection.body_text())
    }

    /// Converts a path extractor rejection into a 404 response.
    ///
    /// Stored ids are always valid UTF-8, so an id that cannot be decoded
    /// names no todo.
    #[must_use]
    pub fn from_path_rejection(operation: Operation, rejection: &PathRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Undecodable todo id");
        Self::not_found(operation)
    }

    /// Returns the HTTP status code of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.kind {
            ApiErrorKind::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiErrorKind::NotFound => StatusCode::NOT_FOUND,
            ApiErrorKind::UpdateFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the JSON body of this error.
    #[must_use]
    pub fn body(&self) -> ApiError {
        let (message, error) = match &self.kind {
            ApiErrorKind::InvalidInput(detail) => (INVALID_INPUT, Some(detail.clone())),
            ApiErrorKind::NotFound => (TODO_NOT_FOUND, None),
            ApiErrorKind::UpdateFailed => (UPDATE_FAILED, None),
        };

        ApiError {
            message: message.to_string(),
            error,
            status_emoji: status_emoji(self.operation, self.kind.outcome()).to_string(),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<StoreError> for ApiErrorResponse {
    fn from(error: StoreError) -> Self {
        // Store details are logged, never sent to the client.
        tracing::error!(%error, "Store rejected update");
        Self::update_failed()
    }
}

// =============================================================================
// Tests
// =============================================================================
