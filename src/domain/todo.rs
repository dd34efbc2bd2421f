//! Todo domain model.
//!
//! This module contains the todo record, its value objects, and the pure
//! partial-update merge used by the update endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a todo.
///
/// Identifiers are opaque strings. Newly created todos receive a random
/// UUID (v4), but lookups accept any string so that unknown ids resolve to
/// "not found" rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Creates a `TodoId` from an existing string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Generates a new `TodoId` from a random UUID (v4).
    ///
    /// **Note**: This is an impure function (side effect: random number generation).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<String> for TodoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TodoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A timestamp wrapper for `DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the current time as a `Timestamp`.
    ///
    /// **Note**: This is an impure function (side effect: system clock).
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Formats the timestamp as RFC 3339 with a `Z` suffix.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.to_rfc3339())
    }
}

// =============================================================================
// Todo
// =============================================================================

/// A single to-do item.
///
/// # Invariants
///
/// - `id` never changes after creation.
/// - `created_at <= updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    /// Unique identifier.
    pub id: TodoId,
    /// Title of the todo.
    pub title: String,
    /// Whether the todo has been completed.
    pub completed: bool,
    /// Timestamp when the todo was created.
    pub created_at: Timestamp,
    /// Timestamp of the last successful mutation.
    pub updated_at: Timestamp,
}

impl Todo {
    /// Creates a new, uncompleted todo.
    ///
    /// This is a pure function. Use `TodoId::generate()` and `Timestamp::now()`
    /// at the call site to obtain the impure inputs.
    #[must_use]
    pub fn new(id: TodoId, title: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Applies a partial update, producing the merged record.
    ///
    /// Only the fields present in `patch` are overwritten. `id` and
    /// `created_at` are kept. `updated_at` becomes `now`, clamped so it never
    /// precedes `created_at` when the clock moves backwards.
    #[must_use]
    pub fn apply(self, patch: &TodoPatch, now: Timestamp) -> Self {
        let title = patch.title.clone().unwrap_or(self.title);
        let completed = patch.completed.unwrap_or(self.completed);
        let updated_at = now.max(self.created_at);

        Self {
            title,
            completed,
            updated_at,
            ..self
        }
    }

    /// Returns `true` when the timestamps are ordered correctly.
    #[must_use]
    pub fn has_consistent_timestamps(&self) -> bool {
        self.created_at <= self.updated_at
    }
}

// =============================================================================
// TodoPatch
// =============================================================================

/// A partial update to a todo.
///
/// Absent fields leave the corresponding value of the record untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// New title, if any.
    pub title: Option<String>,
    /// New completion flag, if any.
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Returns `true` if the patch changes no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================
