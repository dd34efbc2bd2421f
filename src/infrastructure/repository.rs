//! Store trait for todo records.
//!
//! Every method returns a boxed future so the store can be shared as
//! `Arc<dyn TodoStore>` across request handlers.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Timestamp, Todo, TodoId, TodoPatch};

// =============================================================================
// Store Error
// =============================================================================

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A write would have broken a store invariant and was rejected.
    #[error("Inconsistent record for {id}: {reason}")]
    Inconsistent { id: TodoId, reason: String },
}

// =============================================================================
// Todo Store
// =============================================================================

/// Keyed collection of todo records.
///
/// Implementations must be safe to call concurrently. Readers must never
/// observe a partially applied write.
pub trait TodoStore: Send + Sync {
    /// Returns a snapshot of every record.
    ///
    /// Records are ordered by `created_at`, ties broken by `id`.
    fn get_all(&self) -> BoxFuture<'static, Vec<Todo>>;

    /// Finds a record by its exact id.
    ///
    /// Absence is reported as `None`, never as an error.
    fn get(&self, id: &TodoId) -> BoxFuture<'static, Option<Todo>>;

    /// Inserts a record keyed by its id.
    ///
    /// A record already stored under the same id is replaced.
    fn create(&self, todo: Todo) -> BoxFuture<'static, ()>;

    /// Replaces the whole record stored under `id`.
    ///
    /// Returns `false` without changing anything when `id` is absent.
    fn update(&self, id: &TodoId, todo: Todo) -> BoxFuture<'static, bool>;

    /// Removes the record stored under `id`.
    ///
    /// Returns `false` when `id` is absent.
    fn delete(&self, id: &TodoId) -> BoxFuture<'static, bool>;

    /// Merges `patch` into the record stored under `id` as one atomic step.
    ///
    /// Returns `Ok(None)` when `id` is absent and `Ok(Some(merged))` once the
    /// merged record is stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Inconsistent` if the merged record breaks a store
    /// invariant. Nothing is written in that case.
    fn modify(
        &self,
        id: &TodoId,
        patch: TodoPatch,
        now: Timestamp,
    ) -> BoxFuture<'static, Result<Option<Todo>, StoreError>>;

    /// Counts all records.
    fn count(&self) -> BoxFuture<'static, usize>;
}

// =============================================================================
// Tests
// =============================================================================
