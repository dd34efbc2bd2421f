//! In-memory store implementation.
//!
//! # Features
//!
//! - Thread-safe with `Arc<RwLock<...>>`
//! - One lock acquisition per operation, including the atomic `modify`
//! - Records are cloned in and out, so callers never hold a reference into
//!   the store

use std::collections::HashMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::domain::{Timestamp, Todo, TodoId, TodoPatch};
use crate::infrastructure::{StoreError, TodoStore};

// =============================================================================
// In-Memory Todo Store
// =============================================================================

/// In-memory implementation of `TodoStore`.
///
/// Cloning the store yields another handle to the same records.
///
/// # Example
///
/// ```ignore
/// use todo_service::infrastructure::InMemoryTodoStore;
///
/// let store = InMemoryTodoStore::new();
/// let todo = Todo::new(TodoId::generate(), "Buy milk", Timestamp::now());
///
/// store.create(todo.clone()).await;
/// let found = store.get(&todo.id).await;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoStore {
    todos: Arc<RwLock<HashMap<TodoId, Todo>>>,
}

impl InMemoryTodoStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Checks the invariants a merged record must satisfy before it is stored.
fn check_merged(id: &TodoId, merged: &Todo) -> Result<(), StoreError> {
    if &merged.id != id {
        return Err(StoreError::Inconsistent {
            id: id.clone(),
            reason: format!("merged record carries id {}", merged.id),
        });
    }
    if !merged.has_consistent_timestamps() {
        return Err(StoreError::Inconsistent {
            id: id.clone(),
            reason: "updated_at precedes created_at".to_string(),
        });
    }
    Ok(())
}

#[allow(clippy::significant_drop_tightening)]
impl TodoStore for InMemoryTodoStore {
    fn get_all(&self) -> BoxFuture<'static, Vec<Todo>> {
        let todos = Arc::clone(&self.todos);
        async move {
            let guard = todos.read().await;
            let mut snapshot: Vec<Todo> = guard.values().cloned().collect();
            drop(guard);

            snapshot.sort_by(|left, right| {
                left.created_at
                    .cmp(&right.created_at)
                    .then_with(|| left.id.cmp(&right.id))
            });
            snapshot
        }
        .boxed()
    }

    fn get(&self, id: &TodoId) -> BoxFuture<'static, Option<Todo>> {
        let todos = Arc::clone(&self.todos);
        let id = id.clone();
        async move {
            let guard = todos.read().await;
            guard.get(&id).cloned()
        }
        .boxed()
    }

    fn create(&self, todo: Todo) -> BoxFuture<'static, ()> {
        let todos = Arc::clone(&self.todos);
        async move {
            let mut guard = todos.write().await;
            let id = todo.id.clone();
            if guard.insert(id.clone(), todo).is_some() {
                tracing::debug!(todo_id = %id, "Replaced existing todo on create");
            }
        }
        .boxed()
    }

    fn update(&self, id: &TodoId, todo: Todo) -> BoxFuture<'static, bool> {
        let todos = Arc::clone(&self.todos);
        let id = id.clone();
        async move {
            let mut guard = todos.write().await;
            match guard.get_mut(&id) {
                Some(slot) => {
                    *slot = todo;
                    true
                }
                None => false,
            }
        }
        .boxed()
    }

    fn delete(&self, id: &TodoId) -> BoxFuture<'static, bool> {
        let todos = Arc::clone(&self.todos);
        let id = id.clone();
        async move {
            let mut guard = todos.write().await;
            guard.remove(&id).is_some()
        }
        .boxed()
    }

    fn modify(
        &self,
        id: &TodoId,
        patch: TodoPatch,
        now: Timestamp,
    ) -> BoxFuture<'static, Result<Option<Todo>, StoreError>> {
        let todos = Arc::clone(&self.todos);
        let id = id.clone();
        async move {
            let mut guard = todos.write().await;
            let Some(slot) = guard.get_mut(&id) else {
                return Ok(None);
            };

            let merged = slot.clone().apply(&patch, now);
            check_merged(&id, &merged).map(|()| {
                *slot = merged.clone();
                Some(merged)
            })
        }
        .boxed()
    }

    fn count(&self) -> BoxFuture<'static, usize> {
        let todos = Arc::clone(&self.todos);
        async move { todos.read().await.len() }.boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
