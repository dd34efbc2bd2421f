//! Domain module for todo management.
//!
//! This module contains the todo record and its value objects.

pub mod todo;

pub use todo::{Timestamp, Todo, TodoId, TodoPatch};
