//! Infrastructure module.
//!
//! This module contains the todo store and the process configuration.

pub mod config;
pub mod in_memory;
pub mod repository;

pub use config::{ConfigurationError, LogFormat, ServerConfig};
pub use in_memory::InMemoryTodoStore;
pub use repository::{StoreError, TodoStore};
