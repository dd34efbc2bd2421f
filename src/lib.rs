//! Todo Service Library
//!
//! An HTTP service exposing create, read, update and delete operations over
//! an in-memory collection of todo records.

pub mod api;
pub mod domain;
pub mod infrastructure;
