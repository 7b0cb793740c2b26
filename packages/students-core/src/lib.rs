//! Core of the students service.
//!
//! Provides the student and todo domain types, request validation,
//! the storage capabilities with their SQLite and in-memory backends,
//! and configuration loading.

pub mod config;
pub mod error;
pub mod storage;
pub mod student;
pub mod todo;
pub mod validation;

pub use error::StoreError;
pub use storage::{MemoryStore, SqliteStore, StudentStore};
pub use student::{NewStudent, Student};
pub use todo::{MemoryTodoStore, Todo, TodoStore};
