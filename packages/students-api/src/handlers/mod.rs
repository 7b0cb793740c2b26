//! HTTP endpoint implementations for students and todos.

pub mod request_utils;
pub mod response;
mod student_handlers;
mod todo_handlers;

pub use student_handlers::{create_student, get_student, list_students};
pub use todo_handlers::{add_todo, get_todo, list_todos, toggle_todo};
