//! REST API server for student records and todos.
//!
//! Provides HTTP endpoints for creating and reading students, the todo
//! list endpoints, request routing and the hyper server loop.

pub mod handlers;
pub mod router;
pub mod server;
