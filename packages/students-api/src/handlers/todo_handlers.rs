//! Todo list handlers.

use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use students_core::{StoreError, Todo};

use crate::router::{AppState, RouterError};

use super::request_utils::{
    call_store, call_store_with_timeout, decode_json_body, json_response,
    map_store_error_to_router_error, read_request_body_with_timeout,
};

const TODO_NOT_FOUND: &str = "todo not found";

fn map_todo_error(e: StoreError) -> RouterError {
    if e.is_not_found() {
        RouterError::NotFound(TODO_NOT_FOUND.to_string())
    } else {
        map_store_error_to_router_error(e)
    }
}

/// Lists every todo.
///
/// # Endpoint
/// `GET /todos`
///
/// # Response
/// - **200 OK**: Array of items in insertion order
/// ```json
/// [
///   {"id": "1", "task": "Learn Go", "completed": true}
/// ]
/// ```
///
/// # Errors
/// - **500 Internal Server Error**: Store failure or store timeout
pub async fn list_todos(state: AppState) -> Result<Response<Bytes>, RouterError> {
    let store = Arc::clone(&state.todos);
    let todos = call_store_with_timeout(
        move || store.list_todos(),
        state.config.response_timeout_ms,
    )
    .await?
    .map_err(map_todo_error)?;
    json_response(200, &todos)
}

/// Reads one todo.
///
/// # Endpoint
/// `GET /todos/{id}`
///
/// # Response
/// - **200 OK**: The item
///
/// # Errors
/// - **404 Not Found**: No todo with that id
/// - **500 Internal Server Error**: Store failure or store timeout
///
/// # Example
/// ```bash
/// curl http://localhost:8082/todos/2
/// ```
pub async fn get_todo(id: &str, state: AppState) -> Result<Response<Bytes>, RouterError> {
    let store = Arc::clone(&state.todos);
    let id = id.to_string();
    let todo = call_store_with_timeout(
        move || store.get_todo(&id),
        state.config.response_timeout_ms,
    )
    .await?
    .map_err(map_todo_error)?;
    json_response(200, &todo)
}

/// Toggles a todo's completion flag.
///
/// # Endpoint
/// `PATCH /todos/{id}`
///
/// # Response
/// - **200 OK**: The item after `completed` was flipped
///
/// # Errors
/// - **404 Not Found**: No todo with that id
/// - **500 Internal Server Error**: Store failure
///
/// # Example
/// ```bash
/// curl -X PATCH http://localhost:8082/todos/2
/// ```
pub async fn toggle_todo(id: &str, state: AppState) -> Result<Response<Bytes>, RouterError> {
    let store = Arc::clone(&state.todos);
    let id = id.to_string();
    let todo = call_store(move || store.toggle_todo(&id))
        .await?
        .map_err(map_todo_error)?;
    json_response(200, &todo)
}

/// Appends a todo.
///
/// # Endpoint
/// `POST /todos`
///
/// # Request Body
/// ```json
/// {
///   "id": "4",
///   "task": "Write docs",
///   "completed": false
/// }
/// ```
///
/// # Response
/// - **201 Created**: The item as stored
///
/// # Errors
/// - **400 Bad Request**: Empty body or malformed JSON
/// - **500 Internal Server Error**: Store failure
///
/// # Notes
/// - Ids are taken from the client as given; duplicates are not rejected
pub async fn add_todo<B>(
    req: Request<B>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let todo: Todo = decode_json_body(&body_bytes)?;

    let store = Arc::clone(&state.todos);
    let todo = call_store(move || store.add_todo(todo))
        .await?
        .map_err(map_todo_error)?;
    json_response(201, &todo)
}
