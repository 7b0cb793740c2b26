//! Student record handlers.

use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use students_core::validation::validate_student;
use students_core::NewStudent;

use crate::router::{AppState, RouterError};

use super::request_utils::{
    call_store, call_store_with_timeout, decode_json_body, json_response,
    map_store_error_to_router_error, parse_id, read_request_body_with_timeout,
};
use super::response::created_response;

/// Creates a new student.
///
/// # Endpoint
/// `POST /students`
///
/// # Request Body
/// ```json
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "age": 30
/// }
/// ```
///
/// # Response
/// - **201 Created**: Returns the assigned id
/// ```json
/// {
///   "status": "OK",
///   "id": 1
/// }
/// ```
///
/// # Errors
/// - **400 Bad Request**: Empty body, malformed JSON, or field violations
/// - **500 Internal Server Error**: Store failure
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:8082/students \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Ada", "email": "ada@example.com", "age": 30}'
/// ```
pub async fn create_student<B>(
    req: Request<B>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let candidate: NewStudent = decode_json_body(&body_bytes)?;

    validate_student(&candidate)
        .into_result()
        .map_err(RouterError::Validation)?;

    let store = Arc::clone(&state.students);
    // Awaited without a timeout: the insert cannot be cancelled once started.
    let id = call_store(move || {
        store.create_student(&candidate.name, &candidate.email, candidate.age)
    })
    .await?
    .map_err(|e| RouterError::InternalError(e.to_string()))?;

    tracing::info!("Created student {}", id);
    json_response(201, &created_response(id))
}

/// Reads one student.
///
/// # Endpoint
/// `GET /students/{id}`
///
/// # Response
/// - **200 OK**: The record
/// ```json
/// {
///   "id": 1,
///   "name": "Ada",
///   "email": "ada@example.com",
///   "age": 30
/// }
/// ```
///
/// # Errors
/// - **400 Bad Request**: Non-numeric id
/// - **404 Not Found**: No student with that id
/// - **500 Internal Server Error**: Store failure or store timeout
pub async fn get_student(raw_id: &str, state: AppState) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(raw_id)?;
    tracing::debug!("Getting student {}", id);

    let store = Arc::clone(&state.students);
    let student = call_store_with_timeout(
        move || store.get_student_by_id(id),
        state.config.response_timeout_ms,
    )
    .await?
    .map_err(|e| {
        if !e.is_not_found() {
            tracing::warn!("Failed to get student {}: {}", id, e);
        }
        map_store_error_to_router_error(e)
    })?;

    json_response(200, &student)
}

/// Lists every student.
///
/// # Endpoint
/// `GET /students`
///
/// # Response
/// - **200 OK**: Array of records, possibly empty
///
/// # Errors
/// - **500 Internal Server Error**: Store failure or store timeout
pub async fn list_students(state: AppState) -> Result<Response<Bytes>, RouterError> {
    let store = Arc::clone(&state.students);
    let students = call_store_with_timeout(
        move || store.get_all_students(),
        state.config.response_timeout_ms,
    )
    .await?
    .map_err(|e| RouterError::InternalError(e.to_string()))?;

    json_response(200, &students)
}
