//! Request utilities for HTTP endpoints.

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use students_core::StoreError;
use tokio::time;

use crate::router::RouterError;

/// Message returned when a JSON body is required but absent
pub const EMPTY_BODY_MESSAGE: &str = "empty body not allowed";
/// Message returned when a path id is not an integer
pub const INVALID_ID_MESSAGE: &str = "invalid id format";

/// Helper function to read request body with timeout
pub async fn read_request_body_with_timeout<B>(
    req: Request<B>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.into_body().collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Decodes a JSON body, distinguishing an empty body from malformed JSON.
///
/// A body of only whitespace counts as empty.
pub fn decode_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, RouterError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RouterError::BadRequest(EMPTY_BODY_MESSAGE.to_string()));
    }
    serde_json::from_slice(body).map_err(|e| RouterError::BadRequest(e.to_string()))
}

/// Parses a path id as a signed 64-bit integer.
pub fn parse_id(raw: &str) -> Result<i64, RouterError> {
    raw.parse()
        .map_err(|_| RouterError::BadRequest(INVALID_ID_MESSAGE.to_string()))
}

/// Runs a blocking store read on the blocking pool, bounded by a timeout.
///
/// The outer error covers timeout and task failure; the inner result is
/// the store's own outcome. A store that outlives the timeout is a store
/// failure (500), not a client timeout.
pub async fn call_store_with_timeout<T, F>(
    call: F,
    timeout_ms: u64,
) -> Result<Result<T, StoreError>, RouterError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    time::timeout(timeout_duration, call_store(call))
        .await
        .map_err(|_| {
            RouterError::InternalError(format!("Store call timed out after {} ms", timeout_ms))
        })?
}

/// Runs a blocking store write on the blocking pool and waits for it.
///
/// Blocking tasks cannot be cancelled, so writes are awaited to completion
/// and the response always reflects what was persisted.
pub async fn call_store<T, F>(call: F) -> Result<Result<T, StoreError>, RouterError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| RouterError::InternalError(format!("Store task failed: {}", e)))
}

/// Map StoreError to appropriate RouterError
pub fn map_store_error_to_router_error(e: StoreError) -> RouterError {
    match e {
        StoreError::NotFound { .. } => RouterError::NotFound(e.to_string()),
        StoreError::Storage(_) | StoreError::LockPoisoned => {
            RouterError::InternalError(e.to_string())
        }
    }
}

/// Serializes `payload` as the top-level JSON body.
pub fn json_response<T: Serialize>(
    status: u16,
    payload: &T,
) -> Result<Response<Bytes>, RouterError> {
    let json = serde_json::to_vec(payload)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}
