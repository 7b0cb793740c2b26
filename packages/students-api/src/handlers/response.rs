//! Response envelope types and helpers for HTTP endpoints.

use std::collections::BTreeMap;

use serde::Serialize;
use students_core::validation::FieldViolation;

/// Status marker carried by success envelopes
pub const STATUS_OK: &str = "OK";
/// Status marker carried by error envelopes
pub const STATUS_ERROR: &str = "Error";

/// Body of a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Always "OK"
    pub status: &'static str,
    /// Store-assigned id
    pub id: i64,
}

/// Error envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always "Error"
    pub status: &'static str,
    /// General error message
    pub error: String,
    /// Per-field reasons, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, String>>,
}

/// Helper to create the create-success body
pub fn created_response(id: i64) -> CreatedResponse {
    CreatedResponse {
        status: STATUS_OK,
        id,
    }
}

/// Helper to create a general error body
pub fn error_response(message: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
        status: STATUS_ERROR,
        error: message.into(),
        fields: None,
    }
}

/// Helper to create a validation error body.
///
/// When a field is reported twice the first reason is kept.
pub fn validation_error_response(violations: &[FieldViolation]) -> ErrorResponse {
    let mut fields = BTreeMap::new();
    for violation in violations {
        fields
            .entry(violation.field.to_string())
            .or_insert_with(|| violation.reason.clone());
    }
    ErrorResponse {
        status: STATUS_ERROR,
        error: "validation failed".to_string(),
        fields: Some(fields),
    }
}
