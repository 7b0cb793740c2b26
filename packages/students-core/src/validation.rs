//! Structural validation of create payloads.
//!
//! Validation never touches a store; it only inspects the decoded
//! candidate and reports every violated field.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::student::NewStudent;

/// HTML5 "valid e-mail address" production.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// A single validation failure tied to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Field name as it appears in the JSON payload
    pub field: &'static str,
    /// Human-readable reason
    pub reason: String,
}

impl FieldViolation {
    fn required(field: &'static str) -> Self {
        Self {
            field,
            reason: format!("field {} is a required field", field),
        }
    }
}

/// Outcome of validating a candidate record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    violations: Vec<FieldViolation>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Converts into `Ok(())` or the collected violations.
    pub fn into_result(self) -> Result<(), Vec<FieldViolation>> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self.violations)
        }
    }

    fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }
}

/// Returns true when `email` matches standard address syntax.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validates a decoded student candidate.
///
/// `name` must be non-empty and `email` must be present and well-formed.
/// `age` is accepted as given.
pub fn validate_student(candidate: &NewStudent) -> Validation {
    let mut validation = Validation::default();

    if candidate.name.is_empty() {
        validation.push(FieldViolation::required("name"));
    }

    if candidate.email.is_empty() {
        validation.push(FieldViolation::required("email"));
    } else if !is_valid_email(&candidate.email) {
        validation.push(FieldViolation {
            field: "email",
            reason: "field email must be a valid email address".to_string(),
        });
    }

    validation
}
