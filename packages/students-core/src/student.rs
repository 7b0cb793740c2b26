//! Student domain types.

use serde::{Deserialize, Serialize};

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Store-assigned identifier
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Untrusted create payload as decoded from a request body.
///
/// Every field defaults when absent so that missing values are reported
/// by the validator as field violations instead of failing the decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    /// Attaches a store-assigned id.
    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}
