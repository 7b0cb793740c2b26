//! Student record storage.
//!
//! Handlers reach storage only through [`StudentStore`], so any backend
//! that can create and fetch single records can serve the API.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::student::Student;

/// Persistence capability for student records.
///
/// Implementations must be safe to share across request tasks.
pub trait StudentStore: Send + Sync {
    /// Persists a new record and returns its store-assigned id.
    fn create_student(&self, name: &str, email: &str, age: i64) -> Result<i64, StoreError>;

    /// Fetches one record, failing with [`StoreError::NotFound`] when absent.
    fn get_student_by_id(&self, id: i64) -> Result<Student, StoreError>;

    /// Fetches every record. An empty store yields an empty vector.
    fn get_all_students(&self) -> Result<Vec<Student>, StoreError>;
}
