//! In-memory student store.

use std::sync::Mutex;

use super::StudentStore;
use crate::error::StoreError;
use crate::student::Student;

#[derive(Debug)]
struct MemoryState {
    next_id: i64,
    students: Vec<Student>,
}

/// Mutex-guarded student store that lives for the process lifetime.
///
/// Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_id: 1,
                students: Vec::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StudentStore for MemoryStore {
    fn create_student(&self, name: &str, email: &str, age: i64) -> Result<i64, StoreError> {
        let mut state = self.state.lock().map_err(|_| StoreError::LockPoisoned)?;
        let id = state.next_id;
        state.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Storage("student id space exhausted".to_string()))?;
        state.students.push(Student {
            id,
            name: name.to_string(),
            email: email.to_string(),
            age,
        });
        Ok(id)
    }

    fn get_student_by_id(&self, id: i64) -> Result<Student, StoreError> {
        let state = self.state.lock().map_err(|_| StoreError::LockPoisoned)?;
        state
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::student_not_found(id))
    }

    fn get_all_students(&self) -> Result<Vec<Student>, StoreError> {
        let state = self.state.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.students.clone())
    }
}
