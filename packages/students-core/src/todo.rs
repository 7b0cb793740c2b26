//! Todo items and their in-memory store.

use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A todo item. Ids are client-supplied strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Todo {
    pub id: String,
    pub task: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(id: impl Into<String>, task: impl Into<String>, completed: bool) -> Self {
        Self {
            id: id.into(),
            task: task.into(),
            completed,
        }
    }
}

/// Storage capability for todo items.
pub trait TodoStore: Send + Sync {
    /// Returns every item in insertion order.
    fn list_todos(&self) -> Result<Vec<Todo>, StoreError>;

    /// Returns the first item with `id`.
    fn get_todo(&self, id: &str) -> Result<Todo, StoreError>;

    /// Appends an item and returns it unchanged.
    fn add_todo(&self, todo: Todo) -> Result<Todo, StoreError>;

    /// Flips `completed` on the first item with `id` and returns the result.
    fn toggle_todo(&self, id: &str) -> Result<Todo, StoreError>;
}

/// Mutex-guarded todo list.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    todos: Mutex<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the three demo items.
    pub fn with_seed_data() -> Self {
        Self::from_todos(vec![
            Todo::new("1", "Learn Go", true),
            Todo::new("2", "Build a REST API", false),
            Todo::new("3", "Test the API", false),
        ])
    }

    pub fn from_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Mutex::new(todos),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Todo>>, StoreError> {
        self.todos.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl TodoStore for MemoryTodoStore {
    fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn get_todo(&self, id: &str) -> Result<Todo, StoreError> {
        self.lock()?
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::todo_not_found(id))
    }

    fn add_todo(&self, todo: Todo) -> Result<Todo, StoreError> {
        self.lock()?.push(todo.clone());
        Ok(todo)
    }

    fn toggle_todo(&self, id: &str) -> Result<Todo, StoreError> {
        // Lookup and flip happen under one guard.
        let mut todos = self.lock()?;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::todo_not_found(id))?;
        todo.completed = !todo.completed;
        Ok(todo.clone())
    }
}
