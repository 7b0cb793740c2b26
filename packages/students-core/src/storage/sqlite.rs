//! SQLite-backed student store.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::StudentStore;
use crate::error::StoreError;
use crate::student::Student;

/// Path that selects a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

const CREATE_STUDENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        age INTEGER
    );
"#;

/// Student store over a single shared SQLite connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    ///
    /// Missing parent directories are created. [`IN_MEMORY_PATH`] opens a
    /// private in-memory database instead.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if path == Path::new(IN_MEMORY_PATH) {
            return Self::open_in_memory();
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Storage(format!(
                        "failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(path)?;
        Self::with_connection(conn, path.to_path_buf())
    }

    /// Opens a private in-memory database with the schema in place.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, PathBuf::from(IN_MEMORY_PATH))
    }

    fn with_connection(conn: Connection, path: PathBuf) -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        };
        store.init()?;
        tracing::info!("Student store ready at {}", store.path.display());
        Ok(store)
    }

    /// Creates the `students` table when absent. Safe to call repeatedly.
    pub fn init(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute_batch(CREATE_STUDENTS_TABLE)?;
        Ok(())
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn row_to_student(row: &Row<'_>) -> rusqlite::Result<Student> {
        Ok(Student {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            age: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
        })
    }
}

impl StudentStore for SqliteStore {
    fn create_student(&self, name: &str, email: &str, age: i64) -> Result<i64, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO students (name, email, age) VALUES (?1, ?2, ?3)",
            params![name, email, age],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn get_student_by_id(&self, id: i64) -> Result<Student, StoreError> {
        let conn = self.lock()?;
        conn.query_row(
            "SELECT id, name, email, age FROM students WHERE id = ?1",
            params![id],
            Self::row_to_student,
        )
        .optional()?
        .ok_or_else(|| StoreError::student_not_found(id))
    }

    fn get_all_students(&self) -> Result<Vec<Student>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name, email, age FROM students ORDER BY id")?;
        let rows = stmt.query_map([], Self::row_to_student)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
