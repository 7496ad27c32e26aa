// Durable key-value slots

use eyre::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flat key-value text storage
///
/// Each `set` fully replaces the previous value under `key`.
pub trait Slot {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile slot backed by a HashMap
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Slot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: Slot + ?Sized> Slot for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// Persistent slot backed by a single SQLite table
pub struct SqliteSlot {
    path: Option<PathBuf>,
    db: Connection,
}

impl SqliteSlot {
    /// Open or create `todostore.db` inside `dir`
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).context("Failed to create store directory")?;

        let db_path = dir.join("todostore.db");
        let db = Connection::open(&db_path).context("Failed to open SQLite database")?;

        let slot = Self {
            path: Some(db_path),
            db,
        };
        slot.create_schema()?;
        Ok(slot)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        let slot = Self { path: None, db };
        slot.create_schema()?;
        Ok(slot)
    }

    /// Database file path, or None for in-memory slots
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn create_schema(&self) -> Result<()> {
        debug!("Creating slot schema");

        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

impl Slot for SqliteSlot {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.db
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .context("Failed to read slot")
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.db
            .execute(
                "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
                rusqlite::params![key, value],
            )
            .context("Failed to write slot")?;
        debug!(key, bytes = value.len(), "Slot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_slot_get_set() {
        let mut slot = MemorySlot::new();
        assert_eq!(slot.get("tasks").unwrap(), None);

        slot.set("tasks", "[]").unwrap();
        assert_eq!(slot.get("tasks").unwrap().as_deref(), Some("[]"));

        slot.set("tasks", "[1]").unwrap();
        assert_eq!(slot.get("tasks").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_sqlite_slot_open_creates_database() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested/store");

        let slot = SqliteSlot::open(&dir).unwrap();
        assert!(dir.join("todostore.db").exists());
        assert_eq!(slot.path(), Some(dir.join("todostore.db").as_path()));
    }

    #[test]
    fn test_sqlite_slot_overwrites() {
        let mut slot = SqliteSlot::open_in_memory().unwrap();
        assert_eq!(slot.get("tasks").unwrap(), None);

        slot.set("tasks", "first").unwrap();
        slot.set("tasks", "second").unwrap();
        slot.set("other", "kept apart").unwrap();

        assert_eq!(slot.get("tasks").unwrap().as_deref(), Some("second"));
        assert_eq!(slot.get("other").unwrap().as_deref(), Some("kept apart"));
    }

    #[test]
    fn test_sqlite_slot_persists_across_opens() {
        let temp = TempDir::new().unwrap();

        {
            let mut slot = SqliteSlot::open(temp.path()).unwrap();
            slot.set("tasks", r#"[{"text":"a","completed":false}]"#).unwrap();
        }

        let slot = SqliteSlot::open(temp.path()).unwrap();
        assert_eq!(
            slot.get("tasks").unwrap().as_deref(),
            Some(r#"[{"text":"a","completed":false}]"#)
        );
    }
}
