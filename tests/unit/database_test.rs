//! Unit tests for the Bookmark Alpha database layer (connection, migrations, key-value store).

use std::sync::Arc;

use bookmark_alpha::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use bookmark_alpha::database::{Database, KeyValueStore, SqliteKeyValueStore};
use tempfile::TempDir;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_local_storage_table() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='local_storage'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(exists, "local_storage should exist after migrations");
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_reopening_file_database_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookmarks.db");

    Database::open(&path).expect("first open");
    let db = Database::open(&path).expect("second open");

    let rows: i32 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1, "each migration is recorded once");
}

#[test]
fn test_values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bookmarks.db");

    {
        let mut store = SqliteKeyValueStore::new(Arc::new(Database::open(&path).unwrap()));
        store.set("bookmarkAlpha", "[]").unwrap();
    }

    let store = SqliteKeyValueStore::new(Arc::new(Database::open(&path).unwrap()));
    assert_eq!(store.get("bookmarkAlpha").unwrap().as_deref(), Some("[]"));
    assert_eq!(store.get("missing").unwrap(), None);
}
