//! Bookmark Alpha storage layer.
//!
//! The bookmark collection is persisted as one serialized string under a
//! fixed key. [`KeyValueStore`] is that contract; [`SqliteKeyValueStore`]
//! keeps the values in a SQLite table and [`MemoryKeyValueStore`] keeps them
//! in a map.
//!
//! ```no_run
//! use std::sync::Arc;
//! use bookmark_alpha::database::{Database, KeyValueStore, SqliteKeyValueStore};
//!
//! let db = Arc::new(Database::open("bookmark-alpha.db").expect("failed to open database"));
//! let mut store = SqliteKeyValueStore::new(db);
//! store.set("greeting", "hello").expect("write failed");
//! assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));
//! ```

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::Database;
pub use kv_store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
