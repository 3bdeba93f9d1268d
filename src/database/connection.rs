//! The SQLite connection behind the key-value store.

use std::path::Path;

use rusqlite::Connection;

use super::migrations;

/// A migrated SQLite connection, file-backed or in-memory.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens or creates the database file at `path`, bringing its schema up
    /// to date.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let path = path.as_ref();
        let db = Self::migrated(Connection::open(path)?)?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// A private database that disappears when dropped.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
