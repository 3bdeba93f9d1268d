use thiserror::Error;

// === StorageError ===

/// Errors raised by the persistent key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database operation failed.
    #[error("Storage database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

// === BookmarkError ===

/// Errors related to bookmark collection operations.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// Bookmark with the given ID was not found.
    #[error("Bookmark not found: {0}")]
    NotFound(String),
    /// A required field was missing at the creation boundary.
    #[error("Bookmark validation failed: {0}")]
    ValidationFailed(String),
    /// The persisted collection could not be deserialized.
    #[error("Stored bookmarks are corrupt: {0}")]
    CorruptState(String),
    /// A restored collection repeats an id.
    #[error("Duplicate bookmark id: {0}")]
    DuplicateId(String),
    /// Failed to serialize the collection.
    #[error("Bookmark serialization error: {0}")]
    Serialization(String),
    /// The underlying store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === AppError ===

/// Top-level error returned by [`crate::app::App`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Bookmark(#[from] BookmarkError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Reading an import file or writing an export file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
