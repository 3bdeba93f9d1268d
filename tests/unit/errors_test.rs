use bookmark_alpha::types::errors::*;

// === StorageError Tests ===

#[test]
fn storage_error_display() {
    assert_eq!(
        StorageError::Database("disk I/O error".to_string()).to_string(),
        "Storage database error: disk I/O error"
    );
}

#[test]
fn storage_error_from_rusqlite() {
    let err: StorageError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, StorageError::Database(_)));
}

// === BookmarkError Tests ===

#[test]
fn bookmark_error_display_variants() {
    assert_eq!(
        BookmarkError::NotFound("bm-1".to_string()).to_string(),
        "Bookmark not found: bm-1"
    );
    assert_eq!(
        BookmarkError::ValidationFailed("title is required".to_string()).to_string(),
        "Bookmark validation failed: title is required"
    );
    assert_eq!(
        BookmarkError::CorruptState("expected value".to_string()).to_string(),
        "Stored bookmarks are corrupt: expected value"
    );
    assert_eq!(
        BookmarkError::DuplicateId("7".to_string()).to_string(),
        "Duplicate bookmark id: 7"
    );
}

#[test]
fn bookmark_error_wraps_storage_error_transparently() {
    let err = BookmarkError::from(StorageError::Database("locked".to_string()));
    assert_eq!(err.to_string(), "Storage database error: locked");
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::InvalidKey("display.nope".to_string()).to_string(),
        "Invalid settings key: display.nope"
    );
    assert_eq!(
        SettingsError::InvalidValue("not a view".to_string()).to_string(),
        "Invalid settings value: not a view"
    );
}

// === AppError Tests ===

#[test]
fn app_error_from_io_keeps_source() {
    use std::error::Error;

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "bookmarks.html");
    let err = AppError::from(io);
    assert_eq!(err.to_string(), "I/O error: bookmarks.html");
    assert!(err.source().is_some());
}

#[test]
fn app_error_from_bookmark_error() {
    let err: AppError = BookmarkError::NotFound("x".to_string()).into();
    assert!(matches!(err, AppError::Bookmark(BookmarkError::NotFound(_))));
}
