// Bookmark Alpha state managers
// Managers own mutable state and persist it.

pub mod bookmark_manager;
