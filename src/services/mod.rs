// Bookmark Alpha services
// Services derive data from bookmarks and settings.

pub mod image_resolver;
pub mod import_export;
pub mod query_engine;
pub mod settings_engine;
