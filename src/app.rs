//! App Core for Bookmark Alpha.
//!
//! Wires the database, the settings engine and the bookmark manager together
//! and offers the operations the presentation layer drives.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use crate::database::connection::Database;
use crate::database::kv_store::SqliteKeyValueStore;
use crate::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};
use crate::services::image_resolver::ImageResolver;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::{import_export, query_engine};
use crate::types::bookmark::{Bookmark, BookmarkStats, FilterCriteria, ImportOutcome, ViewMode};
use crate::types::errors::{AppError, SettingsError, StorageError};

/// Central application struct holding storage, settings and the collection.
pub struct App {
    pub db: Arc<Database>,
    pub settings_engine: SettingsEngine,
    pub bookmarks: BookmarkManager<SqliteKeyValueStore>,
}

impl App {
    /// Opens the database at `db_path` and loads settings from
    /// `settings_path` (or the platform default). The bookmark collection is
    /// not read until [`App::startup`].
    pub fn new(db_path: &str, settings_path: Option<String>) -> Result<Self, AppError> {
        let db = Arc::new(Database::open(db_path).map_err(StorageError::from)?);

        let mut settings_engine = SettingsEngine::new(settings_path);
        settings_engine.load()?;

        let bookmarks = Self::build_manager(&db, &settings_engine);

        Ok(Self {
            db,
            settings_engine,
            bookmarks,
        })
    }

    fn build_manager(
        db: &Arc<Database>,
        settings: &SettingsEngine,
    ) -> BookmarkManager<SqliteKeyValueStore> {
        let current = settings.get_settings();
        let mut manager = BookmarkManager::with_storage_key(
            SqliteKeyValueStore::new(Arc::clone(db)),
            &current.general.storage_key,
        );
        manager.set_resolver(ImageResolver::new(current.images.clone()));
        manager
    }

    /// Startup sequence: rehydrate the bookmark collection (seeding it on first run).
    pub fn startup(&mut self) -> Result<(), AppError> {
        let count = self.bookmarks.load()?.len();
        tracing::info!(
            count,
            view = ?self.view_mode(),
            settings = %self.settings_engine.get_config_path(),
            "bookmark alpha started"
        );
        Ok(())
    }

    /// Re-reads settings-dependent state after a settings change.
    ///
    /// A new storage key switches to the collection stored under it. When
    /// that collection cannot be loaded the current one stays active and the
    /// storage key setting is put back.
    pub fn apply_settings(&mut self) -> Result<(), AppError> {
        let current = self.settings_engine.get_settings().clone();
        if current.general.storage_key == self.bookmarks.storage_key() {
            self.bookmarks.set_resolver(ImageResolver::new(current.images));
            return Ok(());
        }

        let mut manager = Self::build_manager(&self.db, &self.settings_engine);
        if let Err(err) = manager.load() {
            let previous = self.bookmarks.storage_key().to_string();
            tracing::warn!(
                key = %current.general.storage_key,
                previous = %previous,
                error = %err,
                "cannot switch bookmark collection"
            );
            self.settings_engine
                .set_value("general.storage_key", Value::String(previous))?;
            self.bookmarks.set_resolver(ImageResolver::new(current.images));
            return Err(err.into());
        }
        self.bookmarks = manager;
        Ok(())
    }

    pub fn view_mode(&self) -> ViewMode {
        self.settings_engine.get_settings().display.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<(), AppError> {
        let value = serde_json::to_value(mode)
            .map_err(|e| SettingsError::SerializationError(e.to_string()))?;
        self.settings_engine.set_value("display.view_mode", value)?;
        Ok(())
    }

    /// The bookmarks the presentation layer should render.
    pub fn visible_bookmarks(&self, criteria: &FilterCriteria) -> Vec<&Bookmark> {
        query_engine::filter(self.bookmarks.list_bookmarks(), criteria)
    }

    pub fn categories(&self) -> BTreeSet<String> {
        query_engine::categories(self.bookmarks.list_bookmarks())
    }

    pub fn stats(&self) -> BookmarkStats {
        query_engine::stats(self.bookmarks.list_bookmarks())
    }

    /// Imports every `http(s)` anchor of an HTML bookmarks export.
    pub fn import_html(&mut self, html: &str) -> Result<ImportOutcome, AppError> {
        let links = import_export::extract_links(html);
        Ok(self.bookmarks.import_links(&links)?)
    }

    pub fn import_html_file(&mut self, path: &Path) -> Result<ImportOutcome, AppError> {
        let html = fs::read_to_string(path)?;
        self.import_html(&html)
    }

    /// Writes `bookmark-alpha-export-<date>.json` into `dir` and returns its path.
    pub fn export_to_dir(&self, dir: &Path, today: NaiveDate) -> Result<PathBuf, AppError> {
        let json = import_export::export_json(self.bookmarks.list_bookmarks())?;
        fs::create_dir_all(dir)?;
        let path = dir.join(import_export::export_file_name(today));
        fs::write(&path, json)?;
        tracing::info!(path = %path.display(), "exported bookmarks");
        Ok(path)
    }

    /// Replaces the collection with an exported JSON document. Returns the
    /// number of bookmarks restored.
    pub fn restore_json(&mut self, json: &str) -> Result<usize, AppError> {
        let bookmarks = import_export::parse_export(json)?;
        let count = bookmarks.len();
        self.bookmarks.replace_all(bookmarks)?;
        Ok(count)
    }
}
