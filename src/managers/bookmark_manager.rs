//! Bookmark Manager for Bookmark Alpha.
//!
//! Implements `BookmarkManagerTrait`: owns the in-memory bookmark
//! collection and flushes the whole of it to a [`KeyValueStore`] after every
//! mutation. The collection is ordered most-recent-first: new bookmarks are
//! prepended, imported ones appended, edits keep their position.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::database::kv_store::KeyValueStore;
use crate::services::image_resolver::ImageResolver;
use crate::services::import_export;
use crate::types::bookmark::{
    new_bookmark_id, timestamp_now, Bookmark, BookmarkInput, ImportLink, ImportOutcome,
};
use crate::types::errors::BookmarkError;
use crate::types::settings::DEFAULT_STORAGE_KEY;

/// Trait defining bookmark collection operations.
pub trait BookmarkManagerTrait {
    /// Rehydrates the collection from the store, seeding it on first run.
    fn load(&mut self) -> Result<&[Bookmark], BookmarkError>;
    fn add_bookmark(&mut self, input: BookmarkInput) -> Result<Bookmark, BookmarkError>;
    fn update_bookmark(
        &mut self,
        id: &str,
        input: BookmarkInput,
    ) -> Result<Bookmark, BookmarkError>;
    /// Removing an unknown id is not an error.
    fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError>;
    fn toggle_favorite(&mut self, id: &str) -> Result<Bookmark, BookmarkError>;
    fn get_bookmark(&self, id: &str) -> Result<&Bookmark, BookmarkError>;
    fn list_bookmarks(&self) -> &[Bookmark];
    fn import_links(&mut self, links: &[ImportLink]) -> Result<ImportOutcome, BookmarkError>;
    /// Replaces the whole collection, e.g. with a previously exported document.
    fn replace_all(&mut self, bookmarks: Vec<Bookmark>) -> Result<(), BookmarkError>;
    fn flush(&mut self) -> Result<(), BookmarkError>;
}

/// `(id, title, url, category, description, image_url, favorite)`
type SeedRecord = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    bool,
);

const SEED: [SeedRecord; 3] = [
    (
        "1",
        "GitHub - World's Leading Software Development Platform",
        "https://github.com",
        "Development",
        "Where the world builds software",
        "https://github.githubassets.com/images/modules/site/social-cards/github-social.png",
        true,
    ),
    (
        "2",
        "Stack Overflow - Where Developers Learn & Share",
        "https://stackoverflow.com",
        "Development",
        "The largest online community for developers",
        "https://cdn.sstatic.net/Sites/stackoverflow/Img/apple-touch-icon@2.png",
        true,
    ),
    (
        "3",
        "MDN Web Docs",
        "https://developer.mozilla.org",
        "Documentation",
        "Resources for developers, by developers",
        "https://developer.mozilla.org/apple-touch-icon.png",
        false,
    ),
];

/// The three demo bookmarks a fresh installation starts with.
pub fn seed_bookmarks(now: DateTime<Utc>) -> Vec<Bookmark> {
    SEED.iter()
        .map(
            |&(id, title, url, category, description, image_url, favorite)| Bookmark {
                id: id.to_string(),
                title: title.to_string(),
                url: url.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                image_url: image_url.to_string(),
                favorite,
                date_added: now,
            },
        )
        .collect()
}

/// Returns the first id that appears more than once.
fn first_duplicate_id(bookmarks: &[Bookmark]) -> Option<&str> {
    let mut seen = HashSet::new();
    bookmarks
        .iter()
        .map(|b| b.id.as_str())
        .find(|id| !seen.insert(*id))
}

/// Bookmark collection persisted through a key-value store.
pub struct BookmarkManager<S: KeyValueStore> {
    store: S,
    storage_key: String,
    resolver: ImageResolver,
    bookmarks: Vec<Bookmark>,
}

impl<S: KeyValueStore> BookmarkManager<S> {
    /// Creates an empty manager using the default storage key. Call
    /// [`BookmarkManagerTrait::load`] before use.
    pub fn new(store: S) -> Self {
        Self::with_storage_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_storage_key(store: S, storage_key: &str) -> Self {
        Self {
            store,
            storage_key: storage_key.to_string(),
            resolver: ImageResolver::default(),
            bookmarks: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn resolver(&self) -> &ImageResolver {
        &self.resolver
    }

    pub fn set_resolver(&mut self, resolver: ImageResolver) {
        self.resolver = resolver;
    }

    fn contains(&self, id: &str) -> bool {
        self.bookmarks.iter().any(|b| b.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, BookmarkError> {
        self.bookmarks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }

    /// An id not used by any live bookmark.
    fn fresh_id(&self) -> String {
        loop {
            let id = new_bookmark_id();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    fn image_for(&self, input: &BookmarkInput) -> String {
        match input.explicit_image_url() {
            Some(image) => image.to_string(),
            None => self.resolver.resolve_or_favicon(input.url.trim()),
        }
    }
}

impl<S: KeyValueStore> BookmarkManagerTrait for BookmarkManager<S> {
    /// Reads the stored collection. When nothing is stored yet the seed
    /// collection is installed and persisted; when the stored value does not
    /// parse, `CorruptState` is returned and the stored value is left alone.
    fn load(&mut self) -> Result<&[Bookmark], BookmarkError> {
        match self.store.get(&self.storage_key)? {
            None => {
                self.bookmarks = seed_bookmarks(timestamp_now());
                self.flush()?;
                tracing::info!(
                    key = %self.storage_key,
                    "no stored bookmarks, installed seed collection"
                );
            }
            Some(raw) => {
                let bookmarks: Vec<Bookmark> = serde_json::from_str(&raw)
                    .map_err(|e| BookmarkError::CorruptState(e.to_string()))?;
                if let Some(id) = first_duplicate_id(&bookmarks) {
                    return Err(BookmarkError::CorruptState(format!("duplicate id {}", id)));
                }
                self.bookmarks = bookmarks;
                tracing::info!(count = self.bookmarks.len(), "loaded bookmarks");
            }
        }
        Ok(&self.bookmarks)
    }

    /// Creates a bookmark at the front of the collection.
    ///
    /// The image URL is the one supplied, or else resolved from the url.
    fn add_bookmark(&mut self, input: BookmarkInput) -> Result<Bookmark, BookmarkError> {
        input.validate()?;

        let bookmark = Bookmark {
            id: self.fresh_id(),
            title: input.title.trim().to_string(),
            url: input.url.trim().to_string(),
            category: input.resolved_category(),
            description: input.description.clone().unwrap_or_default(),
            image_url: self.image_for(&input),
            favorite: false,
            date_added: timestamp_now(),
        };

        self.bookmarks.insert(0, bookmark.clone());
        self.flush()?;
        tracing::debug!(id = %bookmark.id, url = %bookmark.url, "bookmark added");
        Ok(bookmark)
    }

    /// Replaces the editable fields of an existing bookmark in place.
    /// `id`, `favorite` and `dateAdded` are kept.
    fn update_bookmark(
        &mut self,
        id: &str,
        input: BookmarkInput,
    ) -> Result<Bookmark, BookmarkError> {
        input.validate()?;
        let index = self.position(id)?;
        let image_url = self.image_for(&input);

        let bookmark = &mut self.bookmarks[index];
        bookmark.title = input.title.trim().to_string();
        bookmark.url = input.url.trim().to_string();
        bookmark.category = input.resolved_category();
        bookmark.description = input.description.unwrap_or_default();
        bookmark.image_url = image_url;
        let updated = bookmark.clone();

        self.flush()?;
        tracing::debug!(id, "bookmark updated");
        Ok(updated)
    }

    fn remove_bookmark(&mut self, id: &str) -> Result<(), BookmarkError> {
        let Some(index) = self.bookmarks.iter().position(|b| b.id == id) else {
            tracing::debug!(id, "remove of unknown bookmark ignored");
            return Ok(());
        };
        self.bookmarks.remove(index);
        self.flush()?;
        tracing::debug!(id, "bookmark removed");
        Ok(())
    }

    fn toggle_favorite(&mut self, id: &str) -> Result<Bookmark, BookmarkError> {
        let index = self.position(id)?;
        let bookmark = &mut self.bookmarks[index];
        bookmark.favorite = !bookmark.favorite;
        let toggled = bookmark.clone();

        self.flush()?;
        tracing::debug!(id, favorite = toggled.favorite, "favorite toggled");
        Ok(toggled)
    }

    fn get_bookmark(&self, id: &str) -> Result<&Bookmark, BookmarkError> {
        self.bookmarks
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }

    fn list_bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Appends an `Imported` bookmark for every `http(s)` link, in input order.
    /// A batch with no qualifying links is reported as zero imported.
    fn import_links(&mut self, links: &[ImportLink]) -> Result<ImportOutcome, BookmarkError> {
        let mut created = import_export::import_from_links(links, &self.resolver, timestamp_now());

        let mut batch_ids = HashSet::new();
        for bookmark in &mut created {
            while self.contains(&bookmark.id) || !batch_ids.insert(bookmark.id.clone()) {
                bookmark.id = new_bookmark_id();
            }
        }

        if !created.is_empty() {
            self.bookmarks.extend(created.iter().cloned());
            self.flush()?;
        }
        tracing::info!(links = links.len(), imported = created.len(), "imported links");

        Ok(ImportOutcome {
            imported_count: created.len(),
            created,
        })
    }

    fn replace_all(&mut self, bookmarks: Vec<Bookmark>) -> Result<(), BookmarkError> {
        if let Some(id) = first_duplicate_id(&bookmarks) {
            return Err(BookmarkError::DuplicateId(id.to_string()));
        }
        self.bookmarks = bookmarks;
        self.flush()?;
        tracing::info!(count = self.bookmarks.len(), "bookmark collection replaced");
        Ok(())
    }

    /// Writes the entire collection under the storage key.
    fn flush(&mut self) -> Result<(), BookmarkError> {
        let raw = serde_json::to_string(&self.bookmarks)
            .map_err(|e| BookmarkError::Serialization(e.to_string()))?;
        self.store.set(&self.storage_key, &raw)?;
        Ok(())
    }
}
