use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::BookmarkError;

/// Category assigned when none is supplied.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Category assigned to records created from an HTML link import.
pub const IMPORTED_CATEGORY: &str = "Imported";

/// Title used for imported links without any text.
pub const UNTITLED: &str = "Untitled";

/// Represents a saved bookmark.
///
/// Field names on the wire match the persisted blob: `imageUrl` and
/// `dateAdded` are camelCase, everything else is a single word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(with = "iso_millis")]
    pub date_added: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A fresh, time-ordered bookmark id.
pub fn new_bookmark_id() -> String {
    Uuid::now_v7().to_string()
}

/// The current time at the precision `dateAdded` is stored with.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Fields supplied by the user when creating or editing a bookmark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkInput {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
}

impl BookmarkInput {
    /// Creates an input with only the required fields set.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Rejects input whose title or url is blank.
    pub fn validate(&self) -> Result<(), BookmarkError> {
        if self.title.trim().is_empty() {
            return Err(BookmarkError::ValidationFailed("title is required".to_string()));
        }
        if self.url.trim().is_empty() {
            return Err(BookmarkError::ValidationFailed("url is required".to_string()));
        }
        Ok(())
    }

    /// Category to store: the supplied one, or [`DEFAULT_CATEGORY`] when blank.
    pub fn resolved_category(&self) -> String {
        match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Explicit image URL, if the user supplied a non-blank one.
    pub fn explicit_image_url(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// An anchor found in an HTML bookmarks export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportLink {
    pub href: String,
    pub text: String,
}

impl ImportLink {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }
}

/// Result of importing a batch of links.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub created: Vec<Bookmark>,
    pub imported_count: usize,
}

impl ImportOutcome {
    pub fn is_empty(&self) -> bool {
        self.imported_count == 0
    }
}

/// Criteria for the filtered view. Empty strings act as wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub favorites_only: bool,
}

/// Aggregate counters shown above the bookmark grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkStats {
    pub total: usize,
    pub category_count: usize,
    pub favorite_count: usize,
    pub today_count: usize,
}

/// How the presentation layer lays out bookmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// `dateAdded` is written as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
