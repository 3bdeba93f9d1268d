//! Query Engine for Bookmark Alpha.
//!
//! Derived views over the bookmark collection: the filtered list the
//! presentation layer renders, the category list and the counters.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Local, TimeZone};

use crate::types::bookmark::{Bookmark, BookmarkStats, FilterCriteria};

/// Returns whether `bookmark` satisfies every criterion.
pub fn matches(bookmark: &Bookmark, criteria: &FilterCriteria) -> bool {
    matches_lowered(bookmark, criteria, &criteria.search_text.to_lowercase())
}

// `needle` is the search text, already lowercased.
fn matches_lowered(bookmark: &Bookmark, criteria: &FilterCriteria, needle: &str) -> bool {
    matches_search(bookmark, needle)
        && (criteria.category.is_empty() || bookmark.category == criteria.category)
        && (!criteria.favorites_only || bookmark.favorite)
}

fn matches_search(bookmark: &Bookmark, needle: &str) -> bool {
    needle.is_empty()
        || bookmark.title.to_lowercase().contains(needle)
        || bookmark.url.to_lowercase().contains(needle)
        || bookmark.description.to_lowercase().contains(needle)
}

/// Bookmarks matching `criteria`, in collection order.
pub fn filter<'a>(bookmarks: &'a [Bookmark], criteria: &FilterCriteria) -> Vec<&'a Bookmark> {
    let needle = criteria.search_text.to_lowercase();
    bookmarks
        .iter()
        .filter(|b| matches_lowered(b, criteria, &needle))
        .collect()
}

/// Distinct categories, sorted.
pub fn categories(bookmarks: &[Bookmark]) -> BTreeSet<String> {
    bookmarks.iter().map(|b| b.category.clone()).collect()
}

/// Counters for the current calendar day in local time.
pub fn stats(bookmarks: &[Bookmark]) -> BookmarkStats {
    stats_at(bookmarks, Local::now())
}

/// Counters where "today" is the calendar day of `now` in `now`'s time zone.
pub fn stats_at<Tz: TimeZone>(bookmarks: &[Bookmark], now: DateTime<Tz>) -> BookmarkStats {
    let tz = now.timezone();
    let today = now.date_naive();

    let distinct: HashSet<&str> = bookmarks.iter().map(|b| b.category.as_str()).collect();

    BookmarkStats {
        total: bookmarks.len(),
        category_count: distinct.len(),
        favorite_count: bookmarks.iter().filter(|b| b.favorite).count(),
        today_count: bookmarks
            .iter()
            .filter(|b| b.date_added.with_timezone(&tz).date_naive() == today)
            .count(),
    }
}
