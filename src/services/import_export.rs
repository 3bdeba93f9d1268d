//! Import/Export for Bookmark Alpha.
//!
//! Import reads the anchors of an HTML bookmarks export (the format every
//! browser writes) and turns the `http(s)` ones into bookmarks. Export writes
//! the whole collection as a pretty-printed JSON array that [`parse_export`]
//! reads back unchanged.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::{Captures, Regex};

use crate::services::image_resolver::ImageResolver;
use crate::types::bookmark::{
    new_bookmark_id, Bookmark, ImportLink, IMPORTED_CATEGORY, UNTITLED,
};
use crate::types::errors::BookmarkError;

fn anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("anchor pattern"))
}

fn href_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).expect("href pattern")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern"))
}

fn numeric_entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));").expect("entity pattern")
    })
}

/// Decodes the named entities browsers emit in bookmark exports plus any
/// numeric character reference. `&amp;` goes last so `&amp;lt;` stays `&lt;`.
fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ");

    let numeric = numeric_entity_re().replace_all(&named, |caps: &Captures<'_>| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse().ok(),
            (None, None) => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    numeric.replace("&amp;", "&")
}

/// Extracts `(href, text)` pairs from every anchor in `html`, in document
/// order. Anchors without an `href` attribute are returned with an empty one.
pub fn extract_links(html: &str) -> Vec<ImportLink> {
    anchor_re()
        .captures_iter(html)
        .map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let href = href_re()
                .captures(attrs)
                .and_then(|h| h.get(1).or_else(|| h.get(2)).or_else(|| h.get(3)))
                .map(|m| decode_entities(m.as_str().trim()))
                .unwrap_or_default();
            let inner = caps.get(2).map_or("", |m| m.as_str());
            let text = decode_entities(&tag_re().replace_all(inner, ""));
            ImportLink { href, text }
        })
        .collect()
}

/// Builds `Imported` bookmarks from the links whose href starts with `http`.
///
/// Other links (`mailto:`, `javascript:`, `place:`, relative paths) are
/// skipped. Output order follows input order.
pub fn import_from_links(
    links: &[ImportLink],
    resolver: &ImageResolver,
    now: DateTime<Utc>,
) -> Vec<Bookmark> {
    links
        .iter()
        .filter(|link| link.href.starts_with("http"))
        .map(|link| {
            let title = link.text.trim();
            Bookmark {
                id: new_bookmark_id(),
                title: if title.is_empty() { UNTITLED } else { title }.to_string(),
                url: link.href.clone(),
                category: IMPORTED_CATEGORY.to_string(),
                description: String::new(),
                image_url: resolver.resolve_or_favicon(&link.href),
                favorite: false,
                date_added: now,
            }
        })
        .collect()
}

/// Serializes the collection as a pretty-printed JSON array.
pub fn export_json(bookmarks: &[Bookmark]) -> Result<String, BookmarkError> {
    serde_json::to_string_pretty(bookmarks).map_err(|e| BookmarkError::Serialization(e.to_string()))
}

/// Parses a document produced by [`export_json`].
pub fn parse_export(json: &str) -> Result<Vec<Bookmark>, BookmarkError> {
    serde_json::from_str(json).map_err(|e| BookmarkError::Serialization(e.to_string()))
}

/// Download name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("bookmark-alpha-export-{}.json", date.format("%Y-%m-%d"))
}
