//! Unit tests for HTML import and JSON export.

use bookmark_alpha::managers::bookmark_manager::seed_bookmarks;
use bookmark_alpha::services::image_resolver::ImageResolver;
use bookmark_alpha::services::import_export::{
    export_json, extract_links, import_from_links, parse_export,
};
use bookmark_alpha::types::bookmark::ImportLink;
use bookmark_alpha::types::errors::BookmarkError;
use chrono::Utc;

const NETSCAPE_EXPORT: &str = r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks</H1>
<DL><p>
    <DT><H3 ADD_DATE="1700000000">Toolbar</H3>
    <DL><p>
        <DT><A HREF="https://www.rust-lang.org/" ADD_DATE="1700000001" ICON="data:image/png;base64,AAA">Rust &amp; Friends</A>
        <DT><A HREF="mailto:me@example.com">Mail me</A>
        <DT><A HREF='http://example.org/docs'><b>Example</b> docs</A>
        <DT><A HREF="place:sort=8">Recent</A>
    </DL><p>
</DL><p>
"#;

// ─── Link extraction ───

#[test]
fn test_extract_links_reads_every_anchor_in_order() {
    let links = extract_links(NETSCAPE_EXPORT);

    assert_eq!(
        links,
        vec![
            ImportLink::new("https://www.rust-lang.org/", "Rust & Friends"),
            ImportLink::new("mailto:me@example.com", "Mail me"),
            ImportLink::new("http://example.org/docs", "Example docs"),
            ImportLink::new("place:sort=8", "Recent"),
        ]
    );
}

#[test]
fn test_extract_links_handles_unquoted_and_missing_href() {
    let links = extract_links("<a href=https://a.com>A</a><a name=\"top\">Top</a>");
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].href, "https://a.com");
    assert_eq!(links[1].href, "");
    assert_eq!(links[1].text, "Top");
}

#[test]
fn test_extract_links_decodes_numeric_references() {
    let links = extract_links(
        "<a href=\"https://a.com/?q=1&#38;r=2\">Ferris&#8217;s &#x22;crab&#x22; page</a>",
    );
    assert_eq!(links[0].href, "https://a.com/?q=1&r=2");
    assert_eq!(links[0].text, "Ferris\u{2019}s \"crab\" page");
}

#[test]
fn test_extract_links_without_anchors_is_empty() {
    assert!(extract_links("").is_empty());
    assert!(extract_links("<p>no links here</p>").is_empty());
}

// ─── Import ───

#[test]
fn test_import_keeps_only_http_links() {
    let links = vec![
        ImportLink::new("https://a.com", "A"),
        ImportLink::new("mailto:x@y.z", "M"),
    ];
    let now = Utc::now();

    let created = import_from_links(&links, &ImageResolver::default(), now);

    assert_eq!(created.len(), 1);
    let bm = &created[0];
    assert_eq!(bm.url, "https://a.com");
    assert_eq!(bm.title, "A");
    assert_eq!(bm.category, "Imported");
    assert_eq!(bm.description, "");
    assert!(!bm.favorite);
    assert_eq!(bm.date_added, now);
    assert!(!bm.image_url.is_empty());
}

#[test]
fn test_import_blank_text_becomes_untitled() {
    let links = vec![ImportLink::new("http://c.org", "   ")];
    let created = import_from_links(&links, &ImageResolver::default(), Utc::now());
    assert_eq!(created[0].title, "Untitled");
}

#[test]
fn test_import_uses_image_rules() {
    let links = vec![ImportLink::new("https://github.com/rust-lang/rust", "rust")];
    let created = import_from_links(&links, &ImageResolver::default(), Utc::now());
    assert_eq!(
        created[0].image_url,
        "https://opengraph.githubassets.com/1/rust-lang/rust"
    );
}

#[test]
fn test_import_of_nothing_is_empty() {
    assert!(import_from_links(&[], &ImageResolver::default(), Utc::now()).is_empty());
}

#[test]
fn test_full_document_imports_two_bookmarks() {
    let links = extract_links(NETSCAPE_EXPORT);
    let created = import_from_links(&links, &ImageResolver::default(), Utc::now());
    let titles: Vec<&str> = created.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["Rust & Friends", "Example docs"]);
}

// ─── Export ───

#[test]
fn test_export_is_pretty_camel_case_array() {
    let seed = seed_bookmarks(Utc::now());
    let json = export_json(&seed).unwrap();

    assert!(json.starts_with("[\n"));
    assert!(json.contains("\"imageUrl\""));
    assert!(json.contains("\"dateAdded\""));
    assert!(!json.contains("date_added"));
}

#[test]
fn test_export_of_empty_collection() {
    assert_eq!(export_json(&[]).unwrap(), "[]");
}

#[test]
fn test_parse_export_rejects_garbage() {
    assert!(matches!(parse_export("not json"), Err(BookmarkError::Serialization(_))));
}
