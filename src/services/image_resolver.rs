//! Image Resolver for Bookmark Alpha.
//!
//! Maps a bookmark URL to a best-guess preview image by walking an ordered
//! table of per-domain rules. The resolver never performs network requests;
//! it only builds URLs for public image services. A rule whose handler
//! returns `None` falls through to the next rule, and the last rule always
//! matches.

use url::Url;

use crate::types::settings::ImageSettings;

const FAVICON_SERVICE: &str = "https://www.google.com/s2/favicons";
const LARGE_FAVICON_SIZE: u32 = 256;
const SMALL_FAVICON_SIZE: u32 = 128;
const MEDIUM_PLACEHOLDER: &str = "https://miro.medium.com/max/1200/1*mk1-6aYaf_Bes1E3Imhc0A.jpeg";
const REDDIT_PIXEL: &str = "https://www.redditstatic.com/desktop2x/img/renderTimingPixel.png";
const NEWS_DOMAINS: [&str; 4] = ["nytimes.com", "bbc.com", "cnn.com", "reuters.com"];

/// What a rule handler gets to look at.
pub struct RuleInput<'a> {
    /// The URL exactly as the user typed it.
    pub raw: &'a str,
    pub url: &'a Url,
    /// Hostname, empty for URLs without one.
    pub host: &'a str,
    pub settings: &'a ImageSettings,
}

/// One entry of the resolver's rule table.
pub struct ImageRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub resolve: fn(&RuleInput<'_>) -> Option<String>,
}

/// Rules in precedence order. The final `screenshot` rule matches every host.
pub const RULES: &[ImageRule] = &[
    ImageRule {
        name: "youtube",
        matches: |host| host.contains("youtube.com") || host.contains("youtu.be"),
        resolve: youtube_thumbnail,
    },
    ImageRule {
        name: "twitter",
        matches: |host| host.contains("twitter.com") || host.contains("x.com"),
        resolve: |input| Some(favicon_url(input.host, LARGE_FAVICON_SIZE)),
    },
    ImageRule {
        name: "github",
        matches: |host| host.contains("github.com"),
        resolve: github_social_preview,
    },
    ImageRule {
        name: "medium",
        matches: |host| host.contains("medium.com"),
        resolve: |_| Some(MEDIUM_PLACEHOLDER.to_string()),
    },
    ImageRule {
        name: "reddit",
        matches: |host| host.contains("reddit.com"),
        resolve: |_| Some(REDDIT_PIXEL.to_string()),
    },
    ImageRule {
        name: "news",
        matches: |host| NEWS_DOMAINS.iter().any(|d| host.contains(d)),
        resolve: |input| {
            Some(format!(
                "https://image.thum.io/get/width/1200/crop/630/https://{}",
                input.host
            ))
        },
    },
    ImageRule {
        name: "screenshot",
        matches: |_| true,
        resolve: |input| {
            Some(format!(
                "https://api.screenshotmachine.com?key={}&url={}&dimension={}",
                encode_component(&input.settings.screenshot_api_key),
                encode_component(input.raw),
                input.settings.screenshot_dimension
            ))
        },
    },
];

/// Percent-encodes like a browser's `encodeURIComponent`, which leaves
/// `!'()*` as they are.
fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

fn youtube_thumbnail(input: &RuleInput<'_>) -> Option<String> {
    let video_id = if input.host.contains("youtube.com") {
        input
            .url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())
    } else {
        input
            .url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string)
    };
    let video_id = video_id.filter(|id| !id.is_empty())?;

    Some(format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id))
}

fn github_social_preview(input: &RuleInput<'_>) -> Option<String> {
    let parts: Vec<&str> = input
        .url
        .path_segments()?
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [owner, repo, ..] => Some(format!(
            "https://opengraph.githubassets.com/1/{}/{}",
            owner, repo
        )),
        _ => None,
    }
}

fn favicon_url(host: &str, size: u32) -> String {
    format!("{}?domain={}&sz={}", FAVICON_SERVICE, host, size)
}

/// Best-effort host extraction for input `Url::parse` rejects, such as
/// `example.com/page` typed without a scheme.
fn lenient_host(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.contains("://") {
        return None;
    }
    Url::parse(&format!("http://{}", trimmed))
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .filter(|h| !h.is_empty())
}

/// Resolves preview images using a rule table and service settings.
#[derive(Debug, Clone, Default)]
pub struct ImageResolver {
    settings: ImageSettings,
}

impl ImageResolver {
    pub fn new(settings: ImageSettings) -> Self {
        Self { settings }
    }

    /// Returns a preview image URL for `raw`, or an empty string when not even
    /// a host can be recovered from it.
    pub fn resolve_image(&self, raw: &str) -> String {
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!(
                    url = raw,
                    error = %err,
                    "unparseable url, falling back to favicon"
                );
                return lenient_host(raw)
                    .map(|host| favicon_url(&host, LARGE_FAVICON_SIZE))
                    .unwrap_or_default();
            }
        };

        let host = url.host_str().unwrap_or_default();
        let input = RuleInput {
            raw,
            url: &url,
            host,
            settings: &self.settings,
        };

        for rule in RULES {
            if !(rule.matches)(host) {
                continue;
            }
            match (rule.resolve)(&input) {
                Some(image) => {
                    tracing::trace!(rule = rule.name, url = raw, "resolved preview image");
                    return image;
                }
                None => tracing::debug!(rule = rule.name, url = raw, "rule fell through"),
            }
        }
        String::new()
    }

    /// Returns a small favicon URL for `raw`'s host, or an empty string when
    /// the URL does not parse or has no host.
    pub fn resolve_favicon(&self, raw: &str) -> String {
        Url::parse(raw)
            .ok()
            .and_then(|u| u.host_str().map(|h| favicon_url(h, SMALL_FAVICON_SIZE)))
            .unwrap_or_default()
    }

    /// The preview image, or the small favicon when no preview is available.
    pub fn resolve_or_favicon(&self, raw: &str) -> String {
        let image = self.resolve_image(raw);
        if image.is_empty() {
            self.resolve_favicon(raw)
        } else {
            image
        }
    }
}

/// Rule names in evaluation order.
pub fn rule_names() -> Vec<&'static str> {
    RULES.iter().map(|r| r.name).collect()
}

/// Resolves a preview image with the default service settings.
pub fn resolve_image(url: &str) -> String {
    ImageResolver::default().resolve_image(url)
}

/// Resolves a small favicon URL.
pub fn resolve_favicon(url: &str) -> String {
    ImageResolver::default().resolve_favicon(url)
}
