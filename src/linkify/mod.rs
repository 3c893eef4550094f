//! URL detection for discussion text
//!
//! Detects links in plain bulletin text and turns them into styled runs:
//! - Explicit URLs: `https?://...`
//! - `www.` hosts and bare domains on common TLDs (`weather.gov/pqr`),
//!   which get the default protocol prepended
//! - Links whose host contains the excluded domain stay plain text
//!
//! Runs keep their link target so the output layer can emit OSC 8
//! hyperlinks; supporting terminals open them in the browser on click.

mod styles;

pub use styles::{wrap_osc8_hyperlink, STYLE_LINK, STYLE_LINK_SELECTED};

use once_cell::sync::Lazy;
use ratatui::{style::Style, text::Span};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// Links are detected when they start with a scheme, `www.`, or are a
/// dotted host on one of a handful of TLDs that show up in bulletins.
/// Matches stop at whitespace, angle brackets and square brackets.
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:https?://[^\s<>\[\]]+|www\.[^\s<>\[\]]+|(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+(?:gov|com|org|net|edu|us|mil|io|info)\b(?:/[^\s<>\[\]]*)?)",
    )
    .expect("Invalid URL regex pattern")
});

/// Characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

/// Domain excluded from linking by default (links back to the app itself).
pub const DEFAULT_EXCLUDED_DOMAIN: &str = "ppg.report";

/// Options controlling link detection and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOptions {
    /// Links whose host contains this substring are left as plain text
    pub excluded_domain: Option<String>,
    /// Protocol prepended to links written without one
    pub default_protocol: String,
    /// Emit OSC 8 escape sequences around link text
    pub hyperlinks: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            excluded_domain: Some(DEFAULT_EXCLUDED_DOMAIN.to_string()),
            default_protocol: "https".to_string(),
            hyperlinks: true,
        }
    }
}

impl LinkOptions {
    /// Whether a link target may be linked.
    pub fn allows(&self, url: &str) -> bool {
        match &self.excluded_domain {
            Some(excluded) if !excluded.is_empty() => {
                !host_of(url).contains(&excluded.to_lowercase())
            }
            _ => true,
        }
    }

    /// Full link target for detected link text.
    pub fn href(&self, text: &str) -> String {
        if has_scheme(text) {
            text.to_string()
        } else {
            format!("{}://{}", self.default_protocol, text)
        }
    }
}

/// Information about a detected link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// The link target, with the default protocol applied
    pub url: String,
    /// The text as written in the bulletin
    pub text: String,
    /// Start byte position in the source text
    pub start: usize,
    /// End byte position in the source text
    pub end: usize,
}

impl LinkInfo {
    /// Create a new LinkInfo
    pub fn new(url: String, text: String, start: usize, end: usize) -> Self {
        Self {
            url,
            text,
            start,
            end,
        }
    }
}

/// A piece of text with one style, optionally a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    /// Visible text
    pub text: String,
    /// Style of the text
    pub style: Style,
    /// Link target when this run is a link
    pub link: Option<String>,
}

impl TextRun {
    /// Plain text run.
    pub fn plain(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
        }
    }

    /// Link run.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: STYLE_LINK,
            link: Some(url.into()),
        }
    }

    /// Display width of the visible text.
    pub fn width(&self) -> usize {
        self.text.width()
    }

    /// Convert into a span of the visible text.
    ///
    /// Spans never carry escape sequences; ratatui would print them cell by
    /// cell. Hyperlinks are written over the drawn frame instead, see
    /// [`crate::ui::write_hyperlinks`].
    pub fn into_span(self) -> Span<'static> {
        Span::styled(self.text, self.style)
    }
}

/// Detect links in a piece of text.
pub fn detect_links(text: &str, options: &LinkOptions) -> Vec<LinkInfo> {
    URL_REGEX
        .find_iter(text)
        .filter_map(|m| {
            // Part of an email address, not a link.
            if text[..m.start()].ends_with('@') {
                return None;
            }
            let written = trim_trailing_punctuation(m.as_str());
            if written.is_empty() {
                return None;
            }
            let url = options.href(written);
            if !options.allows(&url) {
                tracing::debug!(url = %url, "link excluded from linkify");
                return None;
            }
            Some(LinkInfo::new(
                url,
                written.to_string(),
                m.start(),
                m.start() + written.len(),
            ))
        })
        .collect()
}

/// Split text into runs where links are styled and carry their target.
pub fn linkify(text: &str, base_style: Style, options: &LinkOptions) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut last_end = 0;

    for link in detect_links(text, options) {
        if link.start > last_end {
            runs.push(TextRun::plain(&text[last_end..link.start], base_style));
        }
        runs.push(TextRun::link(link.text, link.url));
        last_end = link.end;
    }

    if last_end < text.len() {
        runs.push(TextRun::plain(&text[last_end..], base_style));
    }

    runs
}

/// Host part of a URL, lowercased.
pub fn host_of(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let end = rest.find(['/', '?', '#', ':']).unwrap_or(rest.len());
    rest[..end].to_lowercase()
}

fn has_scheme(text: &str) -> bool {
    let lower = text.get(..8).unwrap_or(text).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn trim_trailing_punctuation(url: &str) -> &str {
    let mut trimmed = url.trim_end_matches(TRAILING_PUNCTUATION);
    // A closing paren belongs to the URL only when it is balanced inside it.
    while trimmed.ends_with(')') && trimmed.matches(')').count() > trimmed.matches('(').count() {
        trimmed = trimmed[..trimmed.len() - 1].trim_end_matches(TRAILING_PUNCTUATION);
    }
    trimmed
}
