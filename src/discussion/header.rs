//! Section header classification.
//!
//! Headers look like `SHORT TERM /TONIGHT THROUGH FRIDAY/`: a topic, then an
//! optional aside wrapped in `/.../`, `[...]` or `(...)`. The topic selects
//! the header color; unknown topics fall back to white.

use once_cell::sync::Lazy;
use ratatui::style::Color;
use regex::Regex;

/// Trailing aside: `/.../`, `[...]` or `(...)` at the end of the header.
static ASIDE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:/.*/|\[.*\]|\(.*\))$").expect("Invalid aside regex pattern"));

/// Topic color of a section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeaderColor {
    /// Fire weather
    Red,
    /// Short/near term
    Yellow,
    /// Long term
    Gold,
    /// Aviation
    Cyan,
    /// Marine
    Blue,
    /// Update, outlook, overview, synopsis
    Green,
    /// Discussion
    Pink,
    /// Anything else
    #[default]
    White,
}

impl HeaderColor {
    /// Look up the color for a header topic.
    ///
    /// `topic` is matched case-insensitively after trimming.
    pub fn for_topic(topic: &str) -> Self {
        match topic.trim().to_uppercase().as_str() {
            "FIRE" | "FIRE WEATHER" => HeaderColor::Red,
            "SHORT TERM" | "NEAR TERM" => HeaderColor::Yellow,
            "LONG TERM" => HeaderColor::Gold,
            "AVIATION" => HeaderColor::Cyan,
            "MARINE" => HeaderColor::Blue,
            "UPDATE" | "OUTLOOK" | "OVERVIEW" | "SYNOPSIS" => HeaderColor::Green,
            "DISCUSSION" => HeaderColor::Pink,
            _ => HeaderColor::White,
        }
    }

    /// RGB components.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            HeaderColor::Red => (255, 0, 0),
            HeaderColor::Yellow => (255, 255, 0),
            HeaderColor::Gold => (255, 215, 0),
            HeaderColor::Cyan => (0, 187, 255),
            HeaderColor::Blue => (0, 0, 255),
            HeaderColor::Green => (0, 255, 0),
            HeaderColor::Pink => (255, 100, 255),
            HeaderColor::White => (255, 255, 255),
        }
    }

    /// Terminal color.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }
}

/// Display form of a section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLabel {
    /// Header topic, e.g. `Near Term`
    pub main: String,
    /// Lowercased aside without its delimiters, e.g. `through tonight`
    pub aside: Option<String>,
    /// Topic color
    pub color: HeaderColor,
}

impl HeaderLabel {
    /// Build the label for a raw bulletin header.
    ///
    /// `office_code` is the office identifier as it appears in the bulletin
    /// (see [`crate::discussion::Discussion::office_code`]); it stays
    /// uppercase in the title.
    pub fn new(header: &str, office_code: &str) -> Self {
        Self::classify(&format_header_title(header, office_code))
    }

    /// Split an already formatted title into topic, aside and color.
    pub fn classify(title: &str) -> Self {
        let (main, aside) = split_aside(title);
        Self {
            main: main.to_string(),
            aside: aside.map(str::to_lowercase),
            color: HeaderColor::for_topic(main),
        }
    }

    /// Aside as shown on screen: each word capitalized.
    pub fn display_aside(&self) -> Option<String> {
        self.aside.as_deref().map(capitalize_words)
    }
}

/// Split a header into its topic and optional aside.
///
/// Both parts are trimmed; an aside that is empty after removing its
/// delimiters is dropped.
pub fn split_aside(header: &str) -> (&str, Option<&str>) {
    let header = header.trim();
    let Some(found) = ASIDE_REGEX.find(header) else {
        return (header, None);
    };

    let main = header[..found.start()].trim();
    let delimited = found.as_str();
    // Delimiters are single ASCII bytes.
    let inner = delimited[1..delimited.len() - 1].trim();
    let aside = (!inner.is_empty()).then_some(inner);
    (main, aside)
}

/// Title-case a raw header for display.
///
/// The header is lowercased, the first occurrence of the office code is
/// restored to uppercase, and every ASCII letter at the start of the text or
/// after a space or `/` is capitalized.
pub fn format_header_title(header: &str, office_code: &str) -> String {
    let mut lower = header.to_lowercase();

    if !office_code.is_empty() {
        let office_lower = office_code.to_lowercase();
        if let Some(pos) = lower.find(&office_lower) {
            lower.replace_range(pos..pos + office_lower.len(), &office_code.to_uppercase());
        }
    }

    capitalize_words(&lower)
}

/// Uppercase every ASCII letter at the start of the text or after a space
/// or `/`. Other characters are left as they are.
pub fn capitalize_words(text: &str) -> String {
    let mut title = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && c.is_ascii_lowercase() {
            title.push(c.to_ascii_uppercase());
        } else {
            title.push(c);
        }
        at_word_start = c == ' ' || c == '/';
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_term_with_slash_aside() {
        let label = HeaderLabel::new("NEAR TERM /Through Tonight/", "PQR");
        assert_eq!(label.main, "Near Term");
        assert_eq!(label.aside.as_deref(), Some("through tonight"));
        assert_eq!(label.color, HeaderColor::Yellow);
        assert_eq!(label.display_aside().as_deref(), Some("Through Tonight"));
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("tonight through friday"), "Tonight Through Friday");
        assert_eq!(capitalize_words("sat/sun"), "Sat/Sun");
        assert_eq!(capitalize_words("issued 1042 am"), "Issued 1042 Am");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn test_bracket_and_paren_asides() {
        let bracket = HeaderLabel::new("NEAR TERM [THROUGH TONIGHT]", "");
        assert_eq!(bracket.main, "Near Term");
        assert_eq!(bracket.aside.as_deref(), Some("through tonight"));

        let paren = HeaderLabel::new("LONG TERM (SUNDAY THROUGH FRIDAY)", "");
        assert_eq!(paren.main, "Long Term");
        assert_eq!(paren.aside.as_deref(), Some("sunday through friday"));
        assert_eq!(paren.color, HeaderColor::Gold);
    }

    #[test]
    fn test_unknown_header_is_white() {
        let label = HeaderLabel::new("HYDROLOGY", "");
        assert_eq!(label.main, "Hydrology");
        assert_eq!(label.aside, None);
        assert_eq!(label.color, HeaderColor::White);
        assert_eq!(label.color.color(), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_color_table() {
        assert_eq!(HeaderColor::for_topic("FIRE"), HeaderColor::Red);
        assert_eq!(HeaderColor::for_topic("Fire Weather"), HeaderColor::Red);
        assert_eq!(HeaderColor::for_topic("short term"), HeaderColor::Yellow);
        assert_eq!(HeaderColor::for_topic("AVIATION"), HeaderColor::Cyan);
        assert_eq!(HeaderColor::for_topic("MARINE"), HeaderColor::Blue);
        assert_eq!(HeaderColor::for_topic("UPDATE"), HeaderColor::Green);
        assert_eq!(HeaderColor::for_topic("OUTLOOK"), HeaderColor::Green);
        assert_eq!(HeaderColor::for_topic("OVERVIEW"), HeaderColor::Green);
        assert_eq!(HeaderColor::for_topic(" SYNOPSIS "), HeaderColor::Green);
        assert_eq!(HeaderColor::for_topic("DISCUSSION"), HeaderColor::Pink);
        assert_eq!(HeaderColor::for_topic(""), HeaderColor::White);
    }

    #[test]
    fn test_rgb_values() {
        assert_eq!(HeaderColor::Cyan.rgb(), (0, 187, 255));
        assert_eq!(HeaderColor::Gold.rgb(), (255, 215, 0));
        assert_eq!(HeaderColor::Pink.color(), Color::Rgb(255, 100, 255));
    }

    #[test]
    fn test_aside_does_not_affect_color() {
        let label = HeaderLabel::new("AVIATION /18Z TAFS/", "");
        assert_eq!(label.color, HeaderColor::Cyan);
        assert_eq!(label.aside.as_deref(), Some("18z tafs"));
    }

    #[test]
    fn test_office_code_stays_uppercase() {
        assert_eq!(
            format_header_title("AVIATION FOR PQR TAF SITES", "PQR"),
            "Aviation For PQR Taf Sites"
        );
    }

    #[test]
    fn test_capitalizes_after_slash() {
        assert_eq!(
            format_header_title("SHORT TERM /TONIGHT THROUGH FRIDAY/", ""),
            "Short Term /Tonight Through Friday/"
        );
    }

    #[test]
    fn test_does_not_capitalize_after_paren() {
        assert_eq!(
            format_header_title("LONG TERM (SUNDAY ON)", ""),
            "Long Term (sunday On)"
        );
    }

    #[test]
    fn test_split_aside_without_aside() {
        assert_eq!(split_aside("  Marine  "), ("Marine", None));
    }

    #[test]
    fn test_split_aside_empty_aside_is_dropped() {
        assert_eq!(split_aside("Marine ()"), ("Marine", None));
    }

    #[test]
    fn test_split_aside_requires_trailing_position() {
        assert_eq!(split_aside("Short Term /Tonight/ Update"), ("Short Term /Tonight/ Update", None));
    }

    #[test]
    fn test_split_aside_mismatched_delimiters() {
        assert_eq!(split_aside("Short Term /Tonight]"), ("Short Term /Tonight]", None));
    }
}
