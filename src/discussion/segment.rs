//! Discussion segmentation.
//!
//! Splits normalized bulletin text into prose blocks and labeled sections.
//! A section starts at a line of the form `.HEADER...` and runs until the
//! next such line or the end of the text:
//!
//! ```text
//! .SHORT TERM /TONIGHT THROUGH FRIDAY/...
//! Showers taper off tonight...
//! &&
//! ```
//!
//! Segmentation is lazy and zero-copy: [`Segments`] yields slices of the
//! input in document order.

use once_cell::sync::Lazy;
use regex::{Match, Matches, Regex};

/// Section header line: a newline (or start of text), a `.`, one or more
/// characters that are neither newline nor `.`, then `...`.
static HEADER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\n)\.[^\n.]+\.{3}").expect("Invalid header regex pattern"));

/// Marker that closes a section body.
const SECTION_END: &str = "&&";

/// A labeled section of a discussion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscussionPart<'a> {
    /// Header text without the leading `.` and trailing `...`
    pub header: &'a str,
    /// Section body, trimmed, without the trailing `&&`
    pub body: &'a str,
}

/// One entry of a segmented discussion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any section (preamble, trailing notes), trimmed
    Prose(&'a str),
    /// A `.HEADER...` section
    Part(DiscussionPart<'a>),
}

impl<'a> Segment<'a> {
    /// The section, if this segment is one.
    pub fn as_part(&self) -> Option<&DiscussionPart<'a>> {
        match self {
            Segment::Part(part) => Some(part),
            Segment::Prose(_) => None,
        }
    }
}

/// Lazy iterator over the segments of a discussion.
///
/// Created by [`segments`].
pub struct Segments<'a> {
    text: &'a str,
    matches: Matches<'static, 'a>,
    peeked: Option<Match<'a>>,
    cursor: usize,
}

impl<'a> Segments<'a> {
    fn new(text: &'a str) -> Self {
        let mut matches = HEADER_REGEX.find_iter(text);
        let peeked = matches.next();
        Self {
            text,
            matches,
            peeked,
            cursor: 0,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next_start = self.peeked.map_or(self.text.len(), |m| m.start());

            if self.cursor < next_start {
                let piece = &self.text[self.cursor..next_start];
                self.cursor = next_start;
                let prose = piece.trim();
                if !prose.is_empty() {
                    return Some(Segment::Prose(prose));
                }
                continue;
            }

            let header = self.peeked.take()?;
            self.peeked = self.matches.next();
            let body_end = self.peeked.map_or(self.text.len(), |m| m.start());
            let body = &self.text[header.end()..body_end];
            self.cursor = body_end;

            // A header with nothing after it has no section to label.
            if body.is_empty() {
                tracing::debug!(header = header.as_str().trim(), "skipping header without body");
                continue;
            }

            return Some(Segment::Part(DiscussionPart {
                header: header_text(header.as_str()),
                body: body_text(body),
            }));
        }
    }
}

/// Segment normalized discussion text lazily.
pub fn segments(text: &str) -> Segments<'_> {
    Segments::new(text)
}

/// Segment normalized discussion text into a vector.
pub fn parse_discussion(text: &str) -> Vec<Segment<'_>> {
    segments(text).collect()
}

fn header_text(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
    trimmed.strip_suffix("...").unwrap_or(trimmed).trim()
}

fn body_text(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_suffix(SECTION_END).unwrap_or(trimmed).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part<'a>(header: &'a str, body: &'a str) -> Segment<'a> {
        Segment::Part(DiscussionPart { header, body })
    }

    #[test]
    fn test_no_headers_returns_whole_text() {
        let text = "Area Forecast Discussion\nNational Weather Service Portland OR";
        assert_eq!(parse_discussion(text), vec![Segment::Prose(text)]);
    }

    #[test]
    fn test_two_sections() {
        let text = ".FIRE...\nbody1&&\n.MARINE...\nbody2";
        assert_eq!(
            parse_discussion(text),
            vec![part("FIRE", "body1"), part("MARINE", "body2")]
        );
    }

    #[test]
    fn test_preamble_then_sections_then_trailer() {
        let text = "FXUS66 KPQR 011542\n\n.SYNOPSIS...Dry and warm.\n&&\n\n.AVIATION...VFR.\n&&\n\n$$\n";
        assert_eq!(
            parse_discussion(text),
            vec![
                Segment::Prose("FXUS66 KPQR 011542"),
                part("SYNOPSIS", "Dry and warm."),
                part("AVIATION", "VFR.\n&&\n\n$$"),
            ]
        );
    }

    #[test]
    fn test_header_with_aside_keeps_aside() {
        let text = "intro\n.SHORT TERM /TONIGHT THROUGH FRIDAY/...\nRain.";
        let parts: Vec<_> = segments(text).filter_map(|s| s.as_part().copied()).collect();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].header, "SHORT TERM /TONIGHT THROUGH FRIDAY/");
        assert_eq!(parts[0].body, "Rain.");
    }

    #[test]
    fn test_adjacent_headers_skip_empty_section() {
        let text = "intro\n.UPDATE...\n.DISCUSSION...\nDetails here.";
        assert_eq!(
            parse_discussion(text),
            vec![Segment::Prose("intro"), part("DISCUSSION", "Details here.")]
        );
    }

    #[test]
    fn test_trailing_header_without_body_is_skipped() {
        let text = "intro\n.MARINE...";
        assert_eq!(parse_discussion(text), vec![Segment::Prose("intro")]);
    }

    #[test]
    fn test_whitespace_body_yields_empty_section() {
        let text = ".FIRE...\n  \n.MARINE...\nSeas 5 ft.";
        assert_eq!(
            parse_discussion(text),
            vec![part("FIRE", ""), part("MARINE", "Seas 5 ft.")]
        );
    }

    #[test]
    fn test_dot_lines_without_ellipsis_are_prose() {
        let text = "Temperatures near 70.\n.Not a header\nmore";
        assert_eq!(parse_discussion(text), vec![Segment::Prose(text)]);
    }

    #[test]
    fn test_header_inline_text_goes_to_body() {
        let text = "x\n.SYNOPSIS...High pressure builds.";
        assert_eq!(
            parse_discussion(text),
            vec![Segment::Prose("x"), part("SYNOPSIS", "High pressure builds.")]
        );
    }

    #[test]
    fn test_only_strips_one_trailing_marker() {
        let text = ".FIRE...\nbody&&&&";
        assert_eq!(parse_discussion(text), vec![part("FIRE", "body&&")]);
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_discussion("").is_empty());
    }

    #[test]
    fn test_iterator_is_lazy() {
        let text = ".FIRE...\nbody1\n.MARINE...\nbody2\n.AVIATION...\nbody3";
        let mut iter = segments(text);
        assert_eq!(iter.next(), Some(part("FIRE", "body1")));
        assert_eq!(iter.next(), Some(part("MARINE", "body2")));
        assert_eq!(iter.next(), Some(part("AVIATION", "body3")));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
