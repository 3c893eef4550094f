//! Fixed-width text normalization.
//!
//! NWS products are hard-wrapped at roughly 66 columns. Single line breaks
//! inside a paragraph are wrap artifacts and get joined with a space; blank
//! lines separate paragraphs and are kept.

/// Line that terminates a section in a discussion bulletin.
const SECTION_END: &str = "&&";

/// Join hard-wrapped lines back into paragraphs.
///
/// A line break is kept when either neighbor is blank, when the next line
/// starts a `.HEADER...` section, or when either side is a `&&` section
/// terminator. All other breaks become a single space. Trailing whitespace
/// on each line is dropped and `\r\n` is treated as `\n`.
pub fn undo_fixed_width_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<&str> = None;

    for raw in text.split('\n') {
        let line = raw.trim_end_matches(['\r', ' ', '\t']);
        if let Some(prev_line) = prev {
            out.push(if keeps_break(prev_line, line) { '\n' } else { ' ' });
        }
        out.push_str(line);
        prev = Some(line);
    }

    out
}

fn keeps_break(prev: &str, next: &str) -> bool {
    prev.trim().is_empty()
        || next.trim().is_empty()
        || next.starts_with('.')
        || prev.trim() == SECTION_END
        || next.trim() == SECTION_END
}
