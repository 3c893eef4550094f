//! Word wrapping for linkified text
//!
//! Text follows pre-line rules: line breaks are kept, runs of whitespace
//! collapse to one space, and lines wrap at word boundaries. Words wider
//! than the viewport are split by display width.

use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

use crate::linkify::{linkify, LinkOptions, TextRun};

/// Collapse whitespace runs to a single space and trim the ends.
pub fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Wrap a block of text to `width` columns.
///
/// Every source line yields at least one row; blank source lines yield an
/// empty row.
pub fn wrap_block(text: &str, width: usize, style: Style, options: &LinkOptions) -> Vec<Vec<TextRun>> {
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let collapsed = collapse_whitespace(line);
        if collapsed.is_empty() {
            rows.push(Vec::new());
            continue;
        }
        rows.extend(wrap_runs(&linkify(&collapsed, style, options), width));
    }
    rows
}

/// A word: adjacent runs with no space between them.
type Word = Vec<TextRun>;

fn split_words(runs: &[TextRun]) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current: Word = Vec::new();

    for run in runs {
        for (i, chunk) in run.text.split(' ').enumerate() {
            if i > 0 && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            if !chunk.is_empty() {
                current.push(TextRun {
                    text: chunk.to_string(),
                    style: run.style,
                    link: run.link.clone(),
                });
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn word_width(word: &Word) -> usize {
    word.iter().map(TextRun::width).sum()
}

/// Wrap single-line runs to `width` columns.
///
/// A width of zero disables wrapping.
pub fn wrap_runs(runs: &[TextRun], width: usize) -> Vec<Vec<TextRun>> {
    let words = split_words(runs);
    if words.is_empty() {
        return vec![Vec::new()];
    }
    if width == 0 {
        let mut row = Vec::new();
        for (i, word) in words.into_iter().enumerate() {
            if i > 0 {
                push_space(&mut row);
            }
            row.extend(word);
        }
        return vec![merge_runs(row)];
    }

    let mut rows: Vec<Vec<TextRun>> = Vec::new();
    let mut row: Vec<TextRun> = Vec::new();
    let mut row_width = 0;

    for word in words {
        let w = word_width(&word);
        if row_width > 0 && row_width + 1 + w <= width {
            push_space(&mut row);
            row.extend(word);
            row_width += 1 + w;
            continue;
        }

        if row_width > 0 {
            rows.push(merge_runs(std::mem::take(&mut row)));
            row_width = 0;
        }

        if w <= width {
            row.extend(word);
            row_width = w;
        } else {
            let mut pieces = hard_split(word, width);
            // The last piece stays open so following words can join it.
            if let Some(last) = pieces.pop() {
                rows.extend(pieces.into_iter().map(merge_runs));
                row_width = last.iter().map(TextRun::width).sum();
                row = last;
            }
        }
    }

    if !row.is_empty() {
        rows.push(merge_runs(row));
    }
    rows
}

fn push_space(row: &mut Vec<TextRun>) {
    // The space takes the style of the text before it, but never a link.
    let style = row.last().filter(|run| run.link.is_none()).map(|run| run.style);
    row.push(TextRun::plain(" ", style.unwrap_or_default()));
}

/// Split an over-wide word into rows of at most `width` columns.
fn hard_split(word: Word, width: usize) -> Vec<Vec<TextRun>> {
    let mut rows = Vec::new();
    let mut row: Vec<TextRun> = Vec::new();
    let mut row_width = 0;

    for run in word {
        let mut piece = String::new();
        for c in run.text.chars() {
            let cw = c.width().unwrap_or(0);
            if row_width + cw > width && row_width > 0 {
                if !piece.is_empty() {
                    row.push(TextRun {
                        text: std::mem::take(&mut piece),
                        style: run.style,
                        link: run.link.clone(),
                    });
                }
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            piece.push(c);
            row_width += cw;
        }
        if !piece.is_empty() {
            row.push(TextRun {
                text: piece,
                style: run.style,
                link: run.link,
            });
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Merge adjacent runs that share style and link.
fn merge_runs(runs: Vec<TextRun>) -> Vec<TextRun> {
    let mut merged: Vec<TextRun> = Vec::with_capacity(runs.len());
    for run in runs {
        match merged.last_mut() {
            Some(last) if last.style == run.style && last.link == run.link => {
                last.text.push_str(&run.text);
            }
            _ => merged.push(run),
        }
    }
    merged
}

/// Visible text of a row.
pub fn row_text(row: &[TextRun]) -> String {
    row.iter().map(|run| run.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> LinkOptions {
        LinkOptions {
            hyperlinks: false,
            ..LinkOptions::default()
        }
    }

    fn texts(rows: &[Vec<TextRun>]) -> Vec<String> {
        rows.iter().map(|row| row_text(row)).collect()
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a   b\tc  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        let rows = wrap_block("the quick brown fox jumps", 10, Style::default(), &opts());
        assert_eq!(texts(&rows), vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_keeps_line_breaks_and_blank_lines() {
        let rows = wrap_block("one\n\ntwo   three", 40, Style::default(), &opts());
        assert_eq!(texts(&rows), vec!["one", "", "two three"]);
    }

    #[test]
    fn test_long_word_is_split() {
        let rows = wrap_block("abcdefghijkl xy", 5, Style::default(), &opts());
        assert_eq!(texts(&rows), vec!["abcde", "fghij", "kl xy"]);
    }

    #[test]
    fn test_rows_never_exceed_width() {
        let text = "Showers taper off tonight as the upper trough exits. See https://www.weather.gov/pqr/forecastdiscussion for details.";
        for width in [8, 13, 20, 33, 80] {
            for row in wrap_block(text, width, Style::default(), &opts()) {
                let w: usize = row.iter().map(TextRun::width).sum();
                assert!(w <= width, "row {:?} wider than {}", row_text(&row), width);
            }
        }
    }

    #[test]
    fn test_link_stays_a_link_across_wrap() {
        let rows = wrap_block("see weather.gov/pqr now", 12, Style::default(), &opts());
        assert_eq!(texts(&rows), vec!["see", "weather.gov/", "pqr now"]);
        assert_eq!(rows[1][0].link.as_deref(), Some("https://weather.gov/pqr"));
        assert_eq!(rows[2][0].link.as_deref(), Some("https://weather.gov/pqr"));
        assert_eq!(rows[2][0].text, "pqr");
        assert!(rows[2][1].link.is_none());
    }

    #[test]
    fn test_punctuation_attached_to_link_word() {
        let rows = wrap_block("(weather.gov)", 40, Style::default(), &opts());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[0][1].text, "weather.gov");
        assert!(rows[0][1].link.is_some());
    }

    #[test]
    fn test_zero_width_does_not_wrap() {
        let rows = wrap_block("a b  c", 0, Style::default(), &opts());
        assert_eq!(texts(&rows), vec!["a b c"]);
    }
}
