//! Plain-text output for `--print`.
//!
//! Uses the same layout as the viewer. With `ansi` set, styles become SGR
//! sequences and links become OSC 8 hyperlinks (when the link options allow
//! them); without it the output is bare text.

use crossterm::style::StyledContent;

use crate::discussion::Discussion;
use crate::linkify::{wrap_osc8_hyperlink, LinkOptions, TextRun};
use crate::ui::discussion_view::DiscussionLayout;
use crate::ui::hyperlink::content_style;

/// Render `discussion` as text wrapped to `width` columns.
pub fn render_plain(discussion: &Discussion, width: usize, options: &LinkOptions, ansi: bool) -> String {
    let layout = DiscussionLayout::build(discussion, width, options);
    let mut out = String::new();
    for row in &layout.rows {
        for run in &row.runs {
            out.push_str(&render_run(run, options.hyperlinks && ansi, ansi));
        }
        out.push('\n');
    }
    out
}

fn render_run(run: &TextRun, hyperlinks: bool, ansi: bool) -> String {
    if !ansi {
        return run.text.clone();
    }
    let styled = StyledContent::new(content_style(run.style), run.text.as_str()).to_string();
    match &run.link {
        Some(url) if hyperlinks => wrap_osc8_hyperlink(url, &styled),
        _ => styled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discussion() -> Discussion {
        Discussion::new(
            "Preamble\n\n.FIRE WEATHER...\nDry. See weather.gov/fire.\n&&\n",
            "KBOI",
            "2024-07-01T10:00:00+00:00",
        )
    }

    #[test]
    fn test_plain_output() {
        let out = render_plain(&discussion(), 20, &LinkOptions::default(), false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Preamble");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Fire Weather");
        assert_eq!(lines[3], "─".repeat(20));
        assert_eq!(lines[4], "Dry. See");
        assert_eq!(lines[5], "weather.gov/fire.");
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_ansi_output_colors_headers_and_links() {
        let out = render_plain(&discussion(), 40, &LinkOptions::default(), true);
        // Fire weather red, bold.
        assert!(out.contains("\x1b[38;2;255;0;0m"));
        assert!(out.contains("\x1b]8;;https://weather.gov/fire\x07"));
    }

    #[test]
    fn test_ansi_without_hyperlinks() {
        let options = LinkOptions {
            hyperlinks: false,
            ..LinkOptions::default()
        };
        let out = render_plain(&discussion(), 40, &options, true);
        assert!(!out.contains("\x1b]8;;"));
    }
}
