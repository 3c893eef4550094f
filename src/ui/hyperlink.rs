//! OSC 8 hyperlinks for the interactive viewer.
//!
//! Ratatui buffers are cell grids, so escape sequences inside a span would
//! be printed as text. After a frame is drawn, each visible link run is
//! written again at its cell position, with the same glyphs and style,
//! wrapped in OSC 8. The buffer and the screen stay in sync because the
//! visible text does not change.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color as TermColor, ContentStyle, Print, StyledContent},
};
use ratatui::style::{Color, Modifier, Style};

use crate::linkify::wrap_osc8_hyperlink;

/// A link run at its position on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperlinkCell {
    /// Column of the first character
    pub x: u16,
    /// Screen row
    pub y: u16,
    /// Link target
    pub url: String,
    /// Visible text, exactly as drawn
    pub text: String,
    /// Style the text was drawn with
    pub style: Style,
}

/// Write `cells` as OSC 8 hyperlinks over the current frame.
pub fn write_hyperlinks<W: Write>(writer: &mut W, cells: &[HyperlinkCell]) -> io::Result<()> {
    if cells.is_empty() {
        return Ok(());
    }
    for cell in cells {
        let styled = StyledContent::new(content_style(cell.style), cell.text.as_str()).to_string();
        queue!(
            writer,
            MoveTo(cell.x, cell.y),
            Print(wrap_osc8_hyperlink(&cell.url, &styled))
        )?;
    }
    writer.flush()
}

/// Crossterm equivalent of a ratatui style.
pub(crate) fn content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = style.fg.and_then(term_color);
    content.background_color = style.bg.and_then(term_color);
    if style.add_modifier.contains(Modifier::BOLD) {
        content.attributes.set(Attribute::Bold);
    }
    if style.add_modifier.contains(Modifier::UNDERLINED) {
        content.attributes.set(Attribute::Underlined);
    }
    content
}

fn term_color(color: Color) -> Option<TermColor> {
    Some(match color {
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Black => TermColor::Black,
        Color::White => TermColor::White,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightBlue => TermColor::Blue,
        Color::LightGreen => TermColor::Green,
        Color::Yellow => TermColor::DarkYellow,
        Color::Red => TermColor::DarkRed,
        _ => return None,
    })
}
