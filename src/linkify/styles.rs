//! Link style and OSC 8 hyperlink utilities

use ratatui::style::{Color, Modifier, Style};

/// Style for links - blue and underlined
pub const STYLE_LINK: Style = Style::new()
    .fg(Color::LightBlue)
    .add_modifier(Modifier::UNDERLINED);

/// Style for the currently selected link
pub const STYLE_LINK_SELECTED: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightBlue)
    .add_modifier(Modifier::UNDERLINED);

/// Create an OSC 8 hyperlink escape sequence that wraps text
///
/// OSC 8 format: `\x1B]8;;{url}\x07{text}\x1B]8;;\x07`
/// This creates a clickable hyperlink in supported terminals (iTerm2, Konsole, etc.)
pub fn wrap_osc8_hyperlink(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", url, text)
}
