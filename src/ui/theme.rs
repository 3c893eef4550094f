//! Color theme constants for the discussion viewer
//!
//! Header colors come from [`crate::discussion::HeaderColor`]; everything
//! else on screen uses the minimal dark palette below.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Body text
pub const COLOR_TEXT: Color = Color::Gray;

/// "New discussion" marker in the title bar
pub const COLOR_NEW: Color = Color::LightGreen;

/// Loading spinner
pub const COLOR_SPINNER: Color = Color::Yellow;

/// Failed / not available messages
pub const COLOR_NOTICE: Color = Color::Gray;

// ============================================================================
// Styles
// ============================================================================

/// Discussion body text
pub const STYLE_BODY: Style = Style::new().fg(COLOR_TEXT);

/// Divider under a section header
pub const STYLE_DIVIDER: Style = Style::new().fg(COLOR_BORDER);

/// Title bar
pub const STYLE_TITLE: Style = Style::new().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD);

/// Secondary text in the title and status bars
pub const STYLE_DIM: Style = Style::new().fg(COLOR_DIM);

/// Section header topic in the given color.
pub fn header_main_style(color: Color) -> Style {
    Style::new().fg(color).add_modifier(Modifier::BOLD)
}

/// Section header aside in the given color.
pub fn header_aside_style(color: Color) -> Style {
    Style::new().fg(color)
}
