//! Load-state messages
//!
//! Everything the viewer shows instead of a discussion: the loading
//! spinner and the fixed failure notices.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::discussion::DiscussionState;
use crate::ui::theme::{COLOR_NOTICE, COLOR_SPINNER};

/// Spinner animation frames
const SPINNER_FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Shown for missing and failed discussions.
pub const MESSAGE_FAILED: &str = "Discussion failed to load. Try again later.";

/// Shown when the office has no discussion.
pub const MESSAGE_NOT_AVAILABLE: &str = "Discussion not currently available. Try again later.";

/// Shown next to the spinner.
pub const MESSAGE_LOADING: &str = "Loading discussion...";

/// Get the current spinner character based on frame
pub fn get_spinner_char(frame: usize) -> char {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Message lines for a state that has no discussion to show.
///
/// Returns `None` for [`DiscussionState::Loaded`].
pub fn state_message(state: &DiscussionState, frame: usize) -> Option<Line<'static>> {
    let notice = Style::default().fg(COLOR_NOTICE);
    match state {
        DiscussionState::Missing | DiscussionState::Failed => {
            Some(Line::from(Span::styled(MESSAGE_FAILED, notice)))
        }
        DiscussionState::NotAvailable => {
            Some(Line::from(Span::styled(MESSAGE_NOT_AVAILABLE, notice)))
        }
        DiscussionState::Pending => Some(Line::from(vec![
            Span::styled(
                format!("{} ", get_spinner_char(frame)),
                Style::default().fg(COLOR_SPINNER),
            ),
            Span::styled(
                MESSAGE_LOADING,
                Style::default()
                    .fg(COLOR_SPINNER)
                    .add_modifier(Modifier::BOLD),
            ),
        ])),
        DiscussionState::Loaded(_) => None,
    }
}
