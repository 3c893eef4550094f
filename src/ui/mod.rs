//! UI rendering for the discussion viewer
//!
//! The screen is three stacked areas:
//! - Title bar: office, issuance time and a marker for unseen discussions
//! - Discussion: the scrolled discussion or a centered state message
//! - Status bar: selected link, notices or key hints, plus scroll position

mod discussion_view;
mod hyperlink;
mod print;
mod status;
mod theme;
mod wrap;

pub use discussion_view::{
    render_discussion, DiscussionLayout, DiscussionView, LinkTarget, Row, RowKind, Section,
    STICKY_ROWS,
};
pub use hyperlink::{write_hyperlinks, HyperlinkCell};
pub use print::render_plain;
pub use status::{
    get_spinner_char, state_message, MESSAGE_FAILED, MESSAGE_LOADING, MESSAGE_NOT_AVAILABLE,
};
pub use theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_NEW, COLOR_TEXT};
pub use wrap::{collapse_whitespace, row_text, wrap_block, wrap_runs};

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::discussion::{Discussion, DiscussionState};
use theme::{STYLE_DIM, STYLE_TITLE};

/// Key hints shown when nothing else needs the status bar.
const KEY_HINTS: &str = "q quit  j/k scroll  tab link  enter open  r reload";

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &mut App) {
    let [title_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let state = app.discussion_state();
    let spinner_frame = app.spinner_frame();
    render_title_bar(frame, title_area, app, &state);
    render_discussion(
        frame,
        body_area,
        &mut app.view,
        &state,
        &app.link_options,
        spinner_frame,
    );
    render_status_bar(frame, status_area, app, &state);
}

/// Title bar: `Area Forecast Discussion · KPQR · Issued ... · new`
fn render_title_bar(frame: &mut Frame, area: Rect, app: &App, state: &DiscussionState) {
    let separator = Span::styled(" · ", STYLE_DIM);
    let mut spans = vec![Span::styled(" Area Forecast Discussion", STYLE_TITLE)];

    match state.discussion() {
        Some(discussion) => {
            spans.push(separator.clone());
            spans.push(Span::raw(discussion.issuing_office.clone()));
            spans.push(separator.clone());
            spans.push(Span::styled(issued_label(discussion), STYLE_DIM));
            if app.is_new {
                spans.push(separator);
                spans.push(Span::styled("new", Style::default().fg(COLOR_NEW)));
            }
        }
        None => {
            spans.push(separator);
            spans.push(Span::styled(app.source_description(), STYLE_DIM));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Human readable issuance time.
pub fn issued_label(discussion: &Discussion) -> String {
    match discussion.issued_at() {
        Some(issued) => format!("Issued {}", issued.format("%a %b %-d %H:%M UTC")),
        None if discussion.issuance_time.is_empty() => "Issued at unknown time".to_string(),
        None => format!("Issued {}", discussion.issuance_time),
    }
}

/// Status bar: link/notice/hints on the left, position on the right.
///
/// The position gets the width it needs; the left side is clipped to what
/// remains.
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, state: &DiscussionState) {
    let right = status_position(app, state);
    let [left_area, right_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(right.width() as u16),
    ])
    .areas(area);

    let left = if let Some(url) = app.view.selected_url() {
        Line::from(vec![
            Span::styled(" → ", STYLE_DIM),
            Span::styled(url.to_string(), crate::linkify::STYLE_LINK),
        ])
    } else if let Some(notice) = &app.notice {
        Line::from(Span::raw(format!(" {}", notice)))
    } else {
        Line::from(Span::styled(format!(" {}", KEY_HINTS), STYLE_DIM))
    };
    frame.render_widget(Paragraph::new(left), left_area);
    frame.render_widget(
        Paragraph::new(right).alignment(Alignment::Right),
        right_area,
    );
}

/// `Section · NN% ` for a loaded discussion, empty otherwise.
fn status_position(app: &App, state: &DiscussionState) -> Line<'static> {
    if state.discussion().is_none() {
        return Line::default();
    }
    let section = app
        .view
        .layout()
        .and_then(|layout| layout.section_at(app.view.scroll()))
        .map(|section| section.label.main.clone());
    let mut spans = vec![Span::raw(" ")];
    if let Some(section) = section {
        spans.push(Span::styled(section, STYLE_DIM));
        spans.push(Span::styled(" · ", STYLE_DIM));
    }
    spans.push(Span::styled(format!("{:>3}% ", app.view.scroll_percentage()), STYLE_DIM));
    Line::from(spans)
}
