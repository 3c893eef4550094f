//! Discussion view
//!
//! The discussion is laid out once per (discussion, width) into a flat list
//! of rows: section headers, dividers, wrapped body text and spacers between
//! segments. Rendering is then a window over those rows. When the top of the
//! window sits inside a section whose header has scrolled away, the header
//! and its divider are pinned over the first two rows.

use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::discussion::{segments, Discussion, DiscussionState, HeaderLabel, Segment};
use crate::linkify::{LinkOptions, TextRun, STYLE_LINK_SELECTED};
use crate::ui::status::state_message;
use crate::ui::hyperlink::HyperlinkCell;
use crate::ui::theme::{header_aside_style, header_main_style, STYLE_BODY, STYLE_DIVIDER};
use crate::ui::wrap::wrap_block;

/// Rows covered by a pinned header (header + divider).
pub const STICKY_ROWS: usize = 2;

/// What a layout row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Section title
    Header,
    /// Rule under a section title
    Divider,
    /// Wrapped text
    Body,
    /// Gap between segments
    Spacer,
}

/// One screen row of the laid out discussion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: RowKind,
    /// Index into [`DiscussionLayout::sections`] for rows inside a section
    pub section: Option<usize>,
    pub runs: Vec<TextRun>,
}

impl Row {
    fn spacer() -> Self {
        Self {
            kind: RowKind::Spacer,
            section: None,
            runs: Vec::new(),
        }
    }

    /// Visible text of the row.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// A labeled section of the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: HeaderLabel,
    /// Row index of the section header
    pub header_row: usize,
}

/// A link and the (row, run) positions it occupies.
///
/// A link wrapped over several rows is a single target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub url: String,
    pub positions: Vec<(usize, usize)>,
}

/// A discussion laid out for a given width.
#[derive(Debug, Clone, Default)]
pub struct DiscussionLayout {
    pub rows: Vec<Row>,
    pub sections: Vec<Section>,
    pub links: Vec<LinkTarget>,
    pub width: usize,
}

impl DiscussionLayout {
    /// Lay out `discussion` for `width` columns.
    pub fn build(discussion: &Discussion, width: usize, options: &LinkOptions) -> Self {
        let width = width.max(1);
        let text = discussion.normalized_text();
        let office_code = discussion.office_code();

        let mut rows: Vec<Row> = Vec::new();
        let mut sections: Vec<Section> = Vec::new();

        for segment in segments(&text) {
            if !rows.is_empty() {
                rows.push(Row::spacer());
            }
            match segment {
                Segment::Prose(prose) => {
                    push_body(&mut rows, prose, None, width, options);
                }
                Segment::Part(part) => {
                    let label = HeaderLabel::new(part.header, office_code);
                    let index = sections.len();
                    rows.push(Row {
                        kind: RowKind::Header,
                        section: Some(index),
                        runs: header_runs(&label),
                    });
                    sections.push(Section {
                        label,
                        header_row: rows.len() - 1,
                    });
                    rows.push(Row {
                        kind: RowKind::Divider,
                        section: Some(index),
                        runs: vec![TextRun::plain("─".repeat(width), STYLE_DIVIDER)],
                    });
                    push_body(&mut rows, part.body, Some(index), width, options);
                }
            }
        }

        let links = collect_links(&rows);
        tracing::debug!(
            rows = rows.len(),
            sections = sections.len(),
            links = links.len(),
            width,
            "discussion laid out"
        );

        Self {
            rows,
            sections,
            links,
            width,
        }
    }

    /// Section containing `row`.
    pub fn section_at(&self, row: usize) -> Option<&Section> {
        self.rows
            .get(row)
            .and_then(|r| r.section)
            .and_then(|i| self.sections.get(i))
    }

    /// Section whose header is pinned when the window starts at `offset`.
    pub fn sticky_section(&self, offset: usize) -> Option<usize> {
        let index = self.rows.get(offset)?.section?;
        (self.sections.get(index)?.header_row < offset).then_some(index)
    }
}

fn header_runs(label: &HeaderLabel) -> Vec<TextRun> {
    let color = label.color.color();
    let mut runs = vec![TextRun::plain(label.main.clone(), header_main_style(color))];
    if let Some(aside) = label.display_aside() {
        runs.push(TextRun::plain(format!(" ({})", aside), header_aside_style(color)));
    }
    runs
}

fn push_body(
    rows: &mut Vec<Row>,
    text: &str,
    section: Option<usize>,
    width: usize,
    options: &LinkOptions,
) {
    rows.extend(wrap_block(text, width, STYLE_BODY, options).into_iter().map(|runs| Row {
        kind: RowKind::Body,
        section,
        runs,
    }));
}

fn collect_links(rows: &[Row]) -> Vec<LinkTarget> {
    let mut links: Vec<LinkTarget> = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        for (j, run) in row.runs.iter().enumerate() {
            let Some(url) = &run.link else { continue };
            // A link run that starts a row continues a link that ended the previous one.
            let continues = j == 0
                && links.last().is_some_and(|link| {
                    link.url == *url
                        && link.positions.last().is_some_and(|&(pr, pj)| {
                            pr + 1 == r && pj + 1 == rows[pr].runs.len()
                        })
                });
            match links.last_mut() {
                Some(link) if continues => link.positions.push((r, j)),
                _ => links.push(LinkTarget {
                    url: url.clone(),
                    positions: vec![(r, j)],
                }),
            }
        }
    }
    links
}

/// Scroll and selection state of the discussion view.
#[derive(Debug, Default)]
pub struct DiscussionView {
    layout: Option<DiscussionLayout>,
    /// (office, issuance time, width) the layout was built for
    layout_key: Option<(String, String, usize)>,
    scroll: usize,
    selected_link: Option<usize>,
    viewport_height: usize,
    /// Screen area of the last draw
    area: Option<Rect>,
}

impl DiscussionView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current layout, if a discussion has been prepared.
    pub fn layout(&self) -> Option<&DiscussionLayout> {
        self.layout.as_ref()
    }

    /// Make sure the layout matches `discussion` at `width`.
    ///
    /// A different discussion resets scroll and selection; a width change
    /// keeps the scroll position clamped to the new layout.
    pub fn prepare(&mut self, discussion: &Discussion, width: usize, options: &LinkOptions) {
        let (office, issued) = discussion.key();
        if let Some((o, i, w)) = &self.layout_key {
            if o == office && i == issued && *w == width {
                return;
            }
            if o != office || i != issued {
                self.scroll = 0;
                self.selected_link = None;
            }
        }

        let layout = DiscussionLayout::build(discussion, width, options);
        if self.selected_link.is_some_and(|i| i >= layout.links.len()) {
            self.selected_link = None;
        }
        self.layout = Some(layout);
        self.layout_key = Some((office.to_string(), issued.to_string(), width));
        self.clamp_scroll();
    }

    /// Drop the layout; the next discussion starts at the top.
    pub fn clear(&mut self) {
        self.layout = None;
        self.layout_key = None;
        self.scroll = 0;
        self.selected_link = None;
        self.area = None;
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.clamp_scroll();
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Index of the first visible row.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn max_scroll(&self) -> usize {
        self.layout
            .as_ref()
            .map_or(0, |layout| layout.rows.len().saturating_sub(self.viewport_height))
    }

    /// Get scroll percentage (0-100)
    pub fn scroll_percentage(&self) -> u8 {
        let max = self.max_scroll();
        if max == 0 {
            100
        } else {
            ((self.scroll * 100) / max) as u8
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    fn page_size(&self) -> isize {
        self.viewport_height.saturating_sub(STICKY_ROWS).max(1) as isize
    }

    pub fn page_down(&mut self) {
        self.scroll_by(self.page_size());
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-self.page_size());
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// URL of the selected link.
    pub fn selected_url(&self) -> Option<&str> {
        let layout = self.layout.as_ref()?;
        layout
            .links
            .get(self.selected_link?)
            .map(|link| link.url.as_str())
    }

    /// Select the next link, wrapping around, and scroll it into view.
    pub fn select_next_link(&mut self) -> Option<&str> {
        let count = self.link_count();
        if count == 0 {
            return None;
        }
        let next = self.selected_link.map_or(0, |i| (i + 1) % count);
        self.select_link(next)
    }

    /// Select the previous link, wrapping around, and scroll it into view.
    pub fn select_prev_link(&mut self) -> Option<&str> {
        let count = self.link_count();
        if count == 0 {
            return None;
        }
        let prev = self
            .selected_link
            .map_or(count - 1, |i| (i + count - 1) % count);
        self.select_link(prev)
    }

    fn link_count(&self) -> usize {
        self.layout.as_ref().map_or(0, |layout| layout.links.len())
    }

    fn select_link(&mut self, index: usize) -> Option<&str> {
        let row = self
            .layout
            .as_ref()?
            .links
            .get(index)?
            .positions
            .first()
            .map(|&(row, _)| row)?;
        self.selected_link = Some(index);
        self.ensure_row_visible(row);
        self.selected_url()
    }

    fn ensure_row_visible(&mut self, row: usize) {
        let Some(layout) = &self.layout else { return };
        let reserved = match layout.section_at(row) {
            Some(section) if section.header_row + STICKY_ROWS <= row => STICKY_ROWS,
            _ => 0,
        };
        if row < self.scroll + reserved {
            self.scroll = row.saturating_sub(reserved);
        } else if self.viewport_height > 0 && row >= self.scroll + self.viewport_height {
            self.scroll = row + 1 - self.viewport_height;
        }
        self.clamp_scroll();
    }

    /// Layout rows shown in the current window, top to bottom, sticky
    /// header included.
    fn visible_rows(&self, layout: &DiscussionLayout) -> Vec<usize> {
        let height = self.viewport_height;
        let mut rows = Vec::with_capacity(height);

        if height > STICKY_ROWS {
            if let Some(index) = layout.sticky_section(self.scroll) {
                let header_row = layout.sections[index].header_row;
                rows.push(header_row);
                rows.push(header_row + 1);
            }
        }

        let start = self.scroll + rows.len();
        let end = (self.scroll + height).min(layout.rows.len());
        rows.extend(start..end);
        rows
    }

    /// Lines for the current window, sticky header included.
    pub fn visible_lines(&self) -> Vec<Line<'static>> {
        let Some(layout) = &self.layout else {
            return Vec::new();
        };
        self.visible_rows(layout)
            .into_iter()
            .map(|row| self.row_line(layout, row))
            .collect()
    }

    /// Record where the window is drawn; its height is the viewport height.
    pub fn set_area(&mut self, area: Rect) {
        self.area = Some(area);
        self.set_viewport_height(area.height as usize);
    }

    /// Screen positions of the link runs in the last drawn window.
    pub fn visible_links(&self) -> Vec<HyperlinkCell> {
        let (Some(layout), Some(area)) = (&self.layout, self.area) else {
            return Vec::new();
        };
        let selected = self.selected_positions(layout);

        let mut cells = Vec::new();
        for (line, row) in self.visible_rows(layout).into_iter().enumerate() {
            let y = area.y + line as u16;
            let mut x = area.x as usize;
            for (j, run) in layout.rows[row].runs.iter().enumerate() {
                if let Some(url) = &run.link {
                    if x < (area.x + area.width) as usize {
                        cells.push(HyperlinkCell {
                            x: x as u16,
                            y,
                            url: url.clone(),
                            text: run.text.clone(),
                            style: if selected.contains(&(row, j)) {
                                STYLE_LINK_SELECTED
                            } else {
                                run.style
                            },
                        });
                    }
                }
                x += run.width();
            }
        }
        cells
    }

    fn selected_positions<'a>(&self, layout: &'a DiscussionLayout) -> &'a [(usize, usize)] {
        self.selected_link
            .and_then(|i| layout.links.get(i))
            .map(|link| link.positions.as_slice())
            .unwrap_or_default()
    }

    fn row_line(&self, layout: &DiscussionLayout, row: usize) -> Line<'static> {
        let selected = self.selected_positions(layout);
        let spans: Vec<_> = layout.rows[row]
            .runs
            .iter()
            .enumerate()
            .map(|(j, run)| {
                let mut run = run.clone();
                if selected.contains(&(row, j)) {
                    run.style = STYLE_LINK_SELECTED;
                }
                run.into_span()
            })
            .collect();
        Line::from(spans)
    }
}

/// Render the discussion area for the current state.
pub fn render_discussion(
    frame: &mut Frame,
    area: Rect,
    view: &mut DiscussionView,
    state: &DiscussionState,
    options: &LinkOptions,
    spinner_frame: usize,
) {
    if let Some(message) = state_message(state, spinner_frame) {
        view.clear();
        let y = area.y + area.height / 2;
        let line_area = Rect::new(area.x, y, area.width, area.height.min(1));
        frame.render_widget(Paragraph::new(message).alignment(Alignment::Center), line_area);
        return;
    }

    let Some(discussion) = state.discussion() else {
        return;
    };
    view.prepare(discussion, area.width as usize, options);
    view.set_area(area);
    frame.render_widget(Paragraph::new(view.visible_lines()), area);
}
