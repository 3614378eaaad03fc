//! Navigation rail — the element whose top margin the controller drives.
//!
//! The rail is drawn `margin_rows` below the top of its area, so the margin
//! written by the controller becomes visible as empty rows above it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::core::page::Page;

use super::theme::Theme;

/// Rows of info card above the navigation entries (inside the border).
const HEADER_ROWS: u16 = 2;

/// Convert a pixel margin into whole terminal rows.  Negative or absent
/// margins render as zero.
pub fn margin_rows(margin_px: Option<i32>, cell_height_px: u32) -> u16 {
    let px = margin_px.unwrap_or(0).max(0) as u32;
    u16::try_from(px / cell_height_px.max(1)).unwrap_or(u16::MAX)
}

/// Where the rail box lands inside `area` after applying the margin.
fn rail_rect(area: Rect, margin_rows: u16, entries: usize) -> Rect {
    let wanted = HEADER_ROWS + entries as u16 + 2;
    let top = margin_rows.min(area.height.saturating_sub(1));
    let height = wanted.min(area.height - top);
    Rect::new(area.x, area.y + top, area.width, height)
}

/// Resolve a terminal cell to the navigation entry drawn there.
pub fn entry_at(area: Rect, margin_rows: u16, entries: usize, column: u16, row: u16) -> Option<usize> {
    let rect = rail_rect(area, margin_rows, entries);
    let inner = Block::default().borders(Borders::ALL).inner(rect);
    if column < inner.x || column >= inner.x + inner.width {
        return None;
    }
    let first_entry = inner.y + HEADER_ROWS;
    if row < first_entry || row >= inner.y + inner.height {
        return None;
    }
    let index = usize::from(row - first_entry);
    (index < entries).then_some(index)
}

pub struct NavigationRail<'a> {
    pub page: &'a Page,
    pub current: Option<usize>,
    pub margin_rows: u16,
}

impl Widget for NavigationRail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let sections = self.page.sections();
        let rect = rail_rect(area, self.margin_rows, sections.len());

        let block = Block::default()
            .title(" Portfolio ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(rect);
        block.render(rect, buf);

        let mut lines = vec![
            Line::from(Span::styled(" Software engineer", Theme::text_style())),
            Line::raw(""),
        ];
        for (i, section) in sections.iter().enumerate() {
            let (marker, style) = if Some(i) == self.current {
                ("▸", Theme::nav_current_style())
            } else {
                (" ", Theme::nav_style())
            };
            lines.push(Line::from(Span::styled(
                format!("{marker}{} {}", i + 1, section.title),
                style,
            )));
        }

        for (i, line) in lines.iter().take(usize::from(inner.height)).enumerate() {
            buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
        }
    }
}
