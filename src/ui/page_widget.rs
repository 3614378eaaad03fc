//! Ratatui widget that renders the portfolio [`Page`] from a given row.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::core::page::{Page, PageLine};

use super::theme::Theme;

/// The page widget — created fresh each frame.
pub struct PageWidget<'a> {
    page: &'a Page,
    first_row: usize,
    block: Option<Block<'a>>,
}

impl<'a> PageWidget<'a> {
    pub fn new(page: &'a Page, first_row: usize) -> Self {
        Self {
            page,
            first_row,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        let rows = self
            .page
            .lines()
            .skip(self.first_row)
            .take(usize::from(inner.height));

        for (i, row) in rows.enumerate() {
            let line = match row {
                PageLine::Heading(title) => {
                    Line::from(Span::styled(format!("── {title} "), Theme::heading_style()))
                }
                PageLine::Text(text) => Line::from(Span::styled(format!("  {text}"), Theme::text_style())),
                PageLine::Blank => continue,
            };
            buf.set_line(inner.x, inner.y + i as u16, &line, inner.width);
        }
    }
}
