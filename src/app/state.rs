//! Central application state.
//!
//! All mutable host state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! The margin itself is *not* stored here: it belongs to the controller task
//! and reaches the renderer through a watch channel.

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::page::Page;
use crate::ui::layout::AppLayout;

use super::scroll_source::ScrollSource;

/// Whether the margin controller was activated at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerStatus {
    Active,
    /// Viewport was narrower than the activation threshold.
    Inert { viewport_width: u32 },
}

/// Top-level application state.
pub struct AppState {
    pub page: Page,
    pub config: AppConfig,
    /// Where scroll offsets are published for the controller.
    pub source: ScrollSource,
    /// Current absolute vertical scroll offset in px.
    pub scroll_y: u32,
    /// Height of the visible page area in px.
    pub viewport_height_px: u32,
    pub controller: ControllerStatus,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(page: Page, config: AppConfig, source: ScrollSource, controller: ControllerStatus) -> Self {
        Self {
            page,
            config,
            source,
            scroll_y: 0,
            viewport_height_px: 0,
            controller,
            should_quit: false,
            status_message: None,
        }
    }

    /// Recompute the visible page height after a terminal resize and keep
    /// the scroll offset inside the new bounds.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let layout = AppLayout::from_area(Rect::new(0, 0, cols, rows));
        let inner_rows = u32::from(layout.page_area.height.saturating_sub(2));
        self.viewport_height_px = inner_rows * self.config.cell_height_px;
        let clamped = self.scroll_y.min(self.max_scroll());
        self.scroll_to(clamped);
    }

    pub fn max_scroll(&self) -> u32 {
        self.page.max_scroll(self.viewport_height_px)
    }

    /// Move to `y` (clamped to the page) and publish the new offset.
    /// Returns `true` if the offset changed.
    pub fn scroll_to(&mut self, y: u32) -> bool {
        let y = y.min(self.max_scroll());
        if y == self.scroll_y {
            return false;
        }
        self.scroll_y = y;
        self.source.publish(y);
        true
    }

    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = (i64::from(self.scroll_y) + delta).clamp(0, i64::from(u32::MAX));
        self.scroll_to(target as u32)
    }

    /// First visible page row.
    pub fn first_row(&self) -> usize {
        (self.scroll_y / self.page.line_height_px()) as usize
    }

    /// Index of the section currently at the top of the viewport.
    pub fn current_section(&self) -> Option<usize> {
        self.page.section_at(self.scroll_y)
    }
}
