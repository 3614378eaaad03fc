//! Bottom status bar text.

use ratatui::{style::Style, widgets::Paragraph};

use crate::app::state::{AppState, ControllerStatus};

use super::theme::Theme;

/// Build the status bar for the current frame.
pub fn status_bar(state: &AppState, margin_px: Option<i32>) -> Paragraph<'static> {
    let (text, style) = status_text(state, margin_px);
    Paragraph::new(text).style(style)
}

fn status_text(state: &AppState, margin_px: Option<i32>) -> (String, Style) {
    let position = format!(" scroll {}px / {}px", state.scroll_y, state.max_scroll());
    match state.controller {
        ControllerStatus::Active => {
            let margin = margin_px.map_or_else(|| "–".to_string(), |m| format!("{m}px"));
            let hint = state
                .status_message
                .as_deref()
                .unwrap_or("↑/↓ wheel: scroll | 1-9: jump | q: quit");
            (
                format!("{position} | margin {margin} | {hint}"),
                Theme::status_bar_style(),
            )
        }
        ControllerStatus::Inert { viewport_width } => (
            format!(
                "{position} | margin controller inert: viewport {viewport_width}px < {}px",
                state.config.min_viewport_width
            ),
            Theme::inert_style(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scroll_source::ScrollSource;
    use crate::config::AppConfig;
    use crate::core::page::Page;

    fn state(controller: ControllerStatus) -> AppState {
        let config = AppConfig::default();
        let page = Page::portfolio(config.cell_height_px);
        let mut s = AppState::new(page, config, ScrollSource::default(), controller);
        s.resize(160, 20);
        s
    }

    #[test]
    fn active_status_shows_margin() {
        let s = state(ControllerStatus::Active);
        let (text, _) = status_text(&s, Some(80));
        assert!(text.contains("margin 80px"), "{text}");
        assert!(text.starts_with(" scroll 0px"));
    }

    #[test]
    fn inert_status_explains_why() {
        let s = state(ControllerStatus::Inert { viewport_width: 640 });
        let (text, style) = status_text(&s, None);
        assert!(text.contains("viewport 640px < 1008px"), "{text}");
        assert_eq!(style, Theme::inert_style());
    }
}
