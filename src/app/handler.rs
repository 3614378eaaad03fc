//! Input handling — maps key/mouse events to scroll changes.
//!
//! Every path ends in [`AppState::scroll_to`], which clamps the offset and
//! publishes it to the scroll source; the margin controller picks it up from
//! there on its own task.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::event::Wheel;
use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let step = i64::from(state.config.wheel_step_px);
    let page = i64::from(state.viewport_height_px.max(state.config.cell_height_px));

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => {
            state.scroll_by(step);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll_by(-step);
        }
        KeyCode::PageDown | KeyCode::Char(' ') => {
            state.scroll_by(page);
        }
        KeyCode::PageUp => {
            state.scroll_by(-page);
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.scroll_to(0);
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.scroll_to(state.max_scroll());
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            jump_to_section(state, index);
        }
        _ => {}
    }
}

pub fn handle_wheel(state: &mut AppState, wheel: Wheel) {
    let step = i64::from(state.config.wheel_step_px);
    match wheel {
        Wheel::Down => state.scroll_by(step),
        Wheel::Up => state.scroll_by(-step),
    };
}

/// Left clicks on a navigation entry jump to that section.  `entry_at`
/// resolves a terminal cell to an entry index using the rail geometry of
/// the last frame.
pub fn handle_mouse(
    state: &mut AppState,
    mouse: MouseEvent,
    entry_at: impl Fn(u16, u16) -> Option<usize>,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if let Some(index) = entry_at(mouse.column, mouse.row) {
        jump_to_section(state, index);
    }
}

fn jump_to_section(state: &mut AppState, index: usize) {
    let Some(offset) = state.page.section_offset(index) else {
        return;
    };
    state.scroll_to(offset);
    let title = state.page.sections()[index].title;
    state.status_message = Some(format!("Jumped to {title}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scroll_source::ScrollSource;
    use crate::app::state::ControllerStatus;
    use crate::config::AppConfig;
    use crate::core::page::Page;

    fn state() -> AppState {
        let config = AppConfig::default();
        let page = Page::portfolio(config.cell_height_px);
        let mut s = AppState::new(page, config, ScrollSource::default(), ControllerStatus::Active);
        s.resize(160, 20);
        s
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn arrows_scroll_by_wheel_step() {
        let mut s = state();
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Char('j'));
        assert_eq!(s.scroll_y, 96);
        press(&mut s, KeyCode::Up);
        assert_eq!(s.scroll_y, 48);
    }

    #[test]
    fn home_and_end_hit_page_bounds() {
        let mut s = state();
        press(&mut s, KeyCode::End);
        assert_eq!(s.scroll_y, s.max_scroll());
        press(&mut s, KeyCode::Home);
        assert_eq!(s.scroll_y, 0);
    }

    #[test]
    fn page_down_moves_one_viewport() {
        let mut s = state();
        press(&mut s, KeyCode::PageDown);
        assert_eq!(s.scroll_y, s.viewport_height_px.min(s.max_scroll()));
    }

    #[test]
    fn digits_jump_to_sections() {
        let mut s = state();
        press(&mut s, KeyCode::Char('2'));
        assert_eq!(Some(s.scroll_y), s.page.section_offset(1));
        assert_eq!(s.status_message.as_deref(), Some("Jumped to Work history"));

        // No ninth section: nothing happens.
        let before = s.scroll_y;
        press(&mut s, KeyCode::Char('9'));
        assert_eq!(s.scroll_y, before);
    }

    #[test]
    fn wheel_scrolls_and_clamps() {
        let mut s = state();
        handle_wheel(&mut s, Wheel::Up);
        assert_eq!(s.scroll_y, 0);
        handle_wheel(&mut s, Wheel::Down);
        assert_eq!(s.scroll_y, 48);
    }

    #[test]
    fn clicks_on_rail_entries_jump() {
        let mut s = state();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut s, click, |_, row| if row == 7 { Some(2) } else { None });
        assert_eq!(Some(s.scroll_y), s.page.section_offset(2).map(|o| o.min(s.max_scroll())));

        let miss = MouseEvent { row: 1, ..click };
        let before = s.scroll_y;
        handle_mouse(&mut s, miss, |_, row| if row == 7 { Some(0) } else { None });
        assert_eq!(s.scroll_y, before);
    }

    #[test]
    fn quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut s = state();
            press(&mut s, code);
            assert!(s.should_quit);
        }
        let mut s = state();
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit);
    }
}
