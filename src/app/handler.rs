//! Input handling: maps key/wheel/pointer events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Action;
use crate::ui::layout::AppLayout;

use super::event::AppEvent;
use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState};

/// Fraction of the viewport moved by a page scroll.
const PAGE_FRACTION: f64 = 0.9;

/// Dispatch one application event.
pub fn handle_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(k) => handle_key(state, k),
        AppEvent::Wheel { down } => handle_wheel(state, down),
        AppEvent::Pointer { column, row } => state.pointer_moved(column, row),
        AppEvent::Resize(w, h) => {
            let area = ratatui::layout::Rect::new(0, 0, w, h);
            state.resize(area);
            tracing::debug!(w, h, "terminal resized");
        }
        AppEvent::Tick => {}
    }
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Path => handle_path_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
    }
}

fn handle_wheel(state: &mut AppState, down: bool) {
    if state.active_view != ActiveView::Path {
        return;
    }
    let step = state.config.scroll_step_px;
    state.scroll_by(if down { step } else { -step });
}

fn page_px(state: &AppState) -> f64 {
    let layout = AppLayout::from_area(state.terminal_area);
    (f64::from(layout.path_area.height) * state.config.px_per_row * PAGE_FRACTION).max(state.config.scroll_step_px)
}

// ── Path view (configurable bindings) ───────────────────────────

fn handle_path_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::ScrollUp => state.scroll_by(-state.config.scroll_step_px),
        Action::ScrollDown => state.scroll_by(state.config.scroll_step_px),
        Action::PageUp => state.scroll_by(-page_px(state)),
        Action::PageDown => state.scroll_by(page_px(state)),
        Action::JumpStart => state.set_scroll_offset(0.0),
        Action::JumpEnd => {
            let end = state.max_scroll();
            state.set_scroll_offset(end);
        }
        Action::ToggleHud => {
            state.config.show_hud = !state.config.show_hud;
        }
    }
}

// ── Settings menu ───────────────────────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Path;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                item.activate(state);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;

    fn press(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn wheel_scrolls_by_configured_step() {
        let mut s = test_state(5);
        handle_event(&mut s, AppEvent::Wheel { down: true });
        handle_event(&mut s, AppEvent::Wheel { down: true });
        assert_eq!(s.scroll_offset, 120.0);
        assert_eq!(s.scene.camera().depth, 120.0);
        handle_event(&mut s, AppEvent::Wheel { down: false });
        assert_eq!(s.scroll_offset, 60.0);
    }

    #[test]
    fn jump_keys_hit_both_ends() {
        let mut s = test_state(4);
        handle_event(&mut s, press(KeyCode::End));
        assert_eq!(s.scene.camera().depth, s.scene.camera().scene_extent);
        assert_eq!(s.scene.activated_count(), 4);
        handle_event(&mut s, press(KeyCode::Home));
        assert_eq!(s.scroll_offset, 0.0);
        assert_eq!(s.scene.activated_count(), 1);
    }

    #[test]
    fn page_down_moves_most_of_a_viewport() {
        let mut s = test_state(10);
        handle_event(&mut s, press(KeyCode::PageDown));
        assert_eq!(s.scroll_offset, 720.0);
    }

    #[test]
    fn settings_menu_swallows_scrolling() {
        let mut s = test_state(3);
        handle_event(&mut s, press(KeyCode::Char('?')));
        assert_eq!(s.active_view, ActiveView::SettingsMenu);
        handle_event(&mut s, AppEvent::Wheel { down: true });
        handle_event(&mut s, press(KeyCode::Down));
        assert_eq!(s.scroll_offset, 0.0);
        assert_eq!(s.settings_selected, 1);
        handle_event(&mut s, press(KeyCode::Esc));
        assert_eq!(s.active_view, ActiveView::Path);
    }

    #[test]
    fn ctrl_c_quits_from_any_view() {
        let mut s = test_state(1);
        s.active_view = ActiveView::SettingsMenu;
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit);
    }

    #[test]
    fn resize_event_updates_extent() {
        let mut s = test_state(3);
        handle_event(&mut s, AppEvent::Resize(80, 26));
        assert_eq!(s.scene.camera().scene_extent, 2260.0);
    }
}
