//! Bottom status bar: key hints, transient messages, and the depth HUD.

use ratatui::{buffer::Buffer, layout::Rect, widgets::{Paragraph, Widget}};

use crate::app::state::AppState;
use crate::ui::theme::Theme;

/// Depth / clock readout, e.g. `depth 242/2660 · 3/5 · t 1.28 · ptr 40,96`.
pub fn hud_text(state: &AppState) -> String {
    let camera = state.scene.camera();
    let clock = state.clock.state();
    format!(
        "depth {:.0}/{:.0} · {}/{} · t {:.2} · ptr {:.0},{:.0}",
        camera.depth,
        camera.scene_extent,
        state.scene.activated_count(),
        state.scene.items().len(),
        clock.time,
        clock.pointer.x,
        clock.pointer.y,
    )
}

pub struct StatusBar<'a> {
    pub state: &'a AppState,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = match &self.state.status_message {
            Some(msg) => msg.clone(),
            None => self.state.config.status_bar_hint(),
        };
        let text = if self.state.config.show_hud {
            let hud = hud_text(self.state);
            let pad = (area.width as usize).saturating_sub(left.chars().count() + hud.chars().count() + 1);
            format!("{left}{}{hud} ", " ".repeat(pad))
        } else {
            left
        };
        Paragraph::new(text)
            .style(Theme::status_bar_style())
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;

    #[test]
    fn hud_reports_depth_and_prefix() {
        let mut s = test_state(5);
        s.scroll_by(242.0);
        let hud = hud_text(&s);
        assert!(hud.starts_with("depth 242/"), "{hud}");
        assert!(hud.contains("· 3/5 ·"), "{hud}");
        // Clock never started in tests: values stay at zero.
        assert!(hud.contains("t 0.00"), "{hud}");
    }

    #[test]
    fn status_message_replaces_hint() {
        let mut s = test_state(1);
        s.config.show_hud = false;
        s.status_message = Some("Row scale: 8px/row".into());
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        StatusBar { state: &s }.render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.starts_with("Row scale: 8px/row"));
    }
}
