//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    camera::CameraGeometry,
    clock::{AnimationClock, ClockConfig},
    deck::ContentItem,
    motion::MotionProfile,
    path::PathScene,
};
use crate::ui::layout::AppLayout;

/// Where the spacer starts in the virtual document.  The path is the whole
/// document, so it starts at the top.
pub const SPACER_TOP_PX: f64 = 0.0;

/// Largest spring step taken in one frame, so a stalled terminal does not
/// make the cards jump when it wakes up.
const MAX_FRAME_DT: f64 = 0.05;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Path,
    SettingsMenu,
}

/// Top-level application state.
pub struct AppState {
    /// Deck, camera and per-card springs.
    pub scene: PathScene,
    /// Ambient clock for idle motion.  Owned here; dropped with the state.
    pub clock: AnimationClock,
    /// Ambient motion preferences.
    pub motion: MotionProfile,
    /// User configuration.
    pub config: AppConfig,
    /// Document scroll offset in virtual pixels.
    pub scroll_offset: f64,
    /// Full terminal area, kept for mouse hit-testing and resize math.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// When the springs were last stepped.
    pub last_advance: Option<Instant>,
}

impl AppState {
    pub fn new(
        items: Vec<ContentItem>,
        config: AppConfig,
        clock_config: ClockConfig,
        motion: MotionProfile,
        terminal_area: Rect,
    ) -> Self {
        let viewport_height = viewport_height_px(terminal_area, config.px_per_row);
        let mut scene = PathScene::new(items, CameraGeometry::default(), viewport_height);
        scene.on_scroll(SPACER_TOP_PX);
        Self {
            scene,
            clock: AnimationClock::new(clock_config),
            motion,
            config,
            scroll_offset: 0.0,
            terminal_area,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
            last_advance: None,
        }
    }

    /// Furthest the document can scroll: the spacer fully past the top.
    pub fn max_scroll(&self) -> f64 {
        SPACER_TOP_PX + self.scene.camera().scene_extent
    }

    /// Overwrite the scroll offset and push it to the clock and the camera.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.scroll_offset = offset.clamp(0.0, self.max_scroll());
        self.clock.on_scroll(self.scroll_offset);
        // Spacer top relative to the viewport top.
        self.scene.on_scroll(SPACER_TOP_PX - self.scroll_offset);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll_offset(self.scroll_offset + delta);
    }

    /// Visible path height in virtual pixels.
    pub fn viewport_height(&self) -> f64 {
        viewport_height_px(self.terminal_area, self.config.px_per_row)
    }

    /// Terminal resized (or the row scale changed).
    pub fn resize(&mut self, area: Rect) {
        self.terminal_area = area;
        self.scene.resize(self.viewport_height());
        // Extent may have shrunk; re-clamp the document offset too.
        self.set_scroll_offset(self.scroll_offset);
    }

    /// Pointer moved to a terminal cell.
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        // Cells are roughly twice as tall as they are wide.
        let px_per_col = self.config.px_per_row / 2.0;
        self.clock
            .on_pointer(f64::from(column) * px_per_col, f64::from(row) * self.config.px_per_row);
    }

    /// One frame elapsed: step the springs by the measured time since the
    /// last frame.  Returns `true` while cards are still moving.
    pub fn advance_frame(&mut self, now: Instant) -> bool {
        let dt = self
            .last_advance
            .map(|prev| now.saturating_duration_since(prev).as_secs_f64())
            .unwrap_or(0.0)
            .min(MAX_FRAME_DT);
        self.last_advance = Some(now);
        self.scene.advance(dt)
    }
}

fn viewport_height_px(area: Rect, px_per_row: f64) -> f64 {
    let layout = AppLayout::from_area(area);
    f64::from(layout.path_area.height) * px_per_row
}
