//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::AppState;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Boolean toggle: reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }

    /// Current value as shown next to the label.
    pub fn value_text(&self, state: &AppState) -> String {
        match self {
            Self::Toggle { get, .. } => {
                if get(state) { "[ON]".into() } else { "[OFF]".into() }
            }
            Self::Cycle { value, .. } => value(state),
        }
    }

    /// Toggle or advance the item.
    pub fn activate(&self, state: &mut AppState) {
        match self {
            Self::Toggle { get, set, .. } => {
                let current = get(state);
                set(state, !current);
            }
            Self::Cycle { cycle, .. } => cycle(state),
        }
    }
}

/// Next entry after `current` in `options`, wrapping around.  Unknown values
/// restart from `fallback`.
fn next_in<T: PartialEq + Copy>(options: &[T], current: T, fallback: usize) -> T {
    let idx = options.iter().position(|o| *o == current).unwrap_or(fallback);
    options[(idx + 1) % options.len()]
}

fn persist(state: &mut AppState) {
    if let Err(err) = state.config.save() {
        tracing::warn!(%err, "settings: failed to save config");
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Toggle {
        label: "Status HUD",
        get: |s| s.config.show_hud,
        set: |s, v| {
            s.config.show_hud = v;
            persist(s);
        },
    },
    SettingsItem::Toggle {
        label: "Ambient Particles",
        get: |s| s.config.show_particles,
        set: |s, v| {
            s.config.show_particles = v;
            persist(s);
        },
    },
    SettingsItem::Cycle {
        label: "Scroll Step",
        value: |s| format!("{}px", s.config.scroll_step_px),
        cycle: |s| {
            const STEPS: &[f64] = &[30.0, 60.0, 90.0, 120.0, 200.0];
            s.config.scroll_step_px = next_in(STEPS, s.config.scroll_step_px, 1);
            persist(s);
            s.status_message = Some(format!("Scroll step: {}px", s.config.scroll_step_px));
        },
    },
    SettingsItem::Cycle {
        label: "Row Scale",
        value: |s| format!("{}px/row", s.config.px_per_row),
        cycle: |s| {
            const SCALES: &[f64] = &[8.0, 12.0, 16.0, 24.0, 32.0];
            s.config.px_per_row = next_in(SCALES, s.config.px_per_row, 2);
            persist(s);
            // Viewport height in pixels changed, so the scene extent did too.
            let area = s.terminal_area;
            s.resize(area);
            s.status_message = Some(format!("Row scale: {}px/row", s.config.px_per_row));
        },
    },
];
