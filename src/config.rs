//! User configuration: keybindings, scroll feel, and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/depth-path/config.toml` (default `~/.config/depth-path/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the path view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    JumpStart,
    JumpEnd,
    ToggleHud,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when serialising).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::JumpStart,
        Action::JumpEnd,
        Action::ToggleHud,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::JumpStart => "jump_start",
            Action::JumpEnd => "jump_end",
            Action::ToggleHud => "toggle_hud",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"↓"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            _ => self.code_name(),
        };
        format!("{}{key}", self.modifier_prefix())
    }

    /// Serialise to config-file format (e.g. `"Shift+Space"`, `"q"`).
    fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.code_name())
    }

    fn code_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Space"`, `"q"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

pub const SCROLL_STEP_RANGE: (f64, f64) = (10.0, 400.0);
pub const PX_PER_ROW_RANGE: (f64, f64) = (4.0, 64.0);

/// Application configuration: keybindings and scroll settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Virtual pixels scrolled per wheel notch / arrow key.
    pub scroll_step_px: f64,
    /// Virtual pixels represented by one terminal row.
    pub px_per_row: f64,
    /// Show the depth/clock readout in the status bar.
    pub show_hud: bool,
    /// Draw the ambient particle field behind the path.
    pub show_particles: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            scroll_step_px: 60.0,
            px_per_row: 16.0,
            show_hud: true,
            show_particles: true,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n), KeyBind::new(Char(' '), shift)]);
        m.insert(Action::PageDown, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::JumpStart, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Action::JumpEnd, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), shift)]);
        m.insert(Action::ToggleHud, vec![KeyBind::new(Char('h'), n)]);
        m.insert(Action::OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "wheel/{}{}: move | {}: page | {}: settings | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::PageDown),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        tracing::debug!(path = %path.display(), "config: saved");
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "scroll_step_px" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            config.scroll_step_px = v.clamp(SCROLL_STEP_RANGE.0, SCROLL_STEP_RANGE.1);
                        }
                    }
                    continue;
                }
                "px_per_row" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            config.px_per_row = v.clamp(PX_PER_ROW_RANGE.0, PX_PER_ROW_RANGE.1);
                        }
                    }
                    continue;
                }
                "show_hud" => {
                    config.show_hud = value == "true";
                    continue;
                }
                "show_particles" => {
                    config.show_particles = value == "true";
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!(key, "config: unknown key");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# depth-path configuration".to_string(),
            String::new(),
            "# Scrolling".to_string(),
            format!("scroll_step_px = {}", self.scroll_step_px),
            format!("px_per_row = {}", self.px_per_row),
            format!("show_hud = {}", self.show_hud),
            format!("show_particles = {}", self.show_particles),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/depth-path/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("depth-path").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn defaults_match_expected_actions() {
        let c = AppConfig::default();
        assert_eq!(c.match_key(key(KeyCode::Down, KeyModifiers::NONE)), Some(Action::ScrollDown));
        assert_eq!(c.match_key(key(KeyCode::Char(' '), KeyModifiers::NONE)), Some(Action::PageDown));
        assert_eq!(c.match_key(key(KeyCode::Char(' '), KeyModifiers::SHIFT)), Some(Action::PageUp));
        assert_eq!(c.match_key(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parses_settings_and_clamps() {
        let c = AppConfig::parse(
            "# comment\nscroll_step_px = 9999\npx_per_row = 2\nshow_hud = false\nshow_particles = true\n",
        );
        assert_eq!(c.scroll_step_px, 400.0);
        assert_eq!(c.px_per_row, 4.0);
        assert!(!c.show_hud);
        assert!(c.show_particles);
    }

    #[test]
    fn bad_numbers_keep_defaults() {
        let c = AppConfig::parse("scroll_step_px = fast\npx_per_row = NaN\n");
        assert_eq!(c.scroll_step_px, 60.0);
        assert_eq!(c.px_per_row, 16.0);
    }

    #[test]
    fn rebinding_replaces_defaults_for_that_action() {
        let c = AppConfig::parse("quit = Ctrl+x, F10\nbogus_action = q\n");
        let quit = &c.bindings[&Action::Quit];
        assert_eq!(
            quit,
            &vec![
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::F(10), KeyModifiers::NONE),
            ]
        );
        assert_eq!(c.bindings[&Action::ScrollDown].len(), 2);
    }

    #[test]
    fn saved_text_parses_back_to_same_settings() {
        let mut c = AppConfig::default();
        c.scroll_step_px = 120.0;
        c.show_particles = false;
        let back = AppConfig::parse(&c.serialise());
        assert_eq!(back.scroll_step_px, 120.0);
        assert!(!back.show_particles);
        for action in Action::ALL {
            assert_eq!(back.bindings[action], c.bindings[action], "{action:?}");
        }
    }

    #[test]
    fn uppercase_char_binding_survives() {
        assert_eq!(
            KeyBind::parse("Shift+G"),
            Some(KeyBind::new(KeyCode::Char('G'), KeyModifiers::SHIFT))
        );
    }
}
