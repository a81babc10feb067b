//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── cards ──────────────────────────────────────────────────
    /// Card border for a given glow level (0 = dark, 1 = fully lit).
    pub fn card_border_style(glow: f64) -> Style {
        let style = Style::default().fg(Self::glow_color(glow));
        if glow > 0.66 {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Halo drawn around a card.  `layer` 0 hugs the card, higher layers sit
    /// further out and fade first.
    pub fn halo_style(glow: f64, layer: usize) -> Style {
        let color = match layer {
            0 => Color::Rgb(56, 189, 248),
            _ => Color::Rgb(59, 130, 246),
        };
        let style = Style::default().fg(color);
        if glow < 0.5 {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    fn glow_color(glow: f64) -> Color {
        // Slate (148,163,184) → sky (56,189,248).
        let t = glow.clamp(0.0, 1.0);
        let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
        Color::Rgb(lerp(148.0, 56.0), lerp(163.0, 189.0), lerp(184.0, 248.0))
    }

    pub fn eyebrow_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn card_title_style(activated: bool) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if activated {
            style.fg(Color::White)
        } else {
            style.fg(Color::Gray)
        }
    }

    pub fn card_body_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn portal_style() -> Style {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    }

    // ── ambient ────────────────────────────────────────────────
    pub fn particle_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn rail_style(activated: bool) -> Style {
        if activated {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
