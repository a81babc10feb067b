//! Path widget: projects the deck onto the terminal.
//!
//! Each card sits at a fixed depth; the camera depth decides how far ahead
//! of the viewer it is.  Nearer cards are drawn larger and lower (their
//! bottom edge rests on the path), and the card's tilt foreshortens its
//! height: an upright card is nearly full height, a card laid flat is a
//! thin slab.  Glow lights the border and adds up to two halo layers.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::core::path::{ItemOutput, PathScene};
use crate::ui::layout::PathLayout;
use crate::ui::theme::Theme;

/// Below this fraction of the perspective distance a card is behind the
/// viewer and is not drawn.
const NEAR_PLANE: f64 = 0.35;
/// Card size at scale 1, as a fraction of the scene area.
const BASE_WIDTH: f64 = 0.5;
const BASE_HEIGHT: f64 = 0.45;
/// Horizon line, as a fraction of the scene height from the top.
const HORIZON: f64 = 0.3;
/// How far below the horizon a card at scale 1 touches the ground.
const GROUND: f64 = 0.65;

const HALO_GLYPHS: [&str; 2] = ["▒", "░"];

/// Screen placement of one card.  `x`/`y` may be off-screen; `visible` is
/// the part inside the scene area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub scale: f64,
}

impl Projection {
    fn grown(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x - dx,
            y: self.y - dy,
            width: self.width + 2 * dx,
            height: self.height + 2 * dy,
            scale: self.scale,
        }
    }

    /// Clip to `area`.  `None` when nothing is left.
    pub fn visible(&self, area: Rect) -> Option<Rect> {
        let left = self.x.max(i32::from(area.x));
        let top = self.y.max(i32::from(area.y));
        let right = (self.x + self.width).min(i32::from(area.right()));
        let bottom = (self.y + self.height).min(i32::from(area.bottom()));
        if right <= left || bottom <= top {
            return None;
        }
        // All four values lie inside `area`, so they fit in u16.
        Some(Rect::new(
            left as u16,
            top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }
}

/// Place a card in `area` for a camera with the given perspective distance.
pub fn project(item: &ItemOutput, area: Rect, perspective: f64) -> Option<Projection> {
    if area.width == 0 || area.height == 0 || perspective <= 0.0 {
        return None;
    }
    let denom = perspective + item.depth_offset;
    if !denom.is_finite() || denom <= perspective * NEAR_PLANE {
        return None;
    }
    let scale = perspective / denom;
    let w_area = f64::from(area.width);
    let h_area = f64::from(area.height);

    let width = (w_area * BASE_WIDTH * scale).round().max(4.0);
    let foreshorten = item.tilt.to_radians().cos().abs();
    let height = (h_area * BASE_HEIGHT * scale * foreshorten).round().max(1.0);

    let horizon = f64::from(area.y) + h_area * HORIZON;
    let bottom = horizon + h_area * GROUND * scale;
    let center_x = f64::from(area.x) + w_area / 2.0;

    Some(Projection {
        x: (center_x - width / 2.0).round() as i32,
        y: (bottom - height).round() as i32,
        width: width as i32,
        height: height as i32,
        scale,
    })
}

/// Renders the whole path for the current scene state.
pub struct PathWidget<'a> {
    pub scene: &'a PathScene,
}

impl<'a> Widget for PathWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(PathLayout { scene: scene_area, rail }) = PathLayout::split(area) else {
            return;
        };
        let perspective = self.scene.geometry().base_perspective;
        let total = self.scene.items().len();

        // Painter's order: furthest first.
        let mut outputs = self.scene.visuals();
        outputs.sort_by(|a, b| b.depth_offset.total_cmp(&a.depth_offset));

        for out in &outputs {
            let Some(proj) = project(out, scene_area, perspective) else {
                continue;
            };
            render_card(self.scene, out, total, proj, scene_area, buf);
        }

        render_rail(self.scene, rail, buf);
    }
}

fn render_card(
    scene: &PathScene,
    out: &ItemOutput,
    total: usize,
    proj: Projection,
    area: Rect,
    buf: &mut Buffer,
) {
    // Halo: outer layer first so the inner one overdraws it.
    for layer in (0..HALO_GLYPHS.len()).rev() {
        if out.glow <= 0.15 + layer as f64 * 0.4 {
            continue;
        }
        let halo = proj.grown(2 * (layer as i32 + 1), layer as i32 + 1);
        if let Some(rect) = halo.visible(area) {
            fill(buf, rect, HALO_GLYPHS[layer], Theme::halo_style(out.glow, layer));
        }
    }

    let Some(rect) = proj.visible(area) else {
        return;
    };
    Clear.render(rect, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::card_border_style(out.glow));
    let inner = block.inner(rect);
    block.render(rect, buf);

    if let Some(item) = scene.items().get(out.index) {
        let lines = vec![
            Line::from(Span::styled(
                format!("{:02} / {:02}", out.index + 1, total),
                Theme::eyebrow_style(),
            )),
            Line::from(Span::styled(item.title.as_str(), Theme::card_title_style(out.activated))),
            Line::from(Span::styled(item.body.as_str(), Theme::card_body_style())),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    if out.is_terminal {
        render_portal(rect, buf);
    }
}

/// The portal sits on the bottom edge of the last card, lit or not.
fn render_portal(rect: Rect, buf: &mut Buffer) {
    let label = "( ◉ )";
    let width = label.chars().count() as u16;
    if rect.width < width {
        if let Some(cell) = buf.cell_mut((rect.x + rect.width / 2, rect.bottom() - 1)) {
            cell.set_symbol("◉").set_style(Theme::portal_style());
        }
        return;
    }
    let x = rect.x + (rect.width - width) / 2;
    buf.set_string(x, rect.bottom() - 1, label, Theme::portal_style());
}

/// Depth rail: one marker per card at its activation threshold, plus the
/// camera position.  The lit markers always form a prefix.
fn render_rail(scene: &PathScene, rail: Rect, buf: &mut Buffer) {
    let camera = scene.camera();
    if camera.scene_extent <= 0.0 || rail.height == 0 {
        return;
    }
    let geometry = scene.geometry();
    let span = f64::from(rail.height - 1);
    let row_for = |depth: f64| rail.y + ((depth / camera.scene_extent).clamp(0.0, 1.0) * span).round() as u16;

    for y in rail.y..rail.bottom() {
        if let Some(cell) = buf.cell_mut((rail.x, y)) {
            cell.set_symbol("│").set_style(Theme::rail_style(false));
        }
    }
    for out in scene.visuals() {
        let y = row_for(geometry.threshold(out.index));
        let symbol = if out.activated { "◆" } else { "◇" };
        if let Some(cell) = buf.cell_mut((rail.x, y)) {
            cell.set_symbol(symbol).set_style(Theme::rail_style(out.activated));
        }
    }
    if let Some(cell) = buf.cell_mut((rail.x, row_for(camera.depth))) {
        cell.set_symbol("▶").set_style(Theme::title_style());
    }
}

fn fill(buf: &mut Buffer, rect: Rect, symbol: &str, style: ratatui::style::Style) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}
