//! Ambient particle field: slow drifting dots behind the path, driven only
//! by the shared clock (time + pointer), never by the camera.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::clock::ClockState;
use crate::core::motion::MotionProfile;
use crate::ui::theme::Theme;

/// Dot glyphs from smallest to largest.  The pulse picks one per frame.
const PARTICLE_FRAMES: &[&str] = &["·", "∙", "•", "●"];

/// Golden-ratio stride spreads base positions evenly without a RNG.
const GOLDEN: f64 = 0.618_033_988_749_895;

/// A field of `count` particles.
pub struct ParticleField {
    pub clock: ClockState,
    pub motion: MotionProfile,
    pub count: usize,
    /// Virtual pixels per terminal row (pixel offsets → cells).
    pub px_per_row: f64,
}

/// Cell position and glyph index for particle `index`, or `None` if it
/// drifted outside `area`.
pub fn particle_cell(
    index: usize,
    clock: &ClockState,
    motion: &MotionProfile,
    px_per_row: f64,
    area: Rect,
) -> Option<(u16, u16, usize)> {
    if area.width == 0 || area.height == 0 || px_per_row <= 0.0 {
        return None;
    }
    let i = index as f64;
    let t = clock.time;
    let base_x = (i * GOLDEN).fract() * f64::from(area.width);
    let base_y = (i * GOLDEN * GOLDEN + 0.5 * GOLDEN).fract() * f64::from(area.height);

    let dx_px = (t + i).sin() * 54.0 * motion.intensity
        + clock.pointer.x * 0.018 * motion.pointer_influence;
    let dy_px = (t * 0.8 + i).cos() * 36.0 * motion.intensity
        + clock.pointer.y * 0.014 * motion.pointer_influence;

    let x = base_x + dx_px / (px_per_row / 2.0);
    let y = base_y + dy_px / px_per_row;
    if !(0.0..f64::from(area.width)).contains(&x) || !(0.0..f64::from(area.height)).contains(&y) {
        return None;
    }

    // Reduced motion keeps the drift but drops the pulse.
    let pulse = if motion.reduced {
        0.5
    } else {
        0.5 + (t + i).sin() * 0.5 * motion.intensity
    };
    let frame = ((pulse.clamp(0.0, 0.999)) * PARTICLE_FRAMES.len() as f64) as usize;
    Some((area.x + x as u16, area.y + y as u16, frame))
}

impl Widget for ParticleField {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for i in 0..self.count {
            let Some((x, y, frame)) = particle_cell(i, &self.clock, &self.motion, self.px_per_row, area) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(PARTICLE_FRAMES[frame]).set_style(Theme::particle_style());
            }
        }
    }
}
