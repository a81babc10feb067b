//! Depth camera: maps a scroll position onto a bounded depth along the
//! path and decides which items the camera has reached.
//!
//! Items sit at fixed depths (`index × item_spacing`); only the camera moves.
//! A reserved "spacer" region of the scrollable document is exactly
//! `scene_extent` tall, so scrolling through it traverses the whole path.

/// Fixed geometry of the path.  All distances are in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraGeometry {
    /// Depth margin reserved in front of the first item.
    pub base_perspective: f64,
    /// Depth travelled per pixel scrolled.
    pub camera_speed: f64,
    /// Distance between consecutive items.
    pub item_spacing: f64,
    /// Fraction of the distance to an item the camera must cover before the
    /// item counts as reached.
    pub activate_threshold: f64,
}

impl Default for CameraGeometry {
    fn default() -> Self {
        Self {
            base_perspective: 1200.0,
            camera_speed: 1.0,
            item_spacing: 220.0,
            activate_threshold: 0.55,
        }
    }
}

/// Thresholds are snapped to a micro-pixel grid so `2 × 220 × 0.55` is 242,
/// not one ulp above it.
const THRESHOLD_GRID: f64 = 1e6;

/// Replace anything that would poison downstream math with zero.
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

impl CameraGeometry {
    /// Total scroll height the path needs for `item_count` items.
    pub fn scene_extent(&self, viewport_height: f64, item_count: usize) -> f64 {
        let vh = finite_or_zero(viewport_height).max(0.0);
        vh + self.base_perspective * self.camera_speed
            + self.item_spacing * self.camera_speed * item_count as f64
    }

    /// Fixed depth coordinate of the item at `index`.
    pub fn item_depth(&self, index: usize) -> f64 {
        index as f64 * self.item_spacing
    }

    /// Depth the camera must reach before item `index` activates.
    pub fn threshold(&self, index: usize) -> f64 {
        let raw = index as f64 * self.item_spacing * self.activate_threshold;
        (raw * THRESHOLD_GRID).round() / THRESHOLD_GRID
    }

    pub fn is_activated(&self, depth: f64, index: usize) -> bool {
        depth >= self.threshold(index)
    }

    /// Length of the activated prefix among `item_count` items.
    pub fn activated_count(&self, depth: f64, item_count: usize) -> usize {
        // Thresholds are increasing, so the first miss ends the prefix.
        (0..item_count)
            .take_while(|&i| self.is_activated(depth, i))
            .count()
    }
}

/// Depth for a spacer whose top edge sits `spacer_top_offset` pixels below
/// the viewport top (negative once scrolled past).
pub fn depth_for(spacer_top_offset: f64, scene_extent: f64) -> f64 {
    let extent = finite_or_zero(scene_extent).max(0.0);
    (-finite_or_zero(spacer_top_offset)).clamp(0.0, extent)
}

/// Snapshot of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub depth: f64,
    pub scene_extent: f64,
}

/// The live camera: geometry plus the last measured viewport and scroll.
#[derive(Debug, Clone)]
pub struct DepthCamera {
    geometry: CameraGeometry,
    item_count: usize,
    viewport_height: f64,
    scene_extent: f64,
    spacer_top_offset: f64,
    depth: f64,
}

impl DepthCamera {
    /// Mount the camera: compute the extent and the initial depth.
    pub fn new(geometry: CameraGeometry, item_count: usize, viewport_height: f64) -> Self {
        let viewport_height = finite_or_zero(viewport_height).max(0.0);
        let scene_extent = geometry.scene_extent(viewport_height, item_count);
        Self {
            geometry,
            item_count,
            viewport_height,
            scene_extent,
            spacer_top_offset: 0.0,
            depth: 0.0,
        }
    }

    /// Viewport changed size: recompute the extent and re-clamp depth.
    pub fn resize(&mut self, viewport_height: f64) {
        self.viewport_height = finite_or_zero(viewport_height).max(0.0);
        self.scene_extent = self
            .geometry
            .scene_extent(self.viewport_height, self.item_count);
        self.depth = depth_for(self.spacer_top_offset, self.scene_extent);
        tracing::debug!(
            viewport_height = self.viewport_height,
            scene_extent = self.scene_extent,
            "camera: resized"
        );
    }

    /// Scroll changed: recompute depth from the spacer's position.
    pub fn on_scroll(&mut self, spacer_top_offset: f64) -> f64 {
        self.spacer_top_offset = finite_or_zero(spacer_top_offset);
        self.depth = depth_for(self.spacer_top_offset, self.scene_extent);
        self.depth
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            depth: self.depth,
            scene_extent: self.scene_extent,
        }
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn geometry(&self) -> &CameraGeometry {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_for_three_items() {
        let g = CameraGeometry::default();
        assert_eq!(g.scene_extent(800.0, 3), 2660.0);
    }

    #[test]
    fn extent_is_idempotent() {
        let mut cam = DepthCamera::new(CameraGeometry::default(), 4, 600.0);
        let first = cam.state().scene_extent;
        cam.resize(600.0);
        assert_eq!(cam.state().scene_extent, first);
        cam.resize(600.0);
        assert_eq!(cam.state().scene_extent, first);
    }

    #[test]
    fn empty_deck_extent_is_viewport_plus_margin() {
        let g = CameraGeometry {
            base_perspective: 0.0,
            ..CameraGeometry::default()
        };
        assert_eq!(g.scene_extent(720.0, 0), 720.0);
        assert_eq!(CameraGeometry::default().activated_count(10_000.0, 0), 0);
    }

    #[test]
    fn bad_viewport_metrics_count_as_zero() {
        let g = CameraGeometry::default();
        assert_eq!(g.scene_extent(f64::NAN, 0), 1200.0);
        assert_eq!(g.scene_extent(f64::INFINITY, 1), 1420.0);
        assert_eq!(g.scene_extent(-50.0, 0), 1200.0);
    }

    #[test]
    fn depth_clamps_at_both_ends() {
        let extent = 2660.0;
        assert_eq!(depth_for(100.0, extent), 0.0);
        assert_eq!(depth_for(0.0, extent), 0.0);
        assert_eq!(depth_for(-500.0, extent), 500.0);
        assert_eq!(depth_for(-2660.0, extent), 2660.0);
        assert_eq!(depth_for(-99_999.0, extent), 2660.0);
        assert_eq!(depth_for(f64::NAN, extent), 0.0);
    }

    #[test]
    fn depth_is_monotonic_in_scroll() {
        let extent = 2000.0;
        let mut last = -1.0;
        for s in (-3000..=500).rev().step_by(37) {
            let d = depth_for(f64::from(s), extent);
            assert!(d >= last);
            last = d;
        }
    }

    #[test]
    fn activation_scenario_five_items() {
        let g = CameraGeometry::default();
        assert!(g.is_activated(0.0, 0));
        for i in 1..5 {
            assert!(!g.is_activated(0.0, i));
        }
        assert_eq!(g.activated_count(0.0, 5), 1);

        assert_eq!(g.threshold(2), 242.0);
        assert!(g.is_activated(242.0, 2));
        assert!(!g.is_activated(242.0, 3));
        assert_eq!(g.threshold(3), 363.0);
        assert_eq!(g.activated_count(242.0, 5), 3);
    }

    #[test]
    fn thresholds_land_on_whole_pixels() {
        let g = CameraGeometry::default();
        for i in 0..50 {
            let expected = i as f64 * 121.0;
            assert_eq!(g.threshold(i), expected, "index {i}");
            assert!(g.is_activated(expected, i));
            assert!(!g.is_activated(expected - 0.5, i));
        }
    }

    #[test]
    fn activated_set_is_a_prefix() {
        let g = CameraGeometry::default();
        for depth in (0..2000).step_by(13) {
            let depth = f64::from(depth);
            let n = g.activated_count(depth, 10);
            for i in 0..10 {
                assert_eq!(g.is_activated(depth, i), i < n, "depth {depth} index {i}");
            }
        }
        for i in 0..9 {
            assert!(g.threshold(i) <= g.threshold(i + 1));
        }
    }

    #[test]
    fn scrolling_past_the_end_saturates() {
        let mut cam = DepthCamera::new(CameraGeometry::default(), 3, 800.0);
        let extent = cam.state().scene_extent;
        assert_eq!(cam.on_scroll(-(extent + 400.0)), extent);
        assert_eq!(cam.on_scroll(-(extent + 4000.0)), extent);
        assert_eq!(cam.geometry().activated_count(cam.depth(), 3), 3);
    }

    #[test]
    fn shrinking_viewport_reclamps_depth() {
        let mut cam = DepthCamera::new(CameraGeometry::default(), 1, 1000.0);
        cam.on_scroll(-5000.0);
        assert_eq!(cam.depth(), 2420.0);
        cam.resize(500.0);
        assert_eq!(cam.depth(), 1920.0);
    }
}
