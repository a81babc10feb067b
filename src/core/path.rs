//! The path scene: an ordered deck of items, one camera, and per-item
//! activation driving two spring followers (tilt and glow).

use super::camera::{CameraGeometry, CameraState, DepthCamera};
use super::deck::ContentItem;
use super::spring::{SpringFollower, SpringParams};

/// Tilt spring: upright signpost ⇄ laid flat on the path.
pub const TILT_SPRING: SpringParams = SpringParams::new(130.0, 18.0, 0.7);
/// Glow spring.
pub const GLOW_SPRING: SpringParams = SpringParams::new(120.0, 22.0, 1.0);

/// Resting tilt (degrees) of an item the camera has not reached.
pub const TILT_RESTING: f64 = 6.0;
/// Tilt (degrees) of an item the camera has passed.
pub const TILT_LAID_FLAT: f64 = 72.0;

fn tilt_target(activated: bool) -> f64 {
    if activated {
        TILT_LAID_FLAT
    } else {
        TILT_RESTING
    }
}

fn glow_target(activated: bool) -> f64 {
    if activated {
        1.0
    } else {
        0.0
    }
}

/// Per-item visual state.  Lives for the lifetime of the scene; activation
/// flips only retarget the springs.
#[derive(Debug, Clone)]
pub struct ItemVisual {
    activated: bool,
    tilt: SpringFollower,
    glow: SpringFollower,
}

impl ItemVisual {
    fn new(activated: bool) -> Self {
        Self {
            activated,
            tilt: SpringFollower::new(tilt_target(activated), TILT_SPRING),
            glow: SpringFollower::new(glow_target(activated), GLOW_SPRING),
        }
    }

    /// Returns `true` if the activation flipped.
    fn set_activated(&mut self, activated: bool) -> bool {
        if self.activated == activated {
            return false;
        }
        self.activated = activated;
        self.tilt.set_target(tilt_target(activated));
        self.glow.set_target(glow_target(activated));
        true
    }

    fn advance(&mut self, dt: f64) -> bool {
        let tilt_moving = self.tilt.step(dt);
        let glow_moving = self.glow.step(dt);
        tilt_moving || glow_moving
    }

    pub fn activated(&self) -> bool {
        self.activated
    }

    pub fn tilt(&self) -> f64 {
        self.tilt.value()
    }

    pub fn glow(&self) -> f64 {
        self.glow.value().clamp(0.0, 1.0)
    }
}

/// What the renderer needs for one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemOutput {
    pub index: usize,
    pub activated: bool,
    pub tilt: f64,
    pub glow: f64,
    /// Item depth relative to the camera.  Positive = still ahead.
    pub depth_offset: f64,
    /// Last item in the deck; carries the portal marker.
    pub is_terminal: bool,
}

/// Deck + camera + per-item visuals.
#[derive(Debug, Clone)]
pub struct PathScene {
    items: Vec<ContentItem>,
    visuals: Vec<ItemVisual>,
    camera: DepthCamera,
}

impl PathScene {
    pub fn new(items: Vec<ContentItem>, geometry: CameraGeometry, viewport_height: f64) -> Self {
        let camera = DepthCamera::new(geometry, items.len(), viewport_height);
        let visuals = (0..items.len())
            .map(|i| ItemVisual::new(geometry.is_activated(camera.depth(), i)))
            .collect();
        Self {
            items,
            visuals,
            camera,
        }
    }

    /// Scroll moved: update depth and retarget any item whose activation
    /// flipped.  Returns the number of flips.
    pub fn on_scroll(&mut self, spacer_top_offset: f64) -> usize {
        self.camera.on_scroll(spacer_top_offset);
        self.sync_activation()
    }

    /// Viewport resized.  Depth may be re-clamped, so activation is
    /// re-evaluated too.
    pub fn resize(&mut self, viewport_height: f64) -> usize {
        self.camera.resize(viewport_height);
        self.sync_activation()
    }

    fn sync_activation(&mut self) -> usize {
        let depth = self.camera.depth();
        let geometry = *self.camera.geometry();
        let mut flips = 0;
        for (index, visual) in self.visuals.iter_mut().enumerate() {
            let activated = geometry.is_activated(depth, index);
            if visual.set_activated(activated) {
                flips += 1;
                tracing::debug!(
                    index,
                    activated,
                    depth,
                    tilt = visual.tilt.value(),
                    tilt_velocity = visual.tilt.velocity(),
                    tilt_target = visual.tilt.target(),
                    "path: activation flipped"
                );
            }
        }
        flips
    }

    /// Step every spring by `dt` seconds.  Returns `true` while any item is
    /// still in motion.
    pub fn advance(&mut self, dt: f64) -> bool {
        let mut moving = false;
        for visual in &mut self.visuals {
            moving |= visual.advance(dt);
        }
        moving
    }

    pub fn visuals(&self) -> Vec<ItemOutput> {
        let depth = self.camera.depth();
        let geometry = self.camera.geometry();
        let last = self.items.len().checked_sub(1);
        self.visuals
            .iter()
            .enumerate()
            .map(|(index, v)| ItemOutput {
                index,
                activated: v.activated(),
                tilt: v.tilt(),
                glow: v.glow(),
                depth_offset: geometry.item_depth(index) - depth,
                is_terminal: Some(index) == last,
            })
            .collect()
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn camera(&self) -> CameraState {
        self.camera.state()
    }

    pub fn geometry(&self) -> &CameraGeometry {
        self.camera.geometry()
    }

    /// Length of the activated prefix.
    pub fn activated_count(&self) -> usize {
        self.camera
            .geometry()
            .activated_count(self.camera.depth(), self.visuals.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Vec<ContentItem> {
        (0..n)
            .map(|i| ContentItem::new(i, format!("Card {i}"), "body"))
            .collect()
    }

    fn scene(n: usize) -> PathScene {
        PathScene::new(deck(n), CameraGeometry::default(), 800.0)
    }

    #[test]
    fn mount_activates_only_first_item() {
        let s = scene(5);
        let out = s.visuals();
        assert!(out[0].activated);
        assert!(out[1..].iter().all(|o| !o.activated));
        assert_eq!(out[0].tilt, TILT_LAID_FLAT);
        assert_eq!(out[0].glow, 1.0);
        assert_eq!(out[1].tilt, TILT_RESTING);
        assert_eq!(out[1].glow, 0.0);
    }

    #[test]
    fn scroll_to_threshold_activates_prefix() {
        let mut s = scene(5);
        let flips = s.on_scroll(-242.0);
        assert_eq!(flips, 2);
        assert_eq!(s.activated_count(), 3);
        assert!(!s.visuals()[3].activated);
    }

    #[test]
    fn only_the_last_item_is_terminal() {
        let s = scene(4);
        let terminal: Vec<_> = s.visuals().iter().map(|o| o.is_terminal).collect();
        assert_eq!(terminal, vec![false, false, false, true]);
        assert!(scene(0).visuals().is_empty());
    }

    #[test]
    fn flip_keeps_spring_state_continuous() {
        let mut s = scene(3);
        s.on_scroll(-200.0); // item 1 threshold is 121
        s.advance(0.05);
        let mid = (s.visuals()[1].tilt, s.visuals()[1].glow);
        assert!(mid.0 > TILT_RESTING && mid.0 < TILT_LAID_FLAT);

        s.on_scroll(0.0); // back out: item 1 deactivates
        let after = (s.visuals()[1].tilt, s.visuals()[1].glow);
        assert_eq!(mid, after);
        assert!(!s.visuals()[1].activated);
    }

    #[test]
    fn rerender_without_flip_does_not_disturb_springs() {
        let mut s = scene(3);
        s.on_scroll(-200.0);
        s.advance(0.02);
        let before = s.visuals()[1].tilt;
        assert_eq!(s.on_scroll(-210.0), 0);
        assert_eq!(s.visuals()[1].tilt, before);
    }

    #[test]
    fn springs_settle_after_enough_time() {
        let mut s = scene(3);
        s.on_scroll(-10_000.0);
        let mut frames = 0;
        while s.advance(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 2_000, "springs never settled");
        }
        for o in s.visuals() {
            assert!(o.activated);
            assert_eq!(o.tilt, TILT_LAID_FLAT);
            assert_eq!(o.glow, 1.0);
        }
    }

    #[test]
    fn past_the_end_further_scroll_changes_nothing() {
        let mut s = scene(3);
        s.on_scroll(-100_000.0);
        let cam = s.camera();
        assert_eq!(cam.depth, cam.scene_extent);
        assert_eq!(s.on_scroll(-200_000.0), 0);
        assert_eq!(s.camera(), cam);
        assert_eq!(s.activated_count(), 3);
    }

    #[test]
    fn glow_stays_in_unit_range() {
        let mut v = ItemVisual::new(false);
        v.glow = SpringFollower::new(1.4, GLOW_SPRING);
        assert_eq!(v.glow(), 1.0);
        v.glow = SpringFollower::new(-0.3, GLOW_SPRING);
        assert_eq!(v.glow(), 0.0);
    }

    #[test]
    fn glow_retargeted_mid_flight_stays_in_unit_range() {
        let mut s = scene(3);
        s.on_scroll(-200.0);
        for _ in 0..4 {
            s.advance(1.0 / 60.0);
        }
        assert!(s.visuals[1].glow.velocity() > 0.0);
        s.on_scroll(0.0);
        for frame in 0..300 {
            if frame % 7 == 0 {
                s.on_scroll(if frame % 14 == 0 { -200.0 } else { 0.0 });
            }
            s.advance(1.0 / 60.0);
            let glow = s.visuals()[1].glow;
            assert!((0.0..=1.0).contains(&glow), "frame {frame}: {glow}");
        }
    }

    #[test]
    fn depth_offset_tracks_camera() {
        let mut s = scene(3);
        s.on_scroll(-100.0);
        let out = s.visuals();
        assert_eq!(out[0].depth_offset, -100.0);
        assert_eq!(out[2].depth_offset, 340.0);
    }
}
