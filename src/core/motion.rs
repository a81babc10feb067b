//! Motion preferences for ambient (clock-driven) effects.
//!
//! The path itself always animates the same way; only idle decoration is
//! toned down when reduced motion is requested.

/// Ambient intensity when reduced motion is on.
pub const REDUCED_INTENSITY: f64 = 0.3;

/// Frame rate used when reduced motion is on.
pub const REDUCED_MOTION_FPS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Scales idle drift and pulsing.
    pub intensity: f64,
    /// How strongly the pointer pulls ambient elements (0 disables it).
    pub pointer_influence: f64,
    pub reduced: bool,
}

impl MotionProfile {
    pub fn standard() -> Self {
        Self {
            intensity: 1.0,
            pointer_influence: 1.0,
            reduced: false,
        }
    }

    pub fn reduced() -> Self {
        Self {
            intensity: REDUCED_INTENSITY,
            pointer_influence: 0.0,
            reduced: true,
        }
    }

    pub fn from_flag(reduced: bool) -> Self {
        if reduced {
            Self::reduced()
        } else {
            Self::standard()
        }
    }

    /// Frame rate to actually run at for a requested rate.
    pub fn safe_fps(&self, requested: u32) -> u32 {
        if self.reduced {
            requested.min(REDUCED_MOTION_FPS).max(1)
        } else {
            requested.max(1)
        }
    }
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_caps_frame_rate() {
        assert_eq!(MotionProfile::reduced().safe_fps(60), 15);
        assert_eq!(MotionProfile::reduced().safe_fps(10), 10);
        assert_eq!(MotionProfile::standard().safe_fps(144), 144);
        assert_eq!(MotionProfile::standard().safe_fps(0), 1);
    }

    #[test]
    fn reduced_motion_ignores_pointer() {
        let m = MotionProfile::from_flag(true);
        assert_eq!(m.pointer_influence, 0.0);
        assert_eq!(m.intensity, REDUCED_INTENSITY);
    }
}
