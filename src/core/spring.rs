//! Second-order spring follower.
//!
//! A follower holds `{position, velocity, target}` explicitly.  Changing the
//! target never touches position or velocity, so a retarget mid-flight
//! continues smoothly from wherever the follower currently is.

/// Largest integration step.  Larger `dt` values are split into sub-steps
/// of at most this size so stiff springs stay stable at low frame rates.
const MAX_SUBSTEP: f64 = 1.0 / 240.0;

/// Distance from target below which the follower may come to rest.
const REST_DELTA: f64 = 0.01;

/// Speed below which the follower may come to rest.
const REST_SPEED: f64 = 0.01;

/// Physical parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringParams {
    pub const fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::new(100.0, 10.0, 1.0)
    }
}

/// A stateful follower that approaches its target like a damped spring.
#[derive(Debug, Clone)]
pub struct SpringFollower {
    position: f64,
    velocity: f64,
    target: f64,
    params: SpringParams,
}

impl SpringFollower {
    /// Create a follower already at rest on `initial`.
    pub fn new(initial: f64, params: SpringParams) -> Self {
        let initial = if initial.is_finite() { initial } else { 0.0 };
        Self {
            position: initial,
            velocity: 0.0,
            target: initial,
            params,
        }
    }

    /// Retarget the follower.  Position and velocity carry over unchanged.
    ///
    /// Non-finite targets are dropped: a `NaN` target would poison the
    /// position forever.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            tracing::warn!(target, "spring: rejected non-finite target");
            return;
        }
        self.target = target;
    }

    /// Advance the follower by `dt` seconds.  Returns `true` while the
    /// follower is still moving.
    pub fn step(&mut self, dt: f64) -> bool {
        if !dt.is_finite() || dt <= 0.0 {
            return !self.is_settled();
        }
        if self.is_settled() {
            return false;
        }

        let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / f64::from(substeps);
        let SpringParams {
            stiffness,
            damping,
            mass,
        } = self.params;
        let mass = if mass > 0.0 { mass } else { 1.0 };

        for _ in 0..substeps {
            let displacement = self.position - self.target;
            let accel = (-stiffness * displacement - damping * self.velocity) / mass;
            // Semi-implicit Euler: velocity first, then position.
            self.velocity += accel * h;
            self.position += self.velocity * h;
        }

        if (self.position - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
            self.position = self.target;
            self.velocity = 0.0;
        }

        !self.is_settled()
    }

    pub fn value(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True when the follower sits exactly on its target with no velocity.
    pub fn is_settled(&self) -> bool {
        self.position == self.target && self.velocity == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILT: SpringParams = SpringParams::new(130.0, 18.0, 0.7);

    #[test]
    fn starts_at_rest_on_initial_value() {
        let s = SpringFollower::new(6.0, TILT);
        assert_eq!(s.value(), 6.0);
        assert_eq!(s.target(), 6.0);
        assert!(s.is_settled());
    }

    #[test]
    fn converges_to_new_target() {
        let mut s = SpringFollower::new(0.0, SpringParams::new(120.0, 22.0, 1.0));
        s.set_target(1.0);
        for _ in 0..600 {
            s.step(1.0 / 60.0);
        }
        assert!(s.is_settled());
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn retarget_is_continuous() {
        let mut s = SpringFollower::new(6.0, TILT);
        s.set_target(72.0);
        for _ in 0..5 {
            s.step(1.0 / 60.0);
        }
        let before = s.value();
        let v_before = s.velocity();
        s.set_target(6.0);
        assert_eq!(s.value(), before);
        assert_eq!(s.velocity(), v_before);
        assert!(before > 6.0 && before < 72.0);
    }

    #[test]
    fn repeated_same_target_does_not_reset_motion() {
        let mut s = SpringFollower::new(0.0, TILT);
        s.set_target(1.0);
        s.step(1.0 / 60.0);
        let v = s.velocity();
        s.set_target(1.0);
        assert_eq!(s.velocity(), v);
        assert!(v > 0.0);
    }

    #[test]
    fn nan_target_is_ignored() {
        let mut s = SpringFollower::new(0.0, TILT);
        s.set_target(f64::NAN);
        assert_eq!(s.target(), 0.0);
        s.set_target(f64::INFINITY);
        assert_eq!(s.target(), 0.0);
        s.step(1.0 / 60.0);
        assert!(s.value().is_finite());
    }

    #[test]
    fn zero_or_bad_dt_leaves_state_alone() {
        let mut s = SpringFollower::new(0.0, TILT);
        s.set_target(10.0);
        s.step(0.0);
        s.step(f64::NAN);
        s.step(-1.0);
        assert_eq!(s.value(), 0.0);
        assert_eq!(s.velocity(), 0.0);
    }
}
