//! Circular bodies and the integration step
//!
//! Every moving entity is a circle with a position and a velocity. Velocity is
//! set directly by gameplay; there is no force or acceleration model.

use glam::Vec2;

/// Advance a position by a velocity over `dt` seconds
#[inline]
pub fn integrate(position: Vec2, velocity: Vec2, dt: f32) -> Vec2 {
    position + velocity * dt
}

/// A moving circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    /// Create a resting body.
    ///
    /// Panics if `radius` is not a positive finite number.
    pub fn new(pos: Vec2, radius: f32) -> Self {
        assert!(
            radius.is_finite() && radius > 0.0,
            "body radius must be positive, got {radius}"
        );
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Move by the current velocity
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos = integrate(self.pos, self.vel, dt);
    }

    /// True iff the circles overlap (touching does not count)
    #[inline]
    pub fn collides(&self, other: &Body) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }

    /// True if the centre lies outside `[0, width] x [0, height]` grown by `margin`
    pub fn outside_bounds(&self, width: f32, height: f32, margin: f32) -> bool {
        self.pos.x < -margin
            || self.pos.y < -margin
            || self.pos.x > width + margin
            || self.pos.y > height + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integrate() {
        let p = integrate(Vec2::new(1.0, 2.0), Vec2::new(10.0, -4.0), 0.5);
        assert_eq!(p, Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_touching_circles_do_not_collide() {
        let a = Body::new(Vec2::ZERO, 10.0);
        let b = Body::new(Vec2::new(20.0, 0.0), 10.0);
        assert!(!a.collides(&b));

        let c = Body::new(Vec2::new(19.9, 0.0), 10.0);
        assert!(a.collides(&c));
    }

    #[test]
    #[should_panic(expected = "radius must be positive")]
    fn test_zero_radius_rejected() {
        let _ = Body::new(Vec2::ZERO, 0.0);
    }

    #[test]
    #[should_panic(expected = "radius must be positive")]
    fn test_negative_radius_rejected() {
        let _ = Body::new(Vec2::ZERO, -5.0);
    }

    #[test]
    fn test_outside_bounds() {
        let b = Body::new(Vec2::new(-50.0, 100.0), 5.0);
        assert!(!b.outside_bounds(1280.0, 720.0, 60.0));
        assert!(b.outside_bounds(1280.0, 720.0, 40.0));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -2000.0f32..2000.0, ay in -2000.0f32..2000.0, ar in 0.5f32..100.0,
            bx in -2000.0f32..2000.0, by in -2000.0f32..2000.0, br in 0.5f32..100.0,
        ) {
            let a = Body::new(Vec2::new(ax, ay), ar);
            let b = Body::new(Vec2::new(bx, by), br);
            prop_assert_eq!(a.collides(&b), b.collides(&a));
            prop_assert_eq!(
                a.collides(&b),
                Vec2::new(ax, ay).distance(Vec2::new(bx, by)) < ar + br
            );
        }
    }
}
