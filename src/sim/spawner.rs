//! Asteroid field: periodic spawns just outside the screen
//!
//! Every `spawn_interval` seconds a large asteroid appears beyond a random
//! screen edge, heading inward with a small random deflection.

use glam::Vec2;
use rand::Rng;

use super::state::Asteroid;
use crate::consts::*;
use crate::rotate_deg;
use crate::tuning::Tuning;

/// Screen edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Unit direction pointing from this edge into the screen
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
        }
    }

    /// Spawn point at fraction `t` (0..=1) along the edge, one max radius outside
    pub fn spawn_point(self, t: f32) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(-ASTEROID_MAX_RADIUS, t * SCREEN_HEIGHT),
            Edge::Right => Vec2::new(SCREEN_WIDTH + ASTEROID_MAX_RADIUS, t * SCREEN_HEIGHT),
            Edge::Top => Vec2::new(t * SCREEN_WIDTH, -ASTEROID_MAX_RADIUS),
            Edge::Bottom => Vec2::new(t * SCREEN_WIDTH, SCREEN_HEIGHT + ASTEROID_MAX_RADIUS),
        }
    }
}

/// Spawn timer for the asteroid field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsteroidField {
    spawn_timer: f32,
}

impl AsteroidField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Advance the timer; returns a new asteroid when the interval elapses
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R, tuning: &Tuning) -> Option<Asteroid> {
        self.spawn_timer += dt;
        if self.spawn_timer <= tuning.spawn_interval {
            return None;
        }
        self.spawn_timer = 0.0;
        Some(Self::spawn(rng, tuning))
    }

    /// Create a large asteroid off-screen, aimed into the play area
    pub fn spawn<R: Rng>(rng: &mut R, tuning: &Tuning) -> Asteroid {
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let speed = rng.random_range(tuning.spawn_speed_min..=tuning.spawn_speed_max);
        let jitter = rng.random_range(-tuning.spawn_aim_jitter..=tuning.spawn_aim_jitter);
        let vel = rotate_deg(edge.inward() * speed, jitter);
        let pos = edge.spawn_point(rng.random_range(0.0..=1.0));
        log::trace!("spawning asteroid from {edge:?} at {pos} vel {vel}");
        Asteroid::new(pos, vel, ASTEROID_KINDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_timer_fires_after_interval() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut field = AsteroidField::new();

        assert!(field.update(0.5, &mut rng, &tuning).is_none());
        assert!(field.update(0.2, &mut rng, &tuning).is_none());
        assert!(field.update(0.2, &mut rng, &tuning).is_some());
        assert_eq!(field.spawn_timer(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_spawns_are_large_offscreen_and_inbound(seed in any::<u64>()) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let a = AsteroidField::spawn(&mut rng, &tuning);

            prop_assert_eq!(a.kind(), ASTEROID_KINDS);

            let p = a.body.pos;
            let outside = p.x < 0.0 || p.y < 0.0 || p.x > SCREEN_WIDTH || p.y > SCREEN_HEIGHT;
            prop_assert!(outside, "spawned on screen at {:?}", p);

            let speed = a.body.vel.length();
            prop_assert!(speed >= tuning.spawn_speed_min - 1e-3);
            prop_assert!(speed <= tuning.spawn_speed_max + 1e-3);

            let edge = if p.x < 0.0 {
                Edge::Left
            } else if p.x > SCREEN_WIDTH {
                Edge::Right
            } else if p.y < 0.0 {
                Edge::Top
            } else {
                Edge::Bottom
            };
            prop_assert!(a.body.vel.dot(edge.inward()) > 0.0);
        }
    }
}
