//! Entity types: the player ship, asteroids and shots

use glam::Vec2;
use rand::Rng;

use super::body::Body;
use super::entity::{Drawable, Movable};
use crate::consts::*;
use crate::render::{DrawList, colors};
use crate::tuning::Tuning;
use crate::{forward_vector, rotate_deg};

/// Placeholder id for entities not yet inserted into a session
pub const UNASSIGNED_ID: u32 = 0;

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub body: Body,
    /// Heading in degrees; 0 points down the screen, positive turns clockwise
    pub rotation: f32,
    /// Seconds until the next shot is allowed
    pub shoot_cooldown: f32,
    pub is_invincible: bool,
    pub invincibility_timer: f32,
    pub blink_timer: f32,
    /// False during the "off" half of the invulnerability blink
    pub visible: bool,
    blink_interval: f32,
}

impl Player {
    pub fn new(pos: Vec2, blink_interval: f32) -> Self {
        Self {
            id: UNASSIGNED_ID,
            body: Body::new(pos, PLAYER_RADIUS),
            rotation: 0.0,
            shoot_cooldown: 0.0,
            is_invincible: false,
            invincibility_timer: 0.0,
            blink_timer: 0.0,
            visible: true,
            blink_interval,
        }
    }

    /// Turn by `turn_speed * dt` degrees (negative `dt` turns the other way)
    pub fn rotate(&mut self, dt: f32, turn_speed: f32) {
        self.rotation += turn_speed * dt;
    }

    /// Move along the heading; negative `dt` thrusts in reverse
    pub fn move_forward(&mut self, dt: f32, speed: f32) {
        self.body.pos += forward_vector(self.rotation) * speed * dt;
    }

    /// Fire a shot along the heading unless the gun is cooling down
    pub fn shoot(&mut self, cooldown: f32, shot_speed: f32) -> Option<Shot> {
        if self.shoot_cooldown > 0.0 {
            return None;
        }
        self.shoot_cooldown = cooldown;
        Some(Shot::new(
            self.body.pos,
            forward_vector(self.rotation) * shot_speed,
        ))
    }

    pub fn start_invincibility(&mut self, duration: f32) {
        self.is_invincible = true;
        self.invincibility_timer = duration;
        self.blink_timer = 0.0;
        self.visible = true;
    }

    /// Teleport for a respawn, clearing motion, heading and cooldown
    pub fn reset(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.body.vel = Vec2::ZERO;
        self.rotation = 0.0;
        self.shoot_cooldown = 0.0;
    }

    /// Ship outline: nose along the heading, two rear corners
    pub fn triangle(&self) -> [Vec2; 3] {
        let r = self.body.radius;
        let forward = forward_vector(self.rotation);
        let right = forward_vector(self.rotation + 90.0) * r / 1.5;
        let pos = self.body.pos;
        [
            pos + forward * r,
            pos - forward * r - right,
            pos - forward * r + right,
        ]
    }
}

impl Movable for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn update(&mut self, dt: f32) {
        self.shoot_cooldown -= dt;

        if self.is_invincible {
            self.invincibility_timer -= dt;
            self.blink_timer += dt;

            if self.blink_timer >= self.blink_interval {
                self.visible = !self.visible;
                self.blink_timer = 0.0;
            }

            if self.invincibility_timer <= 0.0 {
                self.is_invincible = false;
                self.visible = true;
            }
        }
    }
}

impl Drawable for Player {
    fn draw(&self, list: &mut DrawList) {
        if self.visible {
            list.triangle(self.triangle(), colors::WHITE);
        }
    }
}

/// An asteroid; its size tier is encoded in the radius
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub id: u32,
    pub body: Body,
}

impl Asteroid {
    /// Create an asteroid of the given kind (1 = small ..= 3 = large)
    pub fn new(pos: Vec2, vel: Vec2, kind: u8) -> Self {
        assert!(
            (1..=ASTEROID_KINDS).contains(&kind),
            "asteroid kind must be 1..={ASTEROID_KINDS}, got {kind}"
        );
        Self {
            id: UNASSIGNED_ID,
            body: Body::new(pos, ASTEROID_MIN_RADIUS * kind as f32).with_velocity(vel),
        }
    }

    /// Create from a raw radius, which must be an exact kind multiple
    pub fn with_radius(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        let kind = (radius / ASTEROID_MIN_RADIUS).round();
        assert!(
            (kind * ASTEROID_MIN_RADIUS - radius).abs() < 1e-3,
            "asteroid radius {radius} is not a multiple of {ASTEROID_MIN_RADIUS}"
        );
        Self::new(pos, vel, kind as u8)
    }

    /// Size tier: 1 = small, 2 = medium, 3 = large
    pub fn kind(&self) -> u8 {
        (self.body.radius / ASTEROID_MIN_RADIUS).round() as u8
    }

    /// Break into two smaller asteroids.
    ///
    /// Returns `None` for the smallest kind. Otherwise both children sit at
    /// the parent's position, one radius step smaller, with the parent's
    /// velocity rotated by `+θ` and `-θ` and sped up. The caller removes the
    /// parent.
    pub fn split<R: Rng>(&self, rng: &mut R, tuning: &Tuning) -> Option<[Asteroid; 2]> {
        if self.body.radius <= ASTEROID_MIN_RADIUS {
            return None;
        }
        let angle = rng.random_range(tuning.split_angle_min..=tuning.split_angle_max);
        let child_kind = self.kind() - 1;
        let pos = self.body.pos;
        let vel = self.body.vel;
        let first = Asteroid::new(pos, rotate_deg(vel, angle) * tuning.split_speedup, child_kind);
        let second = Asteroid::new(pos, rotate_deg(vel, -angle) * tuning.split_speedup, child_kind);
        log::trace!("asteroid {} split at {angle:.1}°", self.id);
        Some([first, second])
    }
}

impl Movable for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
    }
}

impl Drawable for Asteroid {
    fn draw(&self, list: &mut DrawList) {
        list.circle(self.body.pos, self.body.radius, colors::WHITE);
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub id: u32,
    pub body: Body,
}

impl Shot {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            id: UNASSIGNED_ID,
            body: Body::new(pos, SHOT_RADIUS).with_velocity(vel),
        }
    }
}

impl Movable for Shot {
    fn body(&self) -> &Body {
        &self.body
    }

    fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
    }
}

impl Drawable for Shot {
    fn draw(&self, list: &mut DrawList) {
        list.circle(self.body.pos, self.body.radius, colors::SHOT);
    }
}
