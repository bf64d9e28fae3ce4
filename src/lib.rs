//! Asteroids Arcade - asteroid-avoidance shooter with a high-score board
//!
//! Core modules:
//! - `sim`: Per-frame simulation (bodies, entities, spawner, collisions, scoring)
//! - `game`: Top-level state machine (menus, playing, pause, game over, high scores)
//! - `render`: Read-only draw list handed to the rendering collaborator
//! - `platform`: Input events and key/value storage (browser/native)
//! - `highscores`, `persistence`, `service`, `pending`: Score-store contract and backends
//! - `tuning`, `settings`: Data-driven balance and runtime configuration
//! - `web`: wasm-bindgen surface for the browser build

pub mod error;
pub mod game;
pub mod highscores;
pub mod pending;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod service;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ConfigError, StoreError};
pub use game::{GameStateMachine, StateKind};
pub use highscores::{HighScore, MemoryScoreStore, ScoreStore};
pub use settings::{Settings, StoreBackend};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Visible arena dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Nominal frame rate of the cooperative loop
    pub const TARGET_FPS: u32 = 60;

    /// Player ship collision radius
    pub const PLAYER_RADIUS: f32 = 20.0;
    /// Projectile collision radius
    pub const SHOT_RADIUS: f32 = 5.0;

    /// Radius of the smallest asteroid; every asteroid is a multiple of this
    pub const ASTEROID_MIN_RADIUS: f32 = 20.0;
    /// Number of asteroid size tiers (1 = small, 3 = large)
    pub const ASTEROID_KINDS: u8 = 3;
    pub const ASTEROID_MAX_RADIUS: f32 = ASTEROID_MIN_RADIUS * ASTEROID_KINDS as f32;

    /// Leaderboard size used for qualification checks
    pub const TOP_SCORES: usize = 10;
    /// Longest accepted player name (characters)
    pub const MAX_NAME_LENGTH: usize = 20;
    /// Names longer than this are truncated on the high-score screen
    pub const DISPLAY_NAME_LENGTH: usize = 15;
}

/// Centre of the visible arena
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(consts::SCREEN_WIDTH / 2.0, consts::SCREEN_HEIGHT / 2.0)
}

/// Rotate a vector by an angle in degrees (positive is clockwise on a y-down screen)
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Unit heading for a rotation in degrees; rotation 0 points down the screen (+y)
#[inline]
pub fn forward_vector(rotation: f32) -> Vec2 {
    rotate_deg(Vec2::Y, rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_vector_quarter_turns() {
        let f0 = forward_vector(0.0);
        assert!((f0 - Vec2::Y).length() < 1e-6);

        // +90° takes +y to -x
        let f90 = forward_vector(90.0);
        assert!((f90 - Vec2::new(-1.0, 0.0)).length() < 1e-5);

        let f180 = forward_vector(180.0);
        assert!((f180 - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotate_deg_preserves_length() {
        let v = Vec2::new(3.0, 4.0);
        for deg in [-50.0, -20.0, 0.0, 33.0, 270.0] {
            assert!((rotate_deg(v, deg).length() - 5.0).abs() < 1e-4);
        }
    }
}
