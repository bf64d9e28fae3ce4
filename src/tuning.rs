//! Data-driven game balance
//!
//! Every gameplay number that is not structural (screen size, radii) lives here
//! so it can be overridden from a settings file without recompiling.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Turn rate (degrees per second)
    pub player_turn_speed: f32,
    /// Thrust speed (pixels per second)
    pub player_speed: f32,
    /// Projectile speed (pixels per second)
    pub shot_speed: f32,
    /// Seconds between shots
    pub shoot_cooldown: f32,

    // === Asteroid field ===
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Spawn speed range (pixels per second)
    pub spawn_speed_min: f32,
    pub spawn_speed_max: f32,
    /// Maximum deviation from the inward edge normal (degrees)
    pub spawn_aim_jitter: f32,
    /// Distance outside the screen before an entity is culled
    pub cull_margin: f32,

    // === Splitting ===
    /// Child deflection angle range (degrees)
    pub split_angle_min: f32,
    pub split_angle_max: f32,
    /// Child speed multiplier
    pub split_speedup: f32,

    // === Lives ===
    pub starting_lives: u32,
    /// Score step between extra lives (also the first threshold)
    pub extra_life_step: u64,
    /// Respawn invulnerability (seconds)
    pub invincibility_duration: f32,
    /// Visibility toggle period while invulnerable (seconds)
    pub blink_interval: f32,
    /// Asteroids closer than this to the arena centre are cleared on respawn
    pub safety_zone_radius: f32,

    // === Scoring ===
    /// Points per asteroid kind, indexed by `kind - 1` (small, medium, large)
    pub asteroid_points: [u64; 3],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_turn_speed: 300.0,
            player_speed: 200.0,
            shot_speed: 500.0,
            shoot_cooldown: 0.3,

            spawn_interval: 0.8,
            spawn_speed_min: 40.0,
            spawn_speed_max: 100.0,
            spawn_aim_jitter: 30.0,
            cull_margin: 200.0,

            split_angle_min: 20.0,
            split_angle_max: 50.0,
            split_speedup: 1.2,

            starting_lives: 3,
            extra_life_step: 1000,
            invincibility_duration: 3.0,
            blink_interval: 0.1,
            safety_zone_radius: 150.0,

            asteroid_points: [100, 50, 20],
        }
    }
}

impl Tuning {
    /// Points awarded for destroying an asteroid of the given kind (1..=3)
    pub fn points_for_kind(&self, kind: u8) -> u64 {
        match kind {
            1..=3 => self.asteroid_points[kind as usize - 1],
            _ => 0,
        }
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player_turn_speed", self.player_turn_speed),
            ("player_speed", self.player_speed),
            ("shot_speed", self.shot_speed),
            ("spawn_interval", self.spawn_interval),
            ("spawn_speed_min", self.spawn_speed_min),
            ("split_speedup", self.split_speedup),
            ("blink_interval", self.blink_interval),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }

        let non_negative = [
            ("shoot_cooldown", self.shoot_cooldown),
            ("invincibility_duration", self.invincibility_duration),
            ("safety_zone_radius", self.safety_zone_radius),
            ("split_angle_min", self.split_angle_min),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }

        if self.spawn_speed_max < self.spawn_speed_min {
            return Err(ConfigError::OutOfRange {
                field: "spawn_speed_max",
                value: self.spawn_speed_max as f64,
            });
        }
        if self.split_angle_max < self.split_angle_min {
            return Err(ConfigError::OutOfRange {
                field: "split_angle_max",
                value: self.split_angle_max as f64,
            });
        }
        // Jitter past 90° could aim a spawn away from the screen
        if !(0.0..90.0).contains(&self.spawn_aim_jitter) {
            return Err(ConfigError::OutOfRange {
                field: "spawn_aim_jitter",
                value: self.spawn_aim_jitter as f64,
            });
        }
        // Culling must never reach asteroids still waiting at their spawn point
        if self.cull_margin <= crate::consts::ASTEROID_MAX_RADIUS {
            return Err(ConfigError::OutOfRange {
                field: "cull_margin",
                value: self.cull_margin as f64,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::OutOfRange {
                field: "starting_lives",
                value: 0.0,
            });
        }
        if self.extra_life_step == 0 {
            return Err(ConfigError::OutOfRange {
                field: "extra_life_step",
                value: 0.0,
            });
        }
        Ok(())
    }
}
