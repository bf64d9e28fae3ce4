//! Playing session: everything that lives for one run of active gameplay
//!
//! The session owns the player, the asteroid and shot collections, the
//! spawner, the seeded RNG and the running score. It is created when play
//! starts and dropped when the run ends; pausing keeps it untouched.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::EntityRef;
use super::spawner::AsteroidField;
use super::state::{Asteroid, Player, Shot};
use crate::arena_center;
use crate::consts::*;
use crate::render::{DrawList, draw_hud};
use crate::tuning::Tuning;

/// Complete state of one playing session
#[derive(Debug, Clone, PartialEq)]
pub struct PlayingSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub score: u64,
    pub lives: u32,
    /// Score at which the next extra life is awarded
    pub extra_life_threshold: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live asteroids (creation order)
    pub asteroids: Vec<Asteroid>,
    /// Live shots (creation order)
    pub shots: Vec<Shot>,
    pub field: AsteroidField,
    pub(crate) tuning: Tuning,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl PlayingSession {
    /// Start a fresh session: full lives, zero score, player at the centre
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut session = Self {
            seed,
            score: 0,
            lives: tuning.starting_lives,
            extra_life_threshold: tuning.extra_life_step,
            time_ticks: 0,
            player: Player::new(arena_center(), tuning.blink_interval),
            asteroids: Vec::new(),
            shots: Vec::new(),
            field: AsteroidField::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            next_id: 1,
        };
        session.player.id = session.next_entity_id();
        log::info!("Session started (seed {seed}, lives {})", session.lives);
        session
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add an asteroid to the field, assigning its id; returns the id
    pub fn add_asteroid(&mut self, mut asteroid: Asteroid) -> u32 {
        asteroid.id = self.next_entity_id();
        let id = asteroid.id;
        self.asteroids.push(asteroid);
        id
    }

    pub fn add_shot(&mut self, mut shot: Shot) -> u32 {
        shot.id = self.next_entity_id();
        let id = shot.id;
        self.shots.push(shot);
        id
    }

    /// Credit points for destroying an asteroid of `kind` and check the extra-life threshold
    pub fn award_asteroid(&mut self, kind: u8) -> u64 {
        let points = self.tuning.points_for_kind(kind);
        self.score += points;
        self.check_extra_life();
        points
    }

    /// At most one life per call, even if the score jumped past several thresholds
    fn check_extra_life(&mut self) {
        if self.score >= self.extra_life_threshold {
            self.lives += 1;
            self.extra_life_threshold += self.tuning.extra_life_step;
            log::info!(
                "Extra life at {} (lives {}, next at {})",
                self.score,
                self.lives,
                self.extra_life_threshold
            );
        }
    }

    /// Put the player back at the centre with temporary invulnerability
    pub fn respawn_player(&mut self) {
        self.player.reset(arena_center());
        self.player.start_invincibility(self.tuning.invincibility_duration);
        let cleared = self.clear_safety_zone();
        log::info!("Player respawned (lives {}, cleared {cleared} asteroids)", self.lives);
    }

    /// Remove asteroids whose centre lies inside the safety zone; returns how many
    pub fn clear_safety_zone(&mut self) -> usize {
        let before = self.asteroids.len();
        let center = arena_center();
        let radius = self.tuning.safety_zone_radius;
        self.asteroids.retain(|a| center.distance(a.body.pos) >= radius);
        before - self.asteroids.len()
    }

    /// Drop shots and asteroids that drifted far outside the screen
    pub fn cull_offscreen(&mut self) {
        let margin = self.tuning.cull_margin;
        self.shots
            .retain(|s| !s.body.outside_bounds(SCREEN_WIDTH, SCREEN_HEIGHT, margin));
        self.asteroids
            .retain(|a| !a.body.outside_bounds(SCREEN_WIDTH, SCREEN_HEIGHT, margin));
    }

    /// Every live entity in creation order
    pub fn entities(&self) -> Vec<EntityRef<'_>> {
        let mut all = Vec::with_capacity(1 + self.asteroids.len() + self.shots.len());
        all.push(EntityRef::Player(&self.player));
        all.extend(self.asteroids.iter().map(EntityRef::Asteroid));
        all.extend(self.shots.iter().map(EntityRef::Shot));
        all.sort_by_key(|e| e.id());
        all
    }

    /// Append the frame: entities in creation order, then the HUD
    pub fn draw(&self, list: &mut DrawList) {
        for entity in self.entities() {
            entity.as_drawable().draw(list);
        }
        draw_hud(list, self.score, self.lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_new_session_defaults() {
        let s = PlayingSession::new(1, Tuning::default());
        assert_eq!(s.score, 0);
        assert_eq!(s.lives, 3);
        assert_eq!(s.extra_life_threshold, 1000);
        assert_eq!(s.player.body.pos, arena_center());
        assert_eq!(s.player.id, 1);
        assert!(s.asteroids.is_empty());
        assert!(s.shots.is_empty());
    }

    #[test]
    fn test_extra_life_from_950() {
        let mut s = PlayingSession::new(1, Tuning::default());
        s.score = 950;
        let points = s.award_asteroid(1);
        assert_eq!(points, 100);
        assert_eq!(s.score, 1050);
        assert_eq!(s.lives, 4);
        assert_eq!(s.extra_life_threshold, 2000);
    }

    #[test]
    fn test_big_jump_awards_single_life() {
        let tuning = Tuning {
            asteroid_points: [2500, 50, 20],
            ..Default::default()
        };
        let mut s = PlayingSession::new(1, tuning);
        s.award_asteroid(1);
        assert_eq!(s.score, 2500);
        assert_eq!(s.lives, 4);
        assert_eq!(s.extra_life_threshold, 2000);

        // The next award catches up by one more step
        s.award_asteroid(3);
        assert_eq!(s.lives, 5);
        assert_eq!(s.extra_life_threshold, 3000);
    }

    #[test]
    fn test_safety_zone_clear() {
        let mut s = PlayingSession::new(1, Tuning::default());
        let c = arena_center();
        s.add_asteroid(Asteroid::new(c + Vec2::new(100.0, 0.0), Vec2::ZERO, 3));
        s.add_asteroid(Asteroid::new(c + Vec2::new(0.0, 149.0), Vec2::ZERO, 1));
        let far = s.add_asteroid(Asteroid::new(c + Vec2::new(151.0, 0.0), Vec2::ZERO, 2));

        assert_eq!(s.clear_safety_zone(), 2);
        assert_eq!(s.asteroids.len(), 1);
        assert_eq!(s.asteroids[0].id, far);
    }

    #[test]
    fn test_cull_keeps_fresh_spawns() {
        let mut s = PlayingSession::new(1, Tuning::default());
        s.add_asteroid(Asteroid::new(Vec2::new(-ASTEROID_MAX_RADIUS, 100.0), Vec2::X, 3));
        s.add_shot(Shot::new(Vec2::new(-500.0, 100.0), Vec2::NEG_X));
        s.cull_offscreen();
        assert_eq!(s.asteroids.len(), 1);
        assert!(s.shots.is_empty());
    }

    #[test]
    fn test_draw_follows_creation_order() {
        let mut s = PlayingSession::new(1, Tuning::default());
        s.add_shot(Shot::new(Vec2::new(10.0, 10.0), Vec2::ZERO));
        s.add_asteroid(Asteroid::new(Vec2::new(500.0, 500.0), Vec2::ZERO, 2));

        let ids: Vec<u32> = s.entities().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let mut list = DrawList::new();
        s.draw(&mut list);
        use crate::render::Shape;
        let cmds = list.commands();
        assert!(matches!(cmds[0].shape, Shape::Triangle { .. }));
        assert!(matches!(cmds[1].shape, Shape::Circle { radius, .. } if radius == SHOT_RADIUS));
        assert!(matches!(cmds[2].shape, Shape::Circle { radius, .. } if radius == 40.0));
    }
}
