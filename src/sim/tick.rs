//! Per-frame simulation tick
//!
//! Core game loop step: controls, motion, collisions, scoring, lives.

use super::entity::Movable;
use super::session::PlayingSession;
use crate::platform::input::InputEvent;

/// Controls held during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust_forward: bool,
    pub thrust_reverse: bool,
    pub fire: bool,
    /// Pause request; the tick does nothing else
    pub pause: bool,
}

impl TickInput {
    /// Collapse a batch of events into held controls (duplicates count once)
    pub fn from_events(events: &[InputEvent]) -> Self {
        let mut input = Self::default();
        for event in events {
            match event {
                InputEvent::RotateLeft => input.rotate_left = true,
                InputEvent::RotateRight => input.rotate_right = true,
                InputEvent::ThrustForward => input.thrust_forward = true,
                InputEvent::ThrustReverse => input.thrust_reverse = true,
                InputEvent::Fire => input.fire = true,
                InputEvent::Pause => input.pause = true,
                _ => {}
            }
        }
        input
    }
}

/// Outcome of a finished session, handed to the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionResult {
    pub final_score: u64,
}

/// What the state machine should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// Pause was requested; the session was not advanced
    Pause,
    /// The last life was lost
    GameOver(SessionResult),
}

/// Advance the session by `dt` seconds of wall-clock time
pub fn tick(session: &mut PlayingSession, input: &TickInput, dt: f32) -> TickOutcome {
    if input.pause {
        return TickOutcome::Pause;
    }

    session.time_ticks += 1;

    apply_controls(session, input, dt);
    update_entities(session, dt);

    if let Some(result) = resolve_collisions(session) {
        return TickOutcome::GameOver(result);
    }

    session.cull_offscreen();
    TickOutcome::Continue
}

fn apply_controls(session: &mut PlayingSession, input: &TickInput, dt: f32) {
    let tuning = session.tuning.clone();
    let player = &mut session.player;

    if input.rotate_left {
        player.rotate(-dt, tuning.player_turn_speed);
    }
    if input.rotate_right {
        player.rotate(dt, tuning.player_turn_speed);
    }
    if input.thrust_forward {
        player.move_forward(dt, tuning.player_speed);
    }
    if input.thrust_reverse {
        player.move_forward(-dt, tuning.player_speed);
    }
    if input.fire {
        if let Some(shot) = player.shoot(tuning.shoot_cooldown, tuning.shot_speed) {
            session.add_shot(shot);
        }
    }
}

fn update_entities(session: &mut PlayingSession, dt: f32) {
    session.player.update(dt);
    for asteroid in &mut session.asteroids {
        asteroid.update(dt);
    }
    for shot in &mut session.shots {
        shot.update(dt);
    }

    // Spawned after the motion step, so a new asteroid starts exactly at its spawn point
    if let Some(asteroid) = session
        .field
        .update(dt, &mut session.rng, &session.tuning)
    {
        let id = session.add_asteroid(asteroid);
        log::debug!("Asteroid {id} spawned ({} live)", session.asteroids.len());
    }
}

/// Evaluate every pair against the asteroids present at the start of the phase.
///
/// Shot hits are scored first so a death in the same tick records them in the
/// final score. Children of split asteroids join the field afterwards and are
/// not tested until the next tick.
fn resolve_collisions(session: &mut PlayingSession) -> Option<SessionResult> {
    let player_hit = !session.player.is_invincible
        && session
            .asteroids
            .iter()
            .any(|a| session.player.collides_with(a));

    let count = session.asteroids.len();
    let mut destroyed = vec![false; count];
    let mut spent = vec![false; session.shots.len()];
    let mut children = Vec::new();

    for i in 0..count {
        let asteroid = &session.asteroids[i];
        let Some(j) = session
            .shots
            .iter()
            .enumerate()
            .position(|(j, shot)| !spent[j] && shot.collides_with(asteroid))
        else {
            continue;
        };

        spent[j] = true;
        destroyed[i] = true;
        if let Some(pair) = asteroid.split(&mut session.rng, &session.tuning) {
            children.extend(pair);
        }
        let kind = asteroid.kind();
        session.award_asteroid(kind);
    }

    let mut index = 0;
    session.asteroids.retain(|_| {
        let keep = !destroyed[index];
        index += 1;
        keep
    });
    let mut index = 0;
    session.shots.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });
    for child in children {
        session.add_asteroid(child);
    }

    if player_hit {
        return handle_player_death(session);
    }
    None
}

fn handle_player_death(session: &mut PlayingSession) -> Option<SessionResult> {
    session.lives = session.lives.saturating_sub(1);
    if session.lives == 0 {
        log::info!("Player destroyed, game over with {} points", session.score);
        return Some(SessionResult {
            final_score: session.score,
        });
    }
    log::info!("Player destroyed, {} lives left", session.lives);
    session.respawn_player();
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena_center;
    use crate::consts::*;
    use crate::sim::state::{Asteroid, Shot};
    use crate::tuning::Tuning;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    /// Session whose spawner never fires during a test
    fn quiet_session() -> PlayingSession {
        let tuning = Tuning {
            spawn_interval: 1.0e6,
            ..Default::default()
        };
        PlayingSession::new(42, tuning)
    }

    #[test]
    fn test_pause_does_not_advance() {
        let mut s = quiet_session();
        s.add_asteroid(Asteroid::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 0.0), 3));
        let before = s.clone();

        let input = TickInput {
            pause: true,
            fire: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut s, &input, DT), TickOutcome::Pause);
        assert_eq!(s, before);
    }

    #[test]
    fn test_fire_adds_one_shot() {
        let mut s = quiet_session();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut s, &input, DT);
        assert_eq!(s.shots.len(), 1);
        // Cooldown blocks the next frame
        tick(&mut s, &input, DT);
        assert_eq!(s.shots.len(), 1);
    }

    #[test]
    fn test_from_events_ignores_menu_events() {
        let input = TickInput::from_events(&[
            InputEvent::RotateLeft,
            InputEvent::RotateLeft,
            InputEvent::Confirm,
            InputEvent::Text('x'),
            InputEvent::Fire,
        ]);
        assert!(input.rotate_left);
        assert!(input.fire);
        assert!(!input.pause);
        assert!(!input.thrust_forward);
    }

    #[test]
    fn test_shot_destroys_small_asteroid() {
        let mut s = quiet_session();
        let pos = Vec2::new(200.0, 200.0);
        s.add_asteroid(Asteroid::new(pos, Vec2::ZERO, 1));
        s.add_shot(Shot::new(pos, Vec2::ZERO));

        assert_eq!(tick(&mut s, &TickInput::default(), DT), TickOutcome::Continue);
        assert!(s.asteroids.is_empty());
        assert!(s.shots.is_empty());
        assert_eq!(s.score, 100);
    }

    #[test]
    fn test_shot_splits_large_asteroid() {
        let mut s = quiet_session();
        let pos = Vec2::new(200.0, 200.0);
        s.add_asteroid(Asteroid::new(pos, Vec2::new(30.0, 0.0), 3));
        s.add_shot(Shot::new(pos, Vec2::ZERO));

        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.score, 20);
        assert_eq!(s.asteroids.len(), 2);
        assert!(s.asteroids.iter().all(|a| a.kind() == 2));
    }

    #[test]
    fn test_one_shot_resolves_one_asteroid() {
        let mut s = quiet_session();
        let pos = Vec2::new(300.0, 300.0);
        s.add_asteroid(Asteroid::new(pos, Vec2::ZERO, 1));
        s.add_asteroid(Asteroid::new(pos + Vec2::new(5.0, 0.0), Vec2::ZERO, 1));
        s.add_shot(Shot::new(pos, Vec2::ZERO));

        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.asteroids.len(), 1);
        assert_eq!(s.score, 100);
    }

    #[test]
    fn test_score_never_decreases() {
        let mut s = PlayingSession::new(99, Tuning::default());
        let input = TickInput {
            fire: true,
            rotate_right: true,
            ..Default::default()
        };
        let mut last = 0;
        for _ in 0..3000 {
            if let TickOutcome::GameOver(result) = tick(&mut s, &input, DT) {
                assert!(result.final_score >= last);
                break;
            }
            assert!(s.score >= last);
            last = s.score;
        }
    }

    #[test]
    fn test_death_with_lives_respawns() {
        let mut s = quiet_session();
        s.lives = 2;
        s.player.reset(Vec2::new(100.0, 100.0));
        s.player.rotation = 90.0;
        s.add_asteroid(Asteroid::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 1));
        let near_center =
            s.add_asteroid(Asteroid::new(arena_center() + Vec2::new(50.0, 0.0), Vec2::ZERO, 2));
        let far = s.add_asteroid(Asteroid::new(Vec2::new(1100.0, 600.0), Vec2::ZERO, 3));

        assert_eq!(tick(&mut s, &TickInput::default(), DT), TickOutcome::Continue);
        assert_eq!(s.lives, 1);
        assert_eq!(s.player.body.pos, arena_center());
        assert_eq!(s.player.rotation, 0.0);
        assert!(s.player.is_invincible);
        assert!(s.asteroids.iter().all(|a| a.id != near_center));
        assert!(s.asteroids.iter().any(|a| a.id == far));
    }

    #[test]
    fn test_last_life_ends_session() {
        let mut s = quiet_session();
        s.lives = 1;
        s.score = 730;
        let c = s.player.body.pos;
        s.add_asteroid(Asteroid::new(c, Vec2::ZERO, 2));

        let outcome = tick(&mut s, &TickInput::default(), DT);
        assert_eq!(
            outcome,
            TickOutcome::GameOver(SessionResult { final_score: 730 })
        );
        assert_eq!(s.lives, 0);
    }

    #[test]
    fn test_invincible_player_passes_through() {
        let mut s = quiet_session();
        s.player.start_invincibility(3.0);
        let c = s.player.body.pos;
        s.add_asteroid(Asteroid::new(c, Vec2::ZERO, 3));

        tick(&mut s, &TickInput::default(), DT);
        assert_eq!(s.lives, 3);
        assert_eq!(s.asteroids.len(), 1);
    }

    #[test]
    fn test_spawner_feeds_field() {
        let mut s = PlayingSession::new(5, Tuning::default());
        for _ in 0..60 {
            tick(&mut s, &TickInput::default(), DT);
        }
        // 1 second at an 0.8 s interval
        assert_eq!(s.asteroids.len(), 1);
        assert_eq!(s.asteroids[0].body.radius, ASTEROID_MAX_RADIUS);
    }

    #[test]
    fn test_determinism() {
        let mut a = PlayingSession::new(777, Tuning::default());
        let mut b = PlayingSession::new(777, Tuning::default());
        let inputs = [
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                rotate_left: true,
                thrust_forward: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for frame in 0..600 {
            let input = &inputs[frame % inputs.len()];
            let oa = tick(&mut a, input, DT);
            let ob = tick(&mut b, input, DT);
            assert_eq!(oa, ob);
        }
        assert_eq!(a, b);
    }
}
