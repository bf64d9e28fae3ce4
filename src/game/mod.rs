//! Top-level game state machine
//!
//! Five states: MainMenu, Playing, Paused, GameOver, HighScores. Every
//! transition runs the old state's exit logic and the new state's entry
//! logic, except Paused -> Playing, which resumes the existing session
//! without re-entering Playing.

pub mod game_over;
pub mod high_scores;
pub mod menu;
pub mod name_entry;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::platform::input::InputEvent;
use crate::render::DrawList;
use crate::service::ScoreService;
use crate::sim::{PlayingSession, SessionResult, TickInput, TickOutcome, tick};
use crate::tuning::Tuning;

pub use game_over::{GameOverPhase, GameOverScreen};
pub use high_scores::HighScoresScreen;
pub use menu::{MainMenuScreen, Menu, PausedScreen};
pub use name_entry::NameEntry;

/// The five top-level states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    MainMenu,
    Playing,
    Paused,
    GameOver,
    HighScores,
}

/// Requested change of state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Goto(StateKind),
    /// Playing ended; carries the result into GameOver
    GameOver(SessionResult),
    /// Leave the game loop
    Quit,
}

/// Owns every state and the single score-service handle
pub struct GameStateMachine<S: ScoreService> {
    service: S,
    tuning: Tuning,
    top_n: usize,
    /// Seeds each new session
    rng: Pcg32,
    current: StateKind,
    running: bool,
    main_menu: MainMenuScreen,
    session: Option<PlayingSession>,
    paused: PausedScreen,
    game_over: GameOverScreen,
    high_scores: HighScoresScreen,
}

impl<S: ScoreService> GameStateMachine<S> {
    /// Start at the main menu
    pub fn new(service: S, tuning: Tuning, top_n: usize, seed: u64) -> Self {
        let mut machine = Self {
            service,
            tuning,
            top_n,
            rng: Pcg32::seed_from_u64(seed),
            current: StateKind::MainMenu,
            running: true,
            main_menu: MainMenuScreen::new(),
            session: None,
            paused: PausedScreen::new(),
            game_over: GameOverScreen::new(),
            high_scores: HighScoresScreen::new(),
        };
        machine.enter(StateKind::MainMenu, None);
        machine
    }

    pub fn current(&self) -> StateKind {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Live or paused session, if any
    pub fn session(&self) -> Option<&PlayingSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut PlayingSession> {
        self.session.as_mut()
    }

    pub fn main_menu(&self) -> &MainMenuScreen {
        &self.main_menu
    }

    pub fn game_over(&self) -> &GameOverScreen {
        &self.game_over
    }

    pub fn high_scores(&self) -> &HighScoresScreen {
        &self.high_scores
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Advance one frame. Returns `false` once the player chose Quit.
    ///
    /// While playing, the whole batch becomes one [`TickInput`]. In other
    /// states events are handled in order; events after one that changed
    /// state are dropped.
    pub fn tick(&mut self, events: &[InputEvent], dt: f32) -> bool {
        if !self.running {
            return false;
        }

        if self.current == StateKind::Playing {
            self.tick_playing(events, dt);
            return self.running;
        }

        for &event in events {
            if let Some(transition) = self.handle_event(event) {
                self.apply(transition);
                return self.running;
            }
        }

        match self.current {
            StateKind::MainMenu => self.main_menu.update(),
            StateKind::GameOver => self.game_over.update(),
            StateKind::HighScores => self.high_scores.update(),
            StateKind::Playing | StateKind::Paused => {}
        }
        self.running
    }

    fn tick_playing(&mut self, events: &[InputEvent], dt: f32) {
        let Some(session) = self.session.as_mut() else {
            log::error!("Playing without a session, returning to main menu");
            self.apply(Transition::Goto(StateKind::MainMenu));
            return;
        };
        let input = TickInput::from_events(events);
        match tick(session, &input, dt) {
            TickOutcome::Continue => {}
            TickOutcome::Pause => self.apply(Transition::Goto(StateKind::Paused)),
            TickOutcome::GameOver(result) => self.apply(Transition::GameOver(result)),
        }
    }

    fn handle_event(&mut self, event: InputEvent) -> Option<Transition> {
        match self.current {
            StateKind::MainMenu => self.main_menu.handle(event),
            StateKind::Paused => self.paused.handle(event),
            StateKind::GameOver => self.game_over.handle(event, &mut self.service),
            StateKind::HighScores => self.high_scores.handle(event),
            StateKind::Playing => None,
        }
    }

    /// Perform a transition: exit the current state, then enter the target
    pub fn apply(&mut self, transition: Transition) {
        let (target, result) = match transition {
            Transition::Quit => {
                log::info!("Quit requested from {:?}", self.current);
                self.exit(self.current, None);
                self.running = false;
                return;
            }
            Transition::Goto(target) => (target, None),
            Transition::GameOver(result) => (StateKind::GameOver, Some(result)),
        };

        let from = self.current;
        log::info!("State {from:?} -> {target:?}");
        self.exit(from, Some(target));
        self.current = target;

        if from == StateKind::Paused && target == StateKind::Playing {
            log::debug!("Resuming paused session");
            return;
        }
        self.enter(target, result);
    }

    fn exit(&mut self, from: StateKind, to: Option<StateKind>) {
        let keep_session = matches!(
            (from, to),
            (StateKind::Playing, Some(StateKind::Paused))
                | (StateKind::Paused, Some(StateKind::Playing))
        );
        if matches!(from, StateKind::Playing | StateKind::Paused) && !keep_session {
            if let Some(session) = self.session.take() {
                log::info!(
                    "Session ended (score {}, {} ticks)",
                    session.score,
                    session.time_ticks
                );
            }
        }
    }

    fn enter(&mut self, state: StateKind, result: Option<SessionResult>) {
        match state {
            StateKind::MainMenu => self.main_menu.enter(&mut self.service),
            StateKind::Playing => {
                let seed = self.rng.random::<u64>();
                self.session = Some(PlayingSession::new(seed, self.tuning.clone()));
            }
            StateKind::Paused => self.paused.enter(),
            StateKind::GameOver => {
                let final_score = result.map(|r| r.final_score).unwrap_or(0);
                self.game_over.enter(final_score, &mut self.service);
            }
            StateKind::HighScores => self.high_scores.enter(&mut self.service, self.top_n),
        }
    }

    /// Build the frame for the current state; never mutates game state
    pub fn draw(&self) -> DrawList {
        let mut list = DrawList::new();
        match self.current {
            StateKind::MainMenu => self.main_menu.draw(&mut list),
            StateKind::Playing => {
                if let Some(session) = &self.session {
                    session.draw(&mut list);
                }
            }
            StateKind::Paused => self.paused.draw(self.session.as_ref(), &mut list),
            StateKind::GameOver => self.game_over.draw(&mut list),
            StateKind::HighScores => self.high_scores.draw(&mut list),
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TOP_SCORES;
    use crate::highscores::MemoryScoreStore;
    use crate::service::InlineScoreService;

    const DT: f32 = 1.0 / 60.0;

    fn machine() -> GameStateMachine<InlineScoreService<MemoryScoreStore>> {
        let service = InlineScoreService::new(MemoryScoreStore::new(), TOP_SCORES);
        GameStateMachine::new(service, Tuning::default(), TOP_SCORES, 1)
    }

    #[test]
    fn test_starts_at_main_menu() {
        let m = machine();
        assert_eq!(m.current(), StateKind::MainMenu);
        assert!(m.session().is_none());
        assert!(m.draw().texts().any(|t| t == "ASTEROIDS"));
    }

    #[test]
    fn test_new_game_creates_session() {
        let mut m = machine();
        m.tick(&[InputEvent::Confirm], DT);
        assert_eq!(m.current(), StateKind::Playing);
        assert_eq!(m.session().map(|s| s.lives), Some(3));
    }

    #[test]
    fn test_events_after_transition_are_dropped() {
        let mut m = machine();
        // Confirm starts the game; the trailing NavigateDown must not leak anywhere
        m.tick(&[InputEvent::Confirm, InputEvent::NavigateDown], DT);
        assert_eq!(m.current(), StateKind::Playing);
        assert_eq!(m.session().map(|s| s.time_ticks), Some(0));
    }

    #[test]
    fn test_escape_pauses_without_resuming() {
        let mut m = machine();
        m.tick(&[InputEvent::Confirm], DT);
        m.tick(&[InputEvent::Pause, InputEvent::Cancel], DT);
        assert_eq!(m.current(), StateKind::Paused);
    }

    #[test]
    fn test_paused_to_main_menu_drops_session() {
        let mut m = machine();
        m.tick(&[InputEvent::Confirm], DT);
        m.tick(&[InputEvent::Pause], DT);
        m.tick(&[InputEvent::NavigateDown, InputEvent::Confirm], DT);
        assert_eq!(m.current(), StateKind::MainMenu);
        assert!(m.session().is_none());
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut m = machine();
        let running = m.tick(&[InputEvent::NavigateUp, InputEvent::Confirm], DT);
        assert!(!running);
        assert!(!m.tick(&[], DT));
    }

    #[test]
    fn test_paused_frame_shows_frozen_session() {
        let mut m = machine();
        m.tick(&[InputEvent::Confirm], DT);
        m.tick(&[InputEvent::Pause], DT);
        let frame = m.draw();
        let texts: Vec<_> = frame.texts().collect();
        assert!(texts.contains(&"SCORE: 0"));
        assert!(texts.contains(&"PAUSED"));
        assert!(texts.contains(&"> Resume"));
    }

    #[test]
    fn test_resume_from_menu_keeps_session() {
        let mut m = machine();
        m.tick(&[InputEvent::Confirm], DT);
        for _ in 0..10 {
            m.tick(&[InputEvent::RotateRight, InputEvent::Fire], DT);
        }
        let before = m.session().cloned().expect("session");

        m.tick(&[InputEvent::Pause], DT);
        m.tick(&[InputEvent::NavigateDown], DT);
        m.tick(&[InputEvent::NavigateUp], DT);
        m.tick(&[InputEvent::Confirm], DT);

        assert_eq!(m.current(), StateKind::Playing);
        assert_eq!(m.session(), Some(&before));
    }
}
