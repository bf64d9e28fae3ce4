//! Game-over screen: qualification check, name entry, submission, menu

use glam::Vec2;

use super::menu::Menu;
use super::name_entry::NameEntry;
use super::{StateKind, Transition};
use crate::consts::*;
use crate::pending::{Pending, Poll};
use crate::platform::input::InputEvent;
use crate::render::{DrawList, FontSize, colors};
use crate::service::ScoreService;

pub const GAME_OVER_OPTIONS: &[&str] = &["Play Again", "Main Menu"];

/// Where the screen is in its flow
#[derive(Debug)]
pub enum GameOverPhase {
    /// Waiting for the qualification check
    Loading(Pending<bool>),
    NameEntry,
    Submitting(Pending<Option<u64>>),
    Menu,
}

#[derive(Debug)]
pub struct GameOverScreen {
    final_score: u64,
    phase: GameOverPhase,
    name: NameEntry,
    menu: Menu,
    /// Id of the record written this visit, if any
    submitted: Option<u64>,
}

impl Default for GameOverScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl GameOverScreen {
    pub fn new() -> Self {
        Self {
            final_score: 0,
            phase: GameOverPhase::Menu,
            name: NameEntry::new(),
            menu: Menu::new(GAME_OVER_OPTIONS),
            submitted: None,
        }
    }

    pub fn final_score(&self) -> u64 {
        self.final_score
    }

    pub fn phase(&self) -> &GameOverPhase {
        &self.phase
    }

    pub fn name(&self) -> &str {
        self.name.name()
    }

    pub fn submitted(&self) -> Option<u64> {
        self.submitted
    }

    pub fn enter(&mut self, final_score: u64, service: &mut dyn ScoreService) {
        self.final_score = final_score;
        self.name.clear();
        self.menu.reset();
        self.submitted = None;
        self.phase = GameOverPhase::Loading(service.is_high_score(final_score));
    }

    pub fn handle(
        &mut self,
        event: InputEvent,
        service: &mut dyn ScoreService,
    ) -> Option<Transition> {
        match self.phase {
            GameOverPhase::Loading(_) | GameOverPhase::Submitting(_) => None,
            GameOverPhase::NameEntry => {
                if event == InputEvent::Confirm {
                    if self.name.can_submit() {
                        log::info!(
                            "Submitting score {} for {}",
                            self.final_score,
                            self.name.name()
                        );
                        self.phase = GameOverPhase::Submitting(
                            service.submit_score(self.name.name(), self.final_score),
                        );
                    }
                } else {
                    self.name.apply(event);
                }
                None
            }
            GameOverPhase::Menu => match self.menu.handle(event)? {
                "Play Again" => Some(Transition::Goto(StateKind::Playing)),
                "Main Menu" => Some(Transition::Goto(StateKind::MainMenu)),
                _ => None,
            },
        }
    }

    /// Poll whichever request is outstanding
    pub fn update(&mut self) {
        match &mut self.phase {
            GameOverPhase::Loading(request) => match request.poll() {
                Poll::Waiting => {}
                Poll::Ready(true) => self.phase = GameOverPhase::NameEntry,
                Poll::Ready(false) => self.phase = GameOverPhase::Menu,
                Poll::Lost => {
                    log::warn!("High score check lost, skipping name entry");
                    self.phase = GameOverPhase::Menu;
                }
            },
            GameOverPhase::Submitting(request) => match request.poll() {
                Poll::Waiting => {}
                Poll::Ready(id) => {
                    if id.is_none() {
                        log::warn!("Score {} was not stored", self.final_score);
                    }
                    self.submitted = id;
                    self.phase = GameOverPhase::Menu;
                }
                Poll::Lost => {
                    log::warn!("Score submission lost");
                    self.phase = GameOverPhase::Menu;
                }
            },
            GameOverPhase::NameEntry | GameOverPhase::Menu => {}
        }
    }

    pub fn draw(&self, list: &mut DrawList) {
        let cx = SCREEN_WIDTH / 2.0;
        list.text(Vec2::new(cx, 120.0), "GAME OVER", FontSize::Large, colors::TITLE_RED);
        list.text(
            Vec2::new(cx, 200.0),
            format!("Final Score: {}", self.final_score),
            FontSize::Medium,
            colors::WHITE,
        );

        match &self.phase {
            GameOverPhase::Loading(_) => {
                list.text(
                    Vec2::new(cx, SCREEN_HEIGHT / 2.0),
                    "Loading...",
                    FontSize::Small,
                    colors::MUTED,
                );
            }
            GameOverPhase::NameEntry | GameOverPhase::Submitting(_) => {
                list.text(
                    Vec2::new(cx, 280.0),
                    "NEW HIGH SCORE!",
                    FontSize::Medium,
                    colors::HIGHLIGHT,
                );
                list.text(Vec2::new(cx, 340.0), "Enter your name:", FontSize::Small, colors::WHITE);
                list.text(
                    Vec2::new(cx, 400.0),
                    format!("{}_", self.name.name()),
                    FontSize::Medium,
                    colors::ACCENT,
                );
                let (hint, color) = if matches!(self.phase, GameOverPhase::Submitting(_)) {
                    ("Saving...", colors::HIGHLIGHT)
                } else {
                    ("Press ENTER to confirm", colors::MUTED)
                };
                list.text(Vec2::new(cx, 460.0), hint, FontSize::Small, color);
            }
            GameOverPhase::Menu => self.menu.draw(list, SCREEN_HEIGHT / 2.0 + 50.0, 60.0),
        }
    }
}
