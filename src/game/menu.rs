//! Vertical menus, plus the two screens that are nothing but a menu

use glam::Vec2;

use super::{StateKind, Transition};
use crate::consts::*;
use crate::pending::{Pending, Poll};
use crate::platform::input::InputEvent;
use crate::render::{DrawList, FontSize, colors, draw_menu};
use crate::service::ScoreService;
use crate::sim::PlayingSession;

/// A list of options with a wrapping cursor
#[derive(Debug, Clone)]
pub struct Menu {
    options: &'static [&'static str],
    selected: usize,
}

impl Menu {
    pub fn new(options: &'static [&'static str]) -> Self {
        Self {
            options,
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_option(&self) -> &'static str {
        self.options[self.selected]
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Move the cursor; returns the chosen option on confirm
    pub fn handle(&mut self, event: InputEvent) -> Option<&'static str> {
        let n = self.options.len();
        match event {
            InputEvent::NavigateUp => self.selected = (self.selected + n - 1) % n,
            InputEvent::NavigateDown => self.selected = (self.selected + 1) % n,
            InputEvent::Confirm => return Some(self.selected_option()),
            _ => {}
        }
        None
    }

    pub fn draw(&self, list: &mut DrawList, start_y: f32, spacing: f32) {
        draw_menu(list, self.options, self.selected, start_y, spacing);
    }
}

pub const MAIN_MENU_OPTIONS: &[&str] = &["New Game", "High Scores", "Quit"];
pub const PAUSED_OPTIONS: &[&str] = &["Resume", "Main Menu"];

/// Title screen
#[derive(Debug)]
pub struct MainMenuScreen {
    menu: Menu,
    high_score: u64,
    request: Option<Pending<u64>>,
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(MAIN_MENU_OPTIONS),
            high_score: 0,
            request: None,
        }
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn enter(&mut self, service: &mut dyn ScoreService) {
        self.menu.reset();
        if self.request.as_mut().is_some_and(|p| p.is_waiting()) {
            log::debug!("Reusing in-flight high score request");
        } else {
            self.request = Some(service.highest_score());
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Option<Transition> {
        match self.menu.handle(event)? {
            "New Game" => Some(Transition::Goto(StateKind::Playing)),
            "High Scores" => Some(Transition::Goto(StateKind::HighScores)),
            "Quit" => Some(Transition::Quit),
            _ => None,
        }
    }

    pub fn update(&mut self) {
        let Some(request) = &mut self.request else {
            return;
        };
        match request.poll() {
            Poll::Waiting => {}
            Poll::Ready(score) => {
                self.high_score = score;
                self.request = None;
            }
            Poll::Lost => self.request = None,
        }
    }

    pub fn draw(&self, list: &mut DrawList) {
        let cx = SCREEN_WIDTH / 2.0;
        list.text(Vec2::new(cx, 150.0), "ASTEROIDS", FontSize::Large, colors::WHITE);
        self.menu.draw(list, SCREEN_HEIGHT / 2.0 - 50.0, 60.0);
        if self.high_score > 0 {
            list.text(
                Vec2::new(cx, SCREEN_HEIGHT - 100.0),
                format!("HIGH SCORE: {}", self.high_score),
                FontSize::Medium,
                colors::ACCENT,
            );
        }
    }
}

/// Pause overlay; the session itself is owned by the state machine
#[derive(Debug)]
pub struct PausedScreen {
    menu: Menu,
}

impl Default for PausedScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl PausedScreen {
    pub fn new() -> Self {
        Self {
            menu: Menu::new(PAUSED_OPTIONS),
        }
    }

    pub fn enter(&mut self) {
        self.menu.reset();
    }

    pub fn handle(&mut self, event: InputEvent) -> Option<Transition> {
        if matches!(event, InputEvent::Pause | InputEvent::Cancel) {
            return Some(Transition::Goto(StateKind::Playing));
        }
        match self.menu.handle(event)? {
            "Resume" => Some(Transition::Goto(StateKind::Playing)),
            "Main Menu" => Some(Transition::Goto(StateKind::MainMenu)),
            _ => None,
        }
    }

    /// Frozen frame, dimmed, with the menu on top
    pub fn draw(&self, session: Option<&PlayingSession>, list: &mut DrawList) {
        if let Some(session) = session {
            session.draw(list);
        }
        list.rect(
            Vec2::ZERO,
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            colors::OVERLAY,
        );
        list.text(
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 - 80.0),
            "PAUSED",
            FontSize::Large,
            colors::WHITE,
        );
        self.menu.draw(list, SCREEN_HEIGHT / 2.0, 50.0);
    }
}
