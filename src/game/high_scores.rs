//! Leaderboard screen

use glam::Vec2;

use super::{StateKind, Transition};
use crate::consts::*;
use crate::highscores::HighScore;
use crate::pending::{Pending, Poll};
use crate::platform::input::InputEvent;
use crate::render::{Anchor, DrawList, FontSize, colors};
use crate::service::ScoreService;

const ROW_START_Y: f32 = 160.0;
const ROW_SPACING: f32 = 45.0;

#[derive(Debug, Default)]
pub struct HighScoresScreen {
    request: Option<Pending<Vec<HighScore>>>,
    /// `None` while loading
    scores: Option<Vec<HighScore>>,
}

impl HighScoresScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scores(&self) -> Option<&[HighScore]> {
        self.scores.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.scores.is_none()
    }

    /// Fetch the board, adopting a request left over from an earlier visit
    pub fn enter(&mut self, service: &mut dyn ScoreService, limit: usize) {
        self.scores = None;
        if self.request.as_mut().is_some_and(|p| p.is_waiting()) {
            log::debug!("Reusing in-flight leaderboard request");
        } else {
            self.request = Some(service.top_scores(limit));
        }
    }

    pub fn handle(&mut self, event: InputEvent) -> Option<Transition> {
        match event {
            InputEvent::Confirm | InputEvent::Cancel | InputEvent::Pause => {
                Some(Transition::Goto(StateKind::MainMenu))
            }
            _ => None,
        }
    }

    pub fn update(&mut self) {
        let Some(request) = &mut self.request else {
            return;
        };
        match request.poll() {
            Poll::Waiting => {}
            Poll::Ready(scores) => {
                log::debug!("Leaderboard loaded ({} entries)", scores.len());
                self.scores = Some(scores);
                self.request = None;
            }
            Poll::Lost => {
                log::warn!("Leaderboard request lost");
                self.scores = Some(Vec::new());
                self.request = None;
            }
        }
    }

    pub fn draw(&self, list: &mut DrawList) {
        let cx = SCREEN_WIDTH / 2.0;
        list.text(Vec2::new(cx, 80.0), "HIGH SCORES", FontSize::Large, colors::HIGHLIGHT);

        let center = Vec2::new(cx, SCREEN_HEIGHT / 2.0);
        match &self.scores {
            None => list.text(center, "Loading...", FontSize::Small, colors::MUTED),
            Some(scores) if scores.is_empty() => {
                list.text(center, "No scores yet!", FontSize::Small, colors::MUTED)
            }
            Some(scores) => {
                for (i, score) in scores.iter().enumerate() {
                    let y = ROW_START_Y + i as f32 * ROW_SPACING;
                    list.text_anchored(
                        Vec2::new(cx - 200.0, y),
                        format!("{}.", i + 1),
                        FontSize::Small,
                        Anchor::TopLeft,
                        colors::ACCENT,
                    );
                    list.text_anchored(
                        Vec2::new(cx - 150.0, y),
                        score.display_name(),
                        FontSize::Small,
                        Anchor::TopLeft,
                        colors::WHITE,
                    );
                    list.text_anchored(
                        Vec2::new(cx + 200.0, y),
                        score.score.to_string(),
                        FontSize::Small,
                        Anchor::TopRight,
                        colors::WHITE,
                    );
                }
            }
        }

        list.text(
            Vec2::new(cx, SCREEN_HEIGHT - 60.0),
            "Press ENTER or ESC to return",
            FontSize::Small,
            colors::MUTED,
        );
    }
}
