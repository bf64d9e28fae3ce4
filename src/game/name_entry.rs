//! Player name capture for the leaderboard

use crate::consts::MAX_NAME_LENGTH;
use crate::platform::input::InputEvent;

/// Text field accepting printable characters up to [`MAX_NAME_LENGTH`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    name: String,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clear(&mut self) {
        self.name.clear();
    }

    /// A name can be submitted once it has at least one character
    pub fn can_submit(&self) -> bool {
        !self.name.is_empty()
    }

    /// Apply a text or backspace event; everything else is ignored
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Backspace => {
                self.name.pop();
            }
            InputEvent::Text(c) => self.push(c),
            _ => {}
        }
    }

    fn push(&mut self, c: char) {
        if self.name.chars().count() >= MAX_NAME_LENGTH || c.is_control() {
            return;
        }
        // No leading space
        if c == ' ' && self.name.is_empty() {
            return;
        }
        self.name.push(c);
    }
}
