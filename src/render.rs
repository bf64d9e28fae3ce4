//! Read-only draw list
//!
//! The core never talks to a graphics API. Each tick it builds a list of
//! primitive shapes and text which the rendering collaborator presents.
//! Building the list never mutates game state.

use glam::Vec2;
use serde::Serialize;

/// RGBA colour, components in 0..=1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const SHOT: Color = [0.3, 0.5, 1.0, 1.0];
    pub const TITLE_RED: Color = [1.0, 0.2, 0.2, 1.0];
    pub const HIGHLIGHT: Color = [1.0, 0.9, 0.2, 1.0];
    pub const ACCENT: Color = [0.2, 0.9, 0.9, 1.0];
    pub const MUTED: Color = [0.55, 0.55, 0.55, 1.0];
    pub const LIVES: Color = [0.9, 0.15, 0.2, 1.0];
    /// Dimming overlay drawn over a frozen frame
    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.7];
}

/// Text size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontSize {
    Large,
    Medium,
    Small,
}

/// Which point of the text box `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Anchor {
    Center,
    TopLeft,
    TopRight,
}

/// A primitive to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    /// Outlined circle
    Circle { center: Vec2, radius: f32 },
    /// Outlined triangle
    Triangle { vertices: [Vec2; 3] },
    /// Filled rectangle (used for dimming overlays)
    Rect { min: Vec2, max: Vec2 },
    Text {
        pos: Vec2,
        text: String,
        size: FontSize,
        anchor: Anchor,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub shape: Shape,
    pub color: Color,
}

/// Ordered draw commands for one frame (first command is drawn first)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(Shape::Circle { center, radius }, color);
    }

    pub fn triangle(&mut self, vertices: [Vec2; 3], color: Color) {
        self.push(Shape::Triangle { vertices }, color);
    }

    pub fn rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        self.push(Shape::Rect { min, max }, color);
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, size: FontSize, color: Color) {
        self.text_anchored(pos, text, size, Anchor::Center, color);
    }

    pub fn text_anchored(
        &mut self,
        pos: Vec2,
        text: impl Into<String>,
        size: FontSize,
        anchor: Anchor,
        color: Color,
    ) {
        self.push(
            Shape::Text {
                pos,
                text: text.into(),
                size,
                anchor,
            },
            color,
        );
    }

    fn push(&mut self, shape: Shape, color: Color) {
        self.commands.push(DrawCommand { shape, color });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text strings in draw order (handy for assertions and debugging)
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match &c.shape {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Margin between HUD text and the screen edge
pub const HUD_MARGIN: f32 = 20.0;

const HEART: char = '\u{2665}';

/// Score in the top-left corner, one heart per life in the top-right
pub fn draw_hud(list: &mut DrawList, score: u64, lives: u32) {
    use crate::consts::SCREEN_WIDTH;

    list.text_anchored(
        Vec2::splat(HUD_MARGIN),
        format!("SCORE: {score}"),
        FontSize::Medium,
        Anchor::TopLeft,
        colors::WHITE,
    );
    let hearts: String = std::iter::repeat_n(HEART, lives as usize).collect();
    list.text_anchored(
        Vec2::new(SCREEN_WIDTH - HUD_MARGIN, HUD_MARGIN),
        hearts,
        FontSize::Small,
        Anchor::TopRight,
        colors::LIVES,
    );
}

/// Vertical menu; the selected entry is highlighted and prefixed with `>`
pub fn draw_menu(
    list: &mut DrawList,
    options: &[&str],
    selected: usize,
    start_y: f32,
    spacing: f32,
) {
    let x = crate::consts::SCREEN_WIDTH / 2.0;
    for (i, option) in options.iter().enumerate() {
        let (prefix, color) = if i == selected {
            ("> ", colors::HIGHLIGHT)
        } else {
            ("  ", colors::WHITE)
        };
        list.text(
            Vec2::new(x, start_y + i as f32 * spacing),
            format!("{prefix}{option}"),
            FontSize::Medium,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_shows_score_and_hearts() {
        let mut list = DrawList::new();
        draw_hud(&mut list, 1050, 3);
        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts, vec!["SCORE: 1050", "\u{2665}\u{2665}\u{2665}"]);
    }

    #[test]
    fn test_menu_highlights_selection() {
        let mut list = DrawList::new();
        draw_menu(&mut list, &["Resume", "Main Menu"], 1, 360.0, 50.0);
        assert_eq!(list.len(), 2);
        assert_eq!(list.commands()[1].color, colors::HIGHLIGHT);
        assert_eq!(list.texts().nth(1), Some("> Main Menu"));
    }

    #[test]
    fn test_serializes_to_json() {
        let mut list = DrawList::new();
        list.circle(Vec2::new(1.0, 2.0), 3.0, colors::WHITE);
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.contains("Circle"));
    }
}
