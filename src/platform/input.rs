//! Input events and key translation
//!
//! The game core only sees [`InputEvent`]s. Hosts translate their raw key
//! presses through [`KeyBindings`]; DOM `KeyboardEvent.key` strings parse
//! with [`Key::from_dom`]. Hosts that only see key-down and key-up
//! notifications feed them to [`KeyState`], which re-emits held controls
//! every frame.

/// Abstract input event delivered to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    RotateLeft,
    RotateRight,
    ThrustForward,
    ThrustReverse,
    Fire,
    Pause,
    Confirm,
    Cancel,
    NavigateUp,
    NavigateDown,
    /// A printable character typed by the player
    Text(char),
    Backspace,
}

impl InputEvent {
    /// Controls that act for as long as their key is held
    pub fn is_held_control(self) -> bool {
        matches!(
            self,
            InputEvent::RotateLeft
                | InputEvent::RotateRight
                | InputEvent::ThrustForward
                | InputEvent::ThrustReverse
                | InputEvent::Fire
        )
    }
}

/// Physical key as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Escape,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Case-folded key, so Shift+W releases the same key as W
    fn folded(self) -> Key {
        match self {
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }

    /// Parse a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Key> {
        match key {
            " " => Some(Key::Space),
            "Enter" => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            "Backspace" => Some(Key::Backspace),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

/// Fixed keyboard layout
///
/// A/D rotate, W/S thrust, Space fires, Escape pauses (and cancels in menus),
/// Enter confirms, arrows navigate. Printable keys additionally produce
/// [`InputEvent::Text`] so the name-entry screen can consume them.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyBindings;

impl KeyBindings {
    pub fn new() -> Self {
        Self
    }

    /// Events produced by a single key press
    pub fn translate(&self, key: Key) -> Vec<InputEvent> {
        match key {
            Key::Space => vec![InputEvent::Fire, InputEvent::Text(' ')],
            Key::Enter => vec![InputEvent::Confirm],
            Key::Escape => vec![InputEvent::Pause, InputEvent::Cancel],
            Key::Backspace => vec![InputEvent::Backspace],
            Key::Up => vec![InputEvent::NavigateUp],
            Key::Down => vec![InputEvent::NavigateDown],
            Key::Left => vec![InputEvent::RotateLeft],
            Key::Right => vec![InputEvent::RotateRight],
            Key::Char(c) => {
                let mut events = Vec::with_capacity(2);
                match c.to_ascii_lowercase() {
                    'a' => events.push(InputEvent::RotateLeft),
                    'd' => events.push(InputEvent::RotateRight),
                    'w' => events.push(InputEvent::ThrustForward),
                    's' => events.push(InputEvent::ThrustReverse),
                    _ => {}
                }
                if !c.is_control() {
                    events.push(InputEvent::Text(c));
                }
                events
            }
        }
    }
}

/// Keyboard state for hosts driven by key-down/key-up notifications
///
/// Every press queues its events once. Held controls (turning, thrust, fire)
/// are repeated in each frame until the key is released, independent of OS
/// auto-repeat.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    bindings: KeyBindings,
    held: Vec<Key>,
    queued: Vec<InputEvent>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        let folded = key.folded();
        if !self.held.contains(&folded) {
            self.held.push(folded);
        }
        self.queued.extend(self.bindings.translate(key));
    }

    pub fn release(&mut self, key: Key) {
        let folded = key.folded();
        self.held.retain(|k| *k != folded);
    }

    /// Forget held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// DOM `keydown`; unknown keys are ignored
    pub fn press_dom(&mut self, key: &str) {
        if let Some(key) = Key::from_dom(key) {
            self.press(key);
        }
    }

    /// DOM `keyup`
    pub fn release_dom(&mut self, key: &str) {
        if let Some(key) = Key::from_dom(key) {
            self.release(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key.folded())
    }

    /// Events for the coming frame: queued presses, then held controls.
    ///
    /// A key pressed and released within one frame still acts once.
    pub fn frame_events(&mut self) -> Vec<InputEvent> {
        let mut events = std::mem::take(&mut self.queued);
        for &key in &self.held {
            events.extend(
                self.bindings
                    .translate(key)
                    .into_iter()
                    .filter(|e| e.is_held_control()),
            );
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys_also_type() {
        let b = KeyBindings::new();
        assert_eq!(
            b.translate(Key::Char('W')),
            vec![InputEvent::ThrustForward, InputEvent::Text('W')]
        );
        assert_eq!(b.translate(Key::Char('x')), vec![InputEvent::Text('x')]);
    }

    #[test]
    fn test_escape_pauses_and_cancels() {
        let b = KeyBindings::new();
        assert_eq!(
            b.translate(Key::Escape),
            vec![InputEvent::Pause, InputEvent::Cancel]
        );
    }

    #[test]
    fn test_dom_keys() {
        let b = KeyBindings::new();
        assert_eq!(
            Key::from_dom("Enter").map(|k| b.translate(k)),
            Some(vec![InputEvent::Confirm])
        );
        assert_eq!(Key::from_dom("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_dom("Shift"), None);
        assert_eq!(Key::from_dom("é"), Some(Key::Char('é')));
    }

    #[test]
    fn test_held_key_repeats_every_frame() {
        let mut keys = KeyState::new();
        keys.press_dom("d");
        assert_eq!(
            keys.frame_events(),
            vec![
                InputEvent::RotateRight,
                InputEvent::Text('d'),
                InputEvent::RotateRight
            ]
        );
        for _ in 0..5 {
            assert_eq!(keys.frame_events(), vec![InputEvent::RotateRight]);
        }
        keys.release_dom("d");
        assert!(keys.frame_events().is_empty());
    }

    #[test]
    fn test_tap_inside_one_frame_acts_once() {
        let mut keys = KeyState::new();
        keys.press(Key::Space);
        keys.release(Key::Space);
        let events = keys.frame_events();
        assert!(events.contains(&InputEvent::Fire));
        assert!(events.contains(&InputEvent::Text(' ')));
        assert!(keys.frame_events().is_empty());
    }

    #[test]
    fn test_one_shot_events_are_not_repeated() {
        let mut keys = KeyState::new();
        keys.press(Key::Enter);
        keys.press(Key::Escape);
        assert_eq!(
            keys.frame_events(),
            vec![InputEvent::Confirm, InputEvent::Pause, InputEvent::Cancel]
        );
        // Enter and Escape are still down but only controls repeat
        assert!(keys.is_held(Key::Enter));
        assert!(keys.frame_events().is_empty());
    }

    #[test]
    fn test_shifted_release_matches_press() {
        let mut keys = KeyState::new();
        keys.press(Key::Char('w'));
        keys.release(Key::Char('W'));
        assert!(!keys.is_held(Key::Char('w')));

        keys.press(Key::Left);
        keys.press(Key::Char('s'));
        keys.release_all();
        // Presses already queued still go out once
        assert!(keys.frame_events().contains(&InputEvent::ThrustReverse));
        assert!(keys.frame_events().is_empty());
    }
}
