//! Keyboard state
//!
//! Tracks which keys are held between press and release notifications and
//! turns the arrow keys into per-tick movement intent.

use std::collections::HashMap;

use crate::sim::TickInput;

/// Movement directions the sun understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a browser key identifier to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "Up" => Some(Direction::Up),
            "ArrowDown" | "Down" => Some(Direction::Down),
            "ArrowLeft" | "Left" => Some(Direction::Left),
            "ArrowRight" | "Right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held state per key identifier
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashMap<String, bool>,
    any_pressed: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns `true` only for the first press ever observed.
    pub fn press(&mut self, key: &str) -> bool {
        self.held.insert(key.to_owned(), true);
        !std::mem::replace(&mut self.any_pressed, true)
    }

    pub fn release(&mut self, key: &str) {
        self.held.insert(key.to_owned(), false);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    /// Whether any identifier mapping to `dir` is held
    pub fn direction_held(&self, dir: Direction) -> bool {
        self.held
            .iter()
            .any(|(key, &down)| down && Direction::from_key(key) == Some(dir))
    }

    /// Sample movement intent for this tick
    pub fn intent(&self) -> TickInput {
        TickInput {
            up: self.direction_held(Direction::Up),
            down: self.direction_held(Direction::Down),
            left: self.direction_held(Direction::Left),
            right: self.direction_held(Direction::Right),
        }
    }

    /// Forget held keys (focus loss), keeping the first-press memory
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_press_reported_once() {
        let mut keys = KeyState::new();
        assert!(keys.press("ArrowLeft"));
        assert!(!keys.press("ArrowUp"));
        keys.release("ArrowLeft");
        assert!(!keys.press("ArrowLeft"));
    }

    #[test]
    fn test_intent_follows_held_arrows() {
        let mut keys = KeyState::new();
        keys.press("ArrowUp");
        keys.press("ArrowRight");
        keys.press("x");
        assert_eq!(
            keys.intent(),
            TickInput {
                up: true,
                right: true,
                ..Default::default()
            }
        );

        keys.release("ArrowUp");
        assert!(!keys.intent().up);
        assert!(keys.is_held("x"));
    }

    #[test]
    fn test_legacy_key_names() {
        let mut keys = KeyState::new();
        keys.press("Down");
        assert!(keys.intent().down);
        assert_eq!(Direction::from_key("Left"), Some(Direction::Left));
        assert_eq!(Direction::from_key("a"), None);
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyState::new();
        keys.press("ArrowDown");
        keys.release_all();
        assert!(keys.intent().is_idle());
        assert!(!keys.press("ArrowDown"));
    }
}
