//! Raw input to `TickInput`
//!
//! Event handlers feed key names and joystick deltas in as they arrive; the
//! game loop takes a snapshot once per frame.

use std::borrow::Cow;
use std::collections::HashSet;

use glam::Vec2;

use crate::sim::{DirectionKeys, Movement, TickInput};
use crate::tuning::InputSource;

const UP_KEYS: &[&str] = &["ArrowUp", "w"];
const DOWN_KEYS: &[&str] = &["ArrowDown", "s"];
const LEFT_KEYS: &[&str] = &["ArrowLeft", "a"];
const RIGHT_KEYS: &[&str] = &["ArrowRight", "d"];
const FIRE_KEYS: &[&str] = &[" ", "Spacebar"];

/// Fold character keys to lowercase.
///
/// Shift changes `event.key()` between press and release ("W" down, "w"
/// up), so both must land on the same held entry.
fn normalize_key(key: &str) -> Cow<'_, str> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_uppercase() => Cow::Owned(c.to_lowercase().collect()),
        _ => Cow::Borrowed(key),
    }
}

/// Keys the game consumes (the browser default action should be suppressed)
pub fn is_game_key(key: &str) -> bool {
    let key = normalize_key(key);
    [UP_KEYS, DOWN_KEYS, LEFT_KEYS, RIGHT_KEYS, FIRE_KEYS]
        .iter()
        .any(|keys| keys.contains(&&*key))
}

/// Accumulates held keys and stick position between frames
#[derive(Debug, Clone, Default)]
pub struct InputCollector {
    source: InputSource,
    held: HashSet<String>,
    stick: Vec2,
    fire_button: bool,
}

impl InputCollector {
    pub fn new(source: InputSource) -> Self {
        Self {
            source,
            ..Default::default()
        }
    }

    /// Which control set this collector steers from (the driver shows the
    /// on-screen pad only for the stick)
    pub fn source(&self) -> InputSource {
        self.source
    }

    /// Record a key press. Returns true if the key belongs to the game.
    pub fn key_down(&mut self, key: &str) -> bool {
        if !is_game_key(key) {
            return false;
        }
        self.held.insert(normalize_key(key).into_owned());
        true
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(&*normalize_key(key));
    }

    /// Stick offset from its centre, in any unit (only direction matters)
    pub fn stick_move(&mut self, dx: f32, dy: f32) {
        self.stick = Vec2::new(dx, dy);
    }

    pub fn stick_release(&mut self) {
        self.stick = Vec2::ZERO;
    }

    /// On-screen fire button
    pub fn set_fire_button(&mut self, pressed: bool) {
        self.fire_button = pressed;
    }

    /// Drop everything held (focus lost, restart)
    pub fn clear(&mut self) {
        self.held.clear();
        self.stick = Vec2::ZERO;
        self.fire_button = false;
    }

    fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.held.contains(*k))
    }

    /// Input for this frame
    pub fn snapshot(&self) -> TickInput {
        let movement = match self.source {
            InputSource::Keyboard => Movement::Keys(DirectionKeys {
                up: self.any_held(UP_KEYS),
                down: self.any_held(DOWN_KEYS),
                left: self.any_held(LEFT_KEYS),
                right: self.any_held(RIGHT_KEYS),
            }),
            InputSource::Joystick => Movement::Analog(self.stick),
        };
        TickInput {
            movement,
            fire: self.fire_button || self.any_held(FIRE_KEYS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{Tuning, Variant};

    #[test]
    fn test_game_keys() {
        assert!(is_game_key("ArrowLeft"));
        assert!(is_game_key("w"));
        assert!(is_game_key("D"));
        assert!(is_game_key(" "));
        assert!(!is_game_key("Enter"));
        assert!(!is_game_key("q"));
    }

    #[test]
    fn test_keyboard_snapshot() {
        let mut input = InputCollector::new(InputSource::Keyboard);
        assert!(input.key_down("ArrowUp"));
        assert!(input.key_down("d"));
        assert!(!input.key_down("Tab"));

        let snap = input.snapshot();
        assert_eq!(
            snap.movement,
            Movement::Keys(DirectionKeys {
                up: true,
                right: true,
                ..Default::default()
            })
        );
        assert!(!snap.fire);

        input.key_up("ArrowUp");
        input.key_down(" ");
        let snap = input.snapshot();
        assert_eq!(
            snap.movement,
            Movement::Keys(DirectionKeys {
                right: true,
                ..Default::default()
            })
        );
        assert!(snap.fire);
    }

    #[test]
    fn test_arrow_and_letter_are_the_same_direction() {
        let mut a = InputCollector::new(InputSource::Keyboard);
        let mut b = InputCollector::new(InputSource::Keyboard);
        a.key_down("ArrowLeft");
        b.key_down("a");
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_shift_released_before_letter() {
        let mut input = InputCollector::new(InputSource::Keyboard);
        assert!(input.key_down("W"));
        input.key_up("w");
        assert_eq!(
            input.snapshot().movement,
            Movement::Keys(DirectionKeys::default())
        );

        // And the other way round
        input.key_down("a");
        input.key_up("A");
        assert_eq!(
            input.snapshot().movement,
            Movement::Keys(DirectionKeys::default())
        );
    }

    #[test]
    fn test_named_keys_keep_case() {
        let mut input = InputCollector::new(InputSource::Keyboard);
        assert!(input.key_down("ArrowRight"));
        assert!(!input.key_down("ARROWRIGHT"));
        input.key_up("arrowright");
        assert!(matches!(
            input.snapshot().movement,
            Movement::Keys(DirectionKeys { right: true, .. })
        ));
    }

    #[test]
    fn test_narrow_page_steers_from_stick() {
        for tuning in [
            Tuning::for_variant(Variant::Responsive, 390.0, 844.0),
            Tuning::for_variant(Variant::for_viewport(390.0), 390.0, 844.0),
        ] {
            let mut input = InputCollector::new(tuning.input_source);
            assert_eq!(input.source(), InputSource::Joystick);
            input.stick_move(20.0, 0.0);
            assert_eq!(
                input.snapshot().movement,
                Movement::Analog(Vec2::new(20.0, 0.0))
            );
        }
    }

    #[test]
    fn test_joystick_snapshot() {
        let mut input = InputCollector::new(InputSource::Joystick);
        input.stick_move(12.0, -5.0);
        // Keys do not steer on the joystick source, but space still fires
        input.key_down("ArrowDown");
        input.key_down(" ");
        let snap = input.snapshot();
        assert_eq!(snap.movement, Movement::Analog(Vec2::new(12.0, -5.0)));
        assert!(snap.fire);

        input.stick_release();
        assert_eq!(input.snapshot().movement, Movement::Analog(Vec2::ZERO));
    }

    #[test]
    fn test_fire_button_and_clear() {
        let mut input = InputCollector::new(InputSource::Joystick);
        input.set_fire_button(true);
        input.stick_move(1.0, 1.0);
        assert!(input.snapshot().fire);

        input.clear();
        let snap = input.snapshot();
        assert!(!snap.fire);
        assert_eq!(snap.movement, Movement::Analog(Vec2::ZERO));
    }
}
