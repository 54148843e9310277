//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, virtual joystick, fire button)
//! - Frame timing
//! - Session start and game-over notices

pub mod clock;
pub mod input;
pub mod session;

pub use clock::FrameClock;
pub use input::{InputCollector, is_game_key};
pub use session::Session;
