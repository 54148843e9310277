//! Game balance and layout per variant
//!
//! Desktop, mobile and responsive builds share one simulation; everything
//! that differs between them (canvas size, scale factor, entity sizes, spawn
//! cadence, input source) lives here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Layout/control variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Full viewport, keyboard, full-size sprites
    #[default]
    Desktop,
    /// Full viewport, virtual joystick, half-size sprites, faster spawns
    Mobile,
    /// Fixed 400x300 half-scale canvas with the stick on narrow viewports,
    /// keyboard at full size otherwise
    Responsive,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Desktop => "Desktop",
            Variant::Mobile => "Mobile",
            Variant::Responsive => "Responsive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(Variant::Desktop),
            "mobile" | "touch" => Some(Variant::Mobile),
            "responsive" | "auto" => Some(Variant::Responsive),
            _ => None,
        }
    }

    /// Layout for a page that does not name one: touch below the `md` width
    pub fn for_viewport(viewport_width: f32) -> Self {
        if viewport_width < TOUCH_BREAKPOINT {
            Variant::Mobile
        } else {
            Variant::Desktop
        }
    }

    /// Input source for this variant at the given viewport width
    pub fn input_source(&self, viewport_width: f32) -> InputSource {
        match self {
            Variant::Mobile => InputSource::Joystick,
            Variant::Responsive if viewport_width < COMPACT_BREAKPOINT => InputSource::Joystick,
            Variant::Desktop | Variant::Responsive => InputSource::Keyboard,
        }
    }
}

/// Where directional intent comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    /// Arrow keys / WASD, per-axis movement
    #[default]
    Keyboard,
    /// Analog stick, normalized direction
    Joystick,
}

/// Rejected tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tuning override must be a JSON object")]
    NotAnObject,
    #[error("canvas must have positive size, got {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },
    #[error("scale factor must be positive, got {0}")]
    InvalidScale(f32),
    #[error("{entity} size {size} does not fit the {width}x{height} canvas")]
    EntityTooLarge {
        entity: &'static str,
        size: f32,
        width: f32,
        height: f32,
    },
    #[error("{name} must be a non-negative duration, got {value}")]
    InvalidInterval { name: &'static str, value: f64 },
    #[error("enemy speed range [{min}, {max}) is empty or non-positive")]
    InvalidEnemySpeed { min: f32, max: f32 },
    #[error("move speed must be positive, got {0}")]
    InvalidMoveSpeed(f32),
}

/// Balance and layout for one game session.
///
/// Sizes are stored unscaled; use the `*_extent` accessors for on-canvas
/// pixel sizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub variant: Variant,
    pub input_source: InputSource,

    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Device scale factor applied to every sprite size
    pub scale: f32,

    // === Sprite sizes (unscaled) ===
    pub player_size: f32,
    pub enemy_size: f32,
    pub marker_size: f32,
    pub shot_size: f32,

    // === Motion ===
    /// Player pixels per tick
    pub move_speed: f32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,

    // === Cadence (ms) ===
    pub enemy_spawn_interval_ms: f64,
    pub healer_spawn_interval_ms: f64,
    pub booster_spawn_interval_ms: f64,
    pub fire_interval_ms: f64,

    /// Remove enemies once they fall past the bottom edge.
    /// `false` keeps them forever, matching the first release.
    pub despawn_offscreen_enemies: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::for_variant(Variant::Desktop, 1280.0, 720.0)
    }
}

impl Tuning {
    /// Preset for a variant, sized to the given viewport
    pub fn for_variant(variant: Variant, viewport_width: f32, viewport_height: f32) -> Self {
        let base = Self {
            variant,
            input_source: variant.input_source(viewport_width),
            canvas_width: viewport_width,
            canvas_height: viewport_height,
            scale: 1.0,
            player_size: PLAYER_SIZE,
            enemy_size: 100.0,
            marker_size: 60.0,
            shot_size: SHOT_SIZE,
            move_speed: PLAYER_MOVE_SPEED,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_spawn_interval_ms: 1000.0,
            healer_spawn_interval_ms: HEALER_SPAWN_INTERVAL_MS,
            booster_spawn_interval_ms: BOOSTER_SPAWN_INTERVAL_MS,
            fire_interval_ms: FIRE_INTERVAL_MS,
            despawn_offscreen_enemies: true,
        };

        // Desktop and mobile share the dense wave; mobile halves the sprites
        let dense = Self {
            enemy_size: 120.0,
            marker_size: 80.0,
            enemy_spawn_interval_ms: 500.0,
            ..base
        };

        match variant {
            Variant::Desktop => dense,
            Variant::Mobile => Self { scale: 0.5, ..dense },
            Variant::Responsive if viewport_width < COMPACT_BREAKPOINT => Self {
                canvas_width: COMPACT_CANVAS_WIDTH,
                canvas_height: COMPACT_CANVAS_HEIGHT,
                scale: 0.5,
                ..base
            },
            Variant::Responsive => base,
        }
    }

    /// Apply a JSON object of field overrides on top of this tuning.
    ///
    /// Unknown keys are ignored; the result is validated.
    pub fn with_overrides(&self, json: &str) -> Result<Self, TuningError> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(TuningError::NotAnObject);
        };

        let mut merged = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            for (key, value) in overrides {
                if fields.contains_key(&key) {
                    fields.insert(key, value);
                } else {
                    log::warn!("Ignoring unknown tuning key '{}'", key);
                }
            }
        }

        let tuning: Self = serde_json::from_value(merged)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse a complete tuning; missing fields take desktop defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that the tuning describes a playable field
    pub fn validate(&self) -> Result<(), TuningError> {
        let (w, h) = (self.canvas_width, self.canvas_height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(TuningError::InvalidCanvas {
                width: w,
                height: h,
            });
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TuningError::InvalidScale(self.scale));
        }
        if !(self.move_speed.is_finite() && self.move_speed > 0.0) {
            return Err(TuningError::InvalidMoveSpeed(self.move_speed));
        }

        // Player and markers must fit fully on-screen; enemies only need to fit across
        let fits = [
            ("player", self.player_extent(), true),
            ("marker", self.marker_extent(), true),
            ("enemy", self.enemy_extent(), false),
            ("shot", self.shot_extent(), false),
        ];
        for (entity, size, needs_height) in fits {
            if size <= 0.0 || size > w || (needs_height && size > h) {
                return Err(TuningError::EntityTooLarge {
                    entity,
                    size,
                    width: w,
                    height: h,
                });
            }
        }

        let intervals = [
            ("enemy_spawn_interval_ms", self.enemy_spawn_interval_ms),
            ("healer_spawn_interval_ms", self.healer_spawn_interval_ms),
            ("booster_spawn_interval_ms", self.booster_spawn_interval_ms),
            ("fire_interval_ms", self.fire_interval_ms),
        ];
        for (name, value) in intervals {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::InvalidInterval { name, value });
            }
        }

        let (min, max) = (self.enemy_min_speed, self.enemy_max_speed);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min < max) {
            return Err(TuningError::InvalidEnemySpeed { min, max });
        }

        Ok(())
    }

    /// On-canvas player edge length
    pub fn player_extent(&self) -> f32 {
        self.player_size * self.scale
    }

    /// On-canvas enemy edge length
    pub fn enemy_extent(&self) -> f32 {
        self.enemy_size * self.scale
    }

    /// On-canvas marker edge length
    pub fn marker_extent(&self) -> f32 {
        self.marker_size * self.scale
    }

    /// On-canvas projectile edge length
    pub fn shot_extent(&self) -> f32 {
        self.shot_size * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_preset() {
        let t = Tuning::for_variant(Variant::Desktop, 1920.0, 1080.0);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.enemy_extent(), 120.0);
        assert_eq!(t.marker_extent(), 80.0);
        assert_eq!(t.player_extent(), 100.0);
        assert_eq!(t.enemy_spawn_interval_ms, 500.0);
        assert_eq!(t.input_source, InputSource::Keyboard);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_mobile_preset() {
        let t = Tuning::for_variant(Variant::Mobile, 390.0, 844.0);
        assert_eq!(t.scale, 0.5);
        assert_eq!(t.enemy_extent(), 60.0);
        assert_eq!(t.marker_extent(), 40.0);
        assert_eq!(t.player_extent(), 50.0);
        assert_eq!(t.enemy_spawn_interval_ms, 500.0);
        assert_eq!(t.input_source, InputSource::Joystick);
        assert_eq!(t.healer_spawn_interval_ms, 10_000.0);
        assert_eq!(t.booster_spawn_interval_ms, 15_000.0);
    }

    #[test]
    fn test_responsive_breakpoint() {
        let narrow = Tuning::for_variant(Variant::Responsive, 500.0, 900.0);
        assert_eq!((narrow.canvas_width, narrow.canvas_height), (400.0, 300.0));
        assert_eq!(narrow.scale, 0.5);
        assert_eq!(narrow.enemy_extent(), 50.0);
        assert_eq!(narrow.enemy_spawn_interval_ms, 1000.0);
        assert_eq!(narrow.input_source, InputSource::Joystick);

        let wide = Tuning::for_variant(Variant::Responsive, 1024.0, 768.0);
        assert_eq!((wide.canvas_width, wide.canvas_height), (1024.0, 768.0));
        assert_eq!(wide.scale, 1.0);
        assert_eq!(wide.enemy_extent(), 100.0);
        assert_eq!(wide.marker_extent(), 60.0);
        assert_eq!(wide.input_source, InputSource::Keyboard);
    }

    #[test]
    fn test_variant_for_viewport() {
        assert_eq!(Variant::for_viewport(390.0), Variant::Mobile);
        assert_eq!(Variant::for_viewport(767.0), Variant::Mobile);
        assert_eq!(Variant::for_viewport(768.0), Variant::Desktop);
        assert_eq!(Variant::for_viewport(1920.0), Variant::Desktop);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("MOBILE"), Some(Variant::Mobile));
        assert_eq!(Variant::from_str("auto"), Some(Variant::Responsive));
        assert_eq!(Variant::from_str("console"), None);
    }

    #[test]
    fn test_overrides_merge_onto_preset() {
        let base = Tuning::for_variant(Variant::Mobile, 800.0, 600.0);
        let t = base
            .with_overrides(r#"{"enemy_spawn_interval_ms": 250, "despawn_offscreen_enemies": false}"#)
            .unwrap();
        assert_eq!(t.enemy_spawn_interval_ms, 250.0);
        assert!(!t.despawn_offscreen_enemies);
        // Untouched fields keep the preset
        assert_eq!(t.scale, 0.5);
        assert_eq!(t.variant, Variant::Mobile);
    }

    #[test]
    fn test_overrides_reject_non_object() {
        let err = Tuning::default().with_overrides("[1, 2]").unwrap_err();
        assert!(matches!(err, TuningError::NotAnObject));
    }

    #[test]
    fn test_overrides_reject_bad_json() {
        let err = Tuning::default().with_overrides("{oops").unwrap_err();
        assert!(matches!(err, TuningError::Json(_)));
    }

    #[test]
    fn test_from_json_partial() {
        let t = Tuning::from_json(r#"{"variant": "responsive", "canvas_width": 640}"#).unwrap();
        assert_eq!(t.variant, Variant::Responsive);
        assert_eq!(t.canvas_width, 640.0);
        assert_eq!(t.canvas_height, 720.0);
    }

    #[test]
    fn test_validate_rejects_tiny_canvas() {
        let t = Tuning::for_variant(Variant::Desktop, 80.0, 600.0);
        assert!(matches!(
            t.validate(),
            Err(TuningError::EntityTooLarge { entity: "player", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut t = Tuning::default();
        t.scale = 0.0;
        assert!(matches!(t.validate(), Err(TuningError::InvalidScale(_))));

        let mut t = Tuning::default();
        t.enemy_min_speed = 5.0;
        t.enemy_max_speed = 5.0;
        assert!(matches!(
            t.validate(),
            Err(TuningError::InvalidEnemySpeed { .. })
        ));

        let mut t = Tuning::default();
        t.fire_interval_ms = -1.0;
        assert!(matches!(
            t.validate(),
            Err(TuningError::InvalidInterval {
                name: "fire_interval_ms",
                ..
            })
        ));

        let mut t = Tuning::default();
        t.canvas_height = f32::NAN;
        assert!(matches!(t.validate(), Err(TuningError::InvalidCanvas { .. })));
    }
}
