//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! using the RON watcher utilities (see `ron::setup_ron_watcher`).
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Cap FPS to the display refresh rate.
    #[serde(default = "GraphicsSettings::default_fov")]
    pub fov_degrees: f32, // Vertical field of view of the gallery camera.
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
    fn default_fov() -> f32 { 75.0 }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            vsync: Self::default_vsync(),
            fov_degrees: Self::default_fov(),
        }
    }
}

/// Audio volumes. The music track volume is `master_volume * music_volume`
/// unless the gallery layout pins its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    #[serde(default = "AudioSettings::default_master")]
    pub master_volume: f32,
    #[serde(default = "AudioSettings::default_music")]
    pub music_volume: f32,
}

impl AudioSettings {
    fn default_master() -> f32 { 1.0 }
    fn default_music() -> f32 { 0.5 }

    /// Effective playback volume for background music.
    #[must_use]
    pub fn music_level(&self) -> f32 {
        (self.master_volume * self.music_volume).clamp(0.0, 1.0)
    }
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: Self::default_master(),
            music_volume: Self::default_music(),
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub invert_y: bool,
    #[serde(default)]
    pub invert_x: bool,
    #[serde(default = "ControlsSettings::default_sensitivity")]
    pub mouse_sensitivity: f32, // Multiplier on the base look rate of 0.001 rad per pixel.
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Action name -> key identifier.
}

impl ControlsSettings {
    fn default_sensitivity() -> f32 { 1.0 }

    fn default_keybinds() -> HashMap<String, String> {
        [
            ("forward", "W"),
            ("back", "S"),
            ("left", "A"),
            ("right", "D"),
            ("jump", "Space"),
            ("run", "LShift"),
            ("next_track", "N"),
            ("previous_track", "P"),
            ("pause", "Escape"),
            ("toggle_debug", "F1"),
            ("toggle_bounds", "F2"),
        ]
        .into_iter()
        .map(|(action, key)| (action.to_string(), key.to_string()))
        .collect()
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            invert_y: false,
            invert_x: false,
            mouse_sensitivity: Self::default_sensitivity(),
            keybinds: Self::default_keybinds(),
        }
    }
}

pub const MIN_TICK_HZ: f64 = 10.0;
pub const MAX_TICK_HZ: f64 = 240.0;

/// Per-tick movement constants. All distances are world units per fixed tick,
/// so they only mean "per display frame" at the default 60 Hz tick rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSettings {
    #[serde(default = "MovementSettings::default_base_speed")]
    pub base_speed: f32,
    #[serde(default = "MovementSettings::default_run_speed")]
    pub run_speed: f32,
    #[serde(default = "MovementSettings::default_jump_strength")]
    pub jump_strength: f32,
    #[serde(default = "MovementSettings::default_gravity")]
    pub gravity: f32, // Added to vertical velocity every tick while airborne.
    #[serde(default = "MovementSettings::default_ground_level")]
    pub ground_level: f32, // Eye height when standing on the floor.
    #[serde(default = "MovementSettings::default_tick_rate")]
    pub tick_rate_hz: f64,
}

impl MovementSettings {
    fn default_base_speed() -> f32 { 0.1 }
    fn default_run_speed() -> f32 { 0.2 }
    fn default_jump_strength() -> f32 { 0.2 }
    fn default_gravity() -> f32 { -0.01 }
    fn default_ground_level() -> f32 { 2.0 }
    fn default_tick_rate() -> f64 { 60.0 }

    /// Tick rate safe to hand to `Time<Fixed>`. Zero, negative and non-finite
    /// values fall back to the default; the rest are clamped to the
    /// supported range.
    #[must_use]
    pub fn effective_tick_rate(&self) -> f64 {
        if self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0 {
            self.tick_rate_hz.clamp(MIN_TICK_HZ, MAX_TICK_HZ)
        } else {
            Self::default_tick_rate()
        }
    }
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            base_speed: Self::default_base_speed(),
            run_speed: Self::default_run_speed(),
            jump_strength: Self::default_jump_strength(),
            gravity: Self::default_gravity(),
            ground_level: Self::default_ground_level(),
            tick_rate_hz: Self::default_tick_rate(),
        }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub audio: AudioSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub movement: MovementSettings,
}

/// Key names accepted in `controls.keybinds`, matched case-insensitively.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("A", KeyCode::KeyA), ("B", KeyCode::KeyB), ("C", KeyCode::KeyC),
    ("D", KeyCode::KeyD), ("E", KeyCode::KeyE), ("F", KeyCode::KeyF),
    ("G", KeyCode::KeyG), ("H", KeyCode::KeyH), ("I", KeyCode::KeyI),
    ("J", KeyCode::KeyJ), ("K", KeyCode::KeyK), ("L", KeyCode::KeyL),
    ("M", KeyCode::KeyM), ("N", KeyCode::KeyN), ("O", KeyCode::KeyO),
    ("P", KeyCode::KeyP), ("Q", KeyCode::KeyQ), ("R", KeyCode::KeyR),
    ("S", KeyCode::KeyS), ("T", KeyCode::KeyT), ("U", KeyCode::KeyU),
    ("V", KeyCode::KeyV), ("W", KeyCode::KeyW), ("X", KeyCode::KeyX),
    ("Y", KeyCode::KeyY), ("Z", KeyCode::KeyZ),
    ("0", KeyCode::Digit0), ("1", KeyCode::Digit1), ("2", KeyCode::Digit2),
    ("3", KeyCode::Digit3), ("4", KeyCode::Digit4), ("5", KeyCode::Digit5),
    ("6", KeyCode::Digit6), ("7", KeyCode::Digit7), ("8", KeyCode::Digit8),
    ("9", KeyCode::Digit9),
    ("F1", KeyCode::F1), ("F2", KeyCode::F2), ("F3", KeyCode::F3),
    ("F4", KeyCode::F4), ("F5", KeyCode::F5), ("F6", KeyCode::F6),
    ("F7", KeyCode::F7), ("F8", KeyCode::F8), ("F9", KeyCode::F9),
    ("F10", KeyCode::F10), ("F11", KeyCode::F11), ("F12", KeyCode::F12),
    ("UP", KeyCode::ArrowUp), ("ARROWUP", KeyCode::ArrowUp),
    ("DOWN", KeyCode::ArrowDown), ("ARROWDOWN", KeyCode::ArrowDown),
    ("LEFT", KeyCode::ArrowLeft), ("ARROWLEFT", KeyCode::ArrowLeft),
    ("RIGHT", KeyCode::ArrowRight), ("ARROWRIGHT", KeyCode::ArrowRight),
    ("ESC", KeyCode::Escape), ("ESCAPE", KeyCode::Escape),
    ("SPACE", KeyCode::Space), ("TAB", KeyCode::Tab),
    ("ENTER", KeyCode::Enter), ("RETURN", KeyCode::Enter),
    ("BACKSPACE", KeyCode::Backspace),
    ("SHIFT", KeyCode::ShiftLeft), ("LSHIFT", KeyCode::ShiftLeft),
    ("RSHIFT", KeyCode::ShiftRight),
    ("CTRL", KeyCode::ControlLeft), ("LCTRL", KeyCode::ControlLeft),
    ("RCTRL", KeyCode::ControlRight),
    ("ALT", KeyCode::AltLeft), ("LALT", KeyCode::AltLeft),
    ("RALT", KeyCode::AltRight),
    ("[", KeyCode::BracketLeft), ("]", KeyCode::BracketRight),
    (",", KeyCode::Comma), (".", KeyCode::Period),
    ("-", KeyCode::Minus), ("=", KeyCode::Equal),
];

impl Settings {
    /// Convert a key identifier from `controls.keybinds` (e.g. "W", "Space",
    /// "F1") into a `KeyCode`. Returns `None` for unknown names.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let upper = name.trim().to_ascii_uppercase();
        NAMED_KEYS
            .iter()
            .find(|(key, _)| *key == upper)
            .map(|(_, code)| *code)
    }

    /// Resolve the key bound to `action`, falling back to `default` when the
    /// binding is missing or unparsable.
    #[must_use]
    pub fn key_for(&self, action: &str, default: KeyCode) -> KeyCode {
        self.controls
            .keybinds
            .get(action)
            .and_then(|s| Self::keycode_from_str(s))
            .unwrap_or(default)
    }
}

pub mod loader;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_are_case_insensitive() {
        assert_eq!(Settings::keycode_from_str("w"), Some(KeyCode::KeyW));
        assert_eq!(Settings::keycode_from_str("space"), Some(KeyCode::Space));
        assert_eq!(Settings::keycode_from_str("LShift"), Some(KeyCode::ShiftLeft));
        assert_eq!(Settings::keycode_from_str("nope"), None);
    }

    #[test]
    fn bad_binding_falls_back_to_default() {
        let mut s = Settings::default();
        s.controls.keybinds.insert("jump".into(), "NotAKey".into());
        assert_eq!(s.key_for("jump", KeyCode::Space), KeyCode::Space);
        s.controls.keybinds.insert("jump".into(), "J".into());
        assert_eq!(s.key_for("jump", KeyCode::Space), KeyCode::KeyJ);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let s: Settings = crate::ron::parse_ron("(movement: (base_speed: 0.15))").unwrap();
        assert!((s.movement.base_speed - 0.15).abs() < f32::EPSILON);
        assert!((s.movement.run_speed - 0.2).abs() < f32::EPSILON);
        assert!((s.movement.ground_level - 2.0).abs() < f32::EPSILON);
        assert_eq!(s.key_for("forward", KeyCode::ArrowUp), KeyCode::KeyW);
    }

    #[test]
    fn unusable_tick_rates_fall_back_to_default() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let movement = MovementSettings { tick_rate_hz: bad, ..MovementSettings::default() };
            assert_eq!(movement.effective_tick_rate(), 60.0, "tick rate {bad}");
        }
    }

    #[test]
    fn tick_rate_is_clamped_to_supported_range() {
        let mut movement = MovementSettings { tick_rate_hz: 1.0, ..MovementSettings::default() };
        assert_eq!(movement.effective_tick_rate(), MIN_TICK_HZ);
        movement.tick_rate_hz = 1_000.0;
        assert_eq!(movement.effective_tick_rate(), MAX_TICK_HZ);
        movement.tick_rate_hz = 120.0;
        assert_eq!(movement.effective_tick_rate(), 120.0);
    }

    #[test]
    fn zero_tick_rate_from_ron_is_usable() {
        let s: Settings = crate::ron::parse_ron("(movement: (tick_rate_hz: 0.0))").unwrap();
        assert_eq!(s.movement.effective_tick_rate(), 60.0);
    }

    #[test]
    fn music_level_is_clamped() {
        let audio = AudioSettings { master_volume: 3.0, music_volume: 1.0 };
        assert!((audio.music_level() - 1.0).abs() < f32::EPSILON);
    }
}
