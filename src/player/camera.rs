//! Mouse-look and cursor (pointer-lock) handling.
//!
//! `camera_look` accumulates mouse motion for the current update and applies
//! it to [`PlayerLook`] only while the cursor is grabbed. `cursor_grab`
//! grabs on left click and releases on the pause key, mirroring the result
//! into the [`PointerLock`] resource.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::input::PointerLock;
use crate::player::Player;
use crate::settings::ControlsSettings;

/// Radians of rotation per pixel of mouse motion at sensitivity 1.0.
pub const BASE_LOOK_RATE: f32 = 0.001;

/// The player's look orientation in radians.
///
/// - `yaw`: rotation about world up, wrapped to `[-PI, PI)`.
/// - `pitch`: rotation about the lateral axis, always within `[-PI/2, PI/2]`.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerLook {
    pub yaw: f32,
    pub pitch: f32,
}

impl PlayerLook {
    /// Apply a raw pointer delta in pixels. Moving the mouse right turns
    /// right (yaw decreases); moving it down looks down.
    pub fn apply_delta(&mut self, delta: Vec2, controls: &ControlsSettings) {
        let rate = BASE_LOOK_RATE * controls.mouse_sensitivity;
        let dx = if controls.invert_x { -delta.x } else { delta.x };
        let dy = if controls.invert_y { -delta.y } else { delta.y };

        self.yaw = wrap_angle(self.yaw - dx * rate);
        self.pitch = (self.pitch - dy * rate).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Yaw about world Y first (outer), then pitch about the yawed X axis.
    /// Composing in this order never introduces roll.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }
}

fn wrap_angle(a: f32) -> f32 {
    let wrapped = (a + PI).rem_euclid(TAU) - PI;
    // rem_euclid rounds up to TAU for inputs just below -PI.
    if wrapped >= PI { -PI } else { wrapped }
}

/// Apply mouse-look to the player camera.
#[allow(clippy::needless_pass_by_value)]
pub fn camera_look(
    lock: Res<PointerLock>,
    motion_events: Res<Events<MouseMotion>>,
    settings: Res<crate::settings::Settings>,
    mut query: Query<(&mut Transform, &mut PlayerLook), With<Player>>,
) {
    let delta: Vec2 = motion_events.iter_current_update_events().map(|ev| ev.delta).sum();
    if delta == Vec2::ZERO || !lock.locked {
        return;
    }

    for (mut transform, mut look) in &mut query {
        look.apply_delta(delta, &settings.controls);
        transform.rotation = look.rotation();
    }
}

/// Grab the cursor on left click, release it on the pause key.
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_grab(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<crate::settings::Settings>,
    mut lock: ResMut<PointerLock>,
) {
    let Ok(mut window) = windows.get_single_mut() else { return };

    if mouse.just_pressed(MouseButton::Left) && !lock.locked {
        window.cursor.grab_mode = CursorGrabMode::Locked;
        window.cursor.visible = false;
    }

    if keyboard.just_pressed(settings.key_for("pause", KeyCode::Escape)) {
        window.cursor.grab_mode = CursorGrabMode::None;
        window.cursor.visible = true;
    }

    let locked = window.cursor.grab_mode != CursorGrabMode::None;
    if lock.locked != locked {
        debug!("pointer lock: {locked}");
        lock.locked = locked;
    }
}
