//! Horizontal movement: WASD on the floor plane with a run modifier.
//!
//! Directional inputs add up without normalization, so diagonal movement is
//! `sqrt(2)` times faster than moving along one axis.

use bevy::prelude::*;

use crate::input::{Action, InputState};
use crate::player::{Player, PlayerLook};
use crate::settings::MovementSettings;

/// Below this length the projected view direction is treated as degenerate.
const MIN_FORWARD_LENGTH: f32 = 1e-4;

/// Forward and right vectors on the horizontal plane for `look`.
///
/// When looking straight up or down the projected view direction vanishes;
/// the yaw heading is used instead so the result is never NaN.
#[must_use]
pub fn horizontal_basis(look: &PlayerLook) -> (Vec3, Vec3) {
    let view = look.rotation() * Vec3::NEG_Z;
    let flat = Vec3::new(view.x, 0.0, view.z);
    let forward = if flat.length() > MIN_FORWARD_LENGTH {
        flat.normalize()
    } else {
        Vec3::new(-look.yaw.sin(), 0.0, -look.yaw.cos())
    };
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    (forward, right)
}

/// Displacement for one tick given the held actions.
#[must_use]
pub fn movement_step(look: &PlayerLook, input: &InputState, tuning: &MovementSettings) -> Vec3 {
    let (forward, right) = horizontal_basis(look);
    let speed = if input.is_held(Action::Run) { tuning.run_speed } else { tuning.base_speed };

    let mut step = Vec3::ZERO;
    if input.is_held(Action::Forward) {
        step += forward * speed;
    }
    if input.is_held(Action::Back) {
        step -= forward * speed;
    }
    if input.is_held(Action::Left) {
        step -= right * speed;
    }
    if input.is_held(Action::Right) {
        step += right * speed;
    }
    step
}

/// Move the player camera horizontally for this tick.
#[allow(clippy::needless_pass_by_value)]
pub fn camera_movement(
    input: Res<InputState>,
    settings: Res<crate::settings::Settings>,
    mut query: Query<(&mut Transform, &PlayerLook), With<Player>>,
) {
    for (mut transform, look) in &mut query {
        let step = movement_step(look, &input, &settings.movement);
        if step != Vec3::ZERO {
            transform.translation += step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, SQRT_2};

    fn held(actions: &[Action]) -> InputState {
        let mut s = InputState::default();
        for a in actions {
            s.press(*a);
        }
        s
    }

    #[test]
    fn default_look_walks_down_negative_z() {
        let step = movement_step(&PlayerLook::default(), &held(&[Action::Forward]), &MovementSettings::default());
        assert!(step.abs_diff_eq(Vec3::new(0.0, 0.0, -0.1), 1e-6));
    }

    #[test]
    fn right_is_positive_x_at_rest() {
        let (_, right) = horizontal_basis(&PlayerLook::default());
        assert!(right.abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let step = movement_step(
            &PlayerLook::default(),
            &held(&[Action::Forward, Action::Right]),
            &MovementSettings::default(),
        );
        assert!((step.length() - 0.1 * SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn run_doubles_speed() {
        let step = movement_step(
            &PlayerLook::default(),
            &held(&[Action::Back, Action::Run]),
            &MovementSettings::default(),
        );
        assert!(step.abs_diff_eq(Vec3::new(0.0, 0.0, 0.2), 1e-6));
    }

    #[test]
    fn opposite_keys_cancel() {
        let step = movement_step(
            &PlayerLook::default(),
            &held(&[Action::Left, Action::Right]),
            &MovementSettings::default(),
        );
        assert!(step.length() < 1e-6);
    }

    #[test]
    fn pitch_does_not_slow_walking() {
        let look = PlayerLook { yaw: 0.0, pitch: -1.2 };
        let step = movement_step(&look, &held(&[Action::Forward]), &MovementSettings::default());
        assert!((step.length() - 0.1).abs() < 1e-6);
        assert!(step.y.abs() < 1e-6);
    }

    #[test]
    fn straight_up_uses_yaw_heading() {
        for pitch in [FRAC_PI_2, -FRAC_PI_2] {
            let look = PlayerLook { yaw: FRAC_PI_2, pitch };
            let (forward, right) = horizontal_basis(&look);
            assert!(forward.is_finite() && right.is_finite());
            assert!(forward.abs_diff_eq(Vec3::NEG_X, 1e-5));
            assert!((right.length() - 1.0).abs() < 1e-5);
        }
    }
}
