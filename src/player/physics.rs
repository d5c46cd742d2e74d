//! Player physics: jumping and a single vertical gravity integrator.
//!
//! There is no floor collision beyond the ground level plane: the player is
//! either standing at `ground_level` or airborne on a jump arc.

use bevy::prelude::*;

use crate::input::{Action, InputState};
use crate::player::{JumpState, Player};
use crate::settings::MovementSettings;

/// Step the vertical physics for one tick.
///
/// A held jump only starts a jump while grounded, so holding it mid-air never
/// resets the arc. Holding it through a landing jumps again on the next tick.
pub fn physics_step(translation: &mut Vec3, jump: &mut JumpState, jump_held: bool, tuning: &MovementSettings) {
    if jump_held && !jump.is_jumping {
        jump.is_jumping = true;
        jump.vertical_velocity = tuning.jump_strength;
    }

    if !jump.is_jumping {
        return;
    }

    jump.vertical_velocity += tuning.gravity;
    translation.y += jump.vertical_velocity;

    if translation.y <= tuning.ground_level {
        translation.y = tuning.ground_level;
        jump.is_jumping = false;
        jump.vertical_velocity = 0.0;
    }
}

/// Apply jump input and gravity to the player camera.
#[allow(clippy::needless_pass_by_value)]
pub fn player_physics(
    input: Res<InputState>,
    settings: Res<crate::settings::Settings>,
    mut query: Query<(&mut Transform, &mut JumpState), With<Player>>,
) {
    let jump_held = input.is_held(Action::Jump);
    for (mut transform, mut jump) in &mut query {
        let was_jumping = jump.is_jumping;
        physics_step(&mut transform.translation, &mut jump, jump_held, &settings.movement);
        if was_jumping && !jump.is_jumping {
            trace!("landed at y={}", transform.translation.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded() -> (Vec3, JumpState) {
        (Vec3::new(0.0, 2.0, 10.0), JumpState::default())
    }

    #[test]
    fn jump_starts_with_gravity_already_applied() {
        let tuning = MovementSettings::default();
        let (mut pos, mut jump) = grounded();
        physics_step(&mut pos, &mut jump, true, &tuning);
        assert!(jump.is_jumping);
        assert!((jump.vertical_velocity - 0.19).abs() < 1e-6);
        assert!((pos.y - 2.19).abs() < 1e-6);
    }

    #[test]
    fn holding_jump_mid_air_only_feels_gravity() {
        let tuning = MovementSettings::default();
        let (mut pos, mut jump) = grounded();
        physics_step(&mut pos, &mut jump, true, &tuning);
        for _ in 0..10 {
            let before = jump.vertical_velocity;
            physics_step(&mut pos, &mut jump, true, &tuning);
            assert!(jump.is_jumping);
            assert!((jump.vertical_velocity - (before + tuning.gravity)).abs() < 1e-6);
        }
    }

    #[test]
    fn landing_clamps_and_stays_put() {
        let tuning = MovementSettings::default();
        let (mut pos, mut jump) = grounded();
        physics_step(&mut pos, &mut jump, true, &tuning);
        let mut ticks = 0;
        while jump.is_jumping {
            physics_step(&mut pos, &mut jump, false, &tuning);
            ticks += 1;
            assert!(ticks < 1_000, "jump never landed");
        }
        assert_eq!(pos.y, tuning.ground_level);
        for _ in 0..5 {
            physics_step(&mut pos, &mut jump, false, &tuning);
            assert_eq!(pos.y, tuning.ground_level);
            assert!(!jump.is_jumping);
            assert_eq!(jump.vertical_velocity, 0.0);
        }
    }

    #[test]
    fn apex_is_reached_after_about_twenty_ticks() {
        let tuning = MovementSettings::default();
        let (mut pos, mut jump) = grounded();
        physics_step(&mut pos, &mut jump, true, &tuning);
        let mut peak = pos.y;
        while jump.is_jumping {
            physics_step(&mut pos, &mut jump, false, &tuning);
            peak = peak.max(pos.y);
        }
        // 0.19 + 0.18 + ... + 0.01 = 1.9
        assert!((peak - 3.9).abs() < 1e-3);
    }

    #[test]
    fn held_jump_bunny_hops_after_landing() {
        let tuning = MovementSettings::default();
        let (mut pos, mut jump) = grounded();
        physics_step(&mut pos, &mut jump, true, &tuning);
        while jump.is_jumping {
            physics_step(&mut pos, &mut jump, true, &tuning);
        }
        physics_step(&mut pos, &mut jump, true, &tuning);
        assert!(jump.is_jumping);
        assert!(pos.y > tuning.ground_level);
    }

    #[test]
    fn no_input_while_grounded_changes_nothing() {
        let tuning = MovementSettings::default();
        let (mut pos, mut jump) = grounded();
        physics_step(&mut pos, &mut jump, false, &tuning);
        assert_eq!(pos, Vec3::new(0.0, 2.0, 10.0));
        assert_eq!(jump, JumpState::default());
    }
}
