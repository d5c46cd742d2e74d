//! Logical input state shared by the keyboard and the touch joystick.
//!
//! `collect_keyboard_input` refreshes the keyboard half once per frame from
//! Bevy's `ButtonInput<KeyCode>`; the joystick half is driven by touch events
//! (see [`joystick`]). The movement systems only ever ask `is_held`.

pub mod joystick;

use bevy::prelude::*;
use std::collections::HashSet;

pub use joystick::*;

/// Actions the movement integrator consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Run,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Forward,
        Action::Back,
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Run,
    ];

    /// Name used in `controls.keybinds`.
    #[must_use]
    pub fn binding_name(self) -> &'static str {
        match self {
            Action::Forward => "forward",
            Action::Back => "back",
            Action::Left => "left",
            Action::Right => "right",
            Action::Jump => "jump",
            Action::Run => "run",
        }
    }

    #[must_use]
    pub fn default_key(self) -> KeyCode {
        match self {
            Action::Forward => KeyCode::KeyW,
            Action::Back => KeyCode::KeyS,
            Action::Left => KeyCode::KeyA,
            Action::Right => KeyCode::KeyD,
            Action::Jump => KeyCode::Space,
            Action::Run => KeyCode::ShiftLeft,
        }
    }
}

/// Currently held actions.
#[derive(Resource, Debug, Default, Clone)]
pub struct InputState {
    keys: HashSet<Action>,
    joystick: Option<JoystickDirection>,
}

impl InputState {
    pub fn press(&mut self, action: Action) {
        self.keys.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.keys.remove(&action);
    }

    /// Feed one joystick widget event. A direction replaces any previous one;
    /// `End` releases all four directions.
    pub fn apply_joystick(&mut self, event: JoystickEvent) {
        self.joystick = match event {
            JoystickEvent::Direction(dir) => Some(dir),
            JoystickEvent::End => None,
        };
    }

    #[must_use]
    pub fn joystick(&self) -> Option<JoystickDirection> {
        self.joystick
    }

    #[must_use]
    pub fn is_held(&self, action: Action) -> bool {
        self.keys.contains(&action) || self.joystick.is_some_and(|d| d.action() == action)
    }
}

/// Whether the cursor is currently grabbed for mouse-look.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PointerLock {
    pub locked: bool,
}

/// Mirror the keyboard into `InputState` using the configured bindings.
#[allow(clippy::needless_pass_by_value)]
pub fn collect_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<crate::settings::Settings>,
    mut state: ResMut<InputState>,
) {
    for action in Action::ALL {
        let key = settings.key_for(action.binding_name(), action.default_key());
        // Shift is commonly held on either side.
        let held = keyboard.pressed(key)
            || (action == Action::Run && key == KeyCode::ShiftLeft && keyboard.pressed(KeyCode::ShiftRight));
        if held {
            state.press(action);
        } else {
            state.release(action);
        }
    }
}
