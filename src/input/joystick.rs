//! On-screen touch joystick.
//!
//! A touch that starts inside the lower-left zone becomes the joystick. Its
//! offset from the start point is reduced to one of four directions and fed
//! into [`InputState`] as a [`JoystickEvent`]; lifting the finger sends
//! `End`. Any other touch drags the view like the mouse does.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::{Action, InputState};
use crate::player::{Player, PlayerLook};

/// Offset (logical px) below which a drag is not a direction yet.
pub const JOYSTICK_DEAD_ZONE: f32 = 20.0;
const JOYSTICK_BASE_SIZE: f32 = 120.0;
const JOYSTICK_KNOB_SIZE: f32 = 48.0;
const JOYSTICK_MARGIN: f32 = 40.0;
const KNOB_TRAVEL: f32 = 36.0;

/// Discretized joystick direction. Screen up is forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoystickDirection {
    Up,
    Down,
    Left,
    Right,
}

impl JoystickDirection {
    /// The directional action this direction holds down.
    #[must_use]
    pub fn action(self) -> Action {
        match self {
            JoystickDirection::Up => Action::Forward,
            JoystickDirection::Down => Action::Back,
            JoystickDirection::Left => Action::Left,
            JoystickDirection::Right => Action::Right,
        }
    }

    /// Pick the dominant axis of a screen-space offset (y grows downwards).
    #[must_use]
    pub fn from_offset(offset: Vec2, dead_zone: f32) -> Option<Self> {
        if offset.length() < dead_zone {
            return None;
        }
        Some(if offset.x.abs() > offset.y.abs() {
            if offset.x > 0.0 { JoystickDirection::Right } else { JoystickDirection::Left }
        } else if offset.y < 0.0 {
            JoystickDirection::Up
        } else {
            JoystickDirection::Down
        })
    }

    fn screen_vector(self) -> Vec2 {
        match self {
            JoystickDirection::Up => Vec2::new(0.0, -1.0),
            JoystickDirection::Down => Vec2::new(0.0, 1.0),
            JoystickDirection::Left => Vec2::new(-1.0, 0.0),
            JoystickDirection::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// What the joystick widget reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoystickEvent {
    Direction(JoystickDirection),
    End,
}

/// The touch currently owning the joystick.
#[derive(Resource, Debug, Default)]
pub struct ActiveJoystick {
    pub touch: Option<u64>,
    pub origin: Vec2,
}

#[derive(Component)]
pub struct JoystickKnob;

/// Lower-left quadrant-ish region of the window that grabs joystick touches.
#[must_use]
pub fn in_joystick_zone(position: Vec2, window_size: Vec2) -> bool {
    position.x <= window_size.x * 0.4 && position.y >= window_size.y * 0.5
}

/// Track the joystick touch and translate it into `InputState` events.
#[allow(clippy::needless_pass_by_value)]
pub fn touch_joystick(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut joystick: ResMut<ActiveJoystick>,
    mut input: ResMut<InputState>,
) {
    if let Some(id) = joystick.touch {
        // Released, cancelled, or gone between frames: all end the stick.
        let Some(touch) = touches.get_pressed(id) else {
            joystick.touch = None;
            input.apply_joystick(JoystickEvent::End);
            return;
        };
        let offset = touch.position() - joystick.origin;
        if let Some(dir) = JoystickDirection::from_offset(offset, JOYSTICK_DEAD_ZONE)
            && input.joystick() != Some(dir)
        {
            input.apply_joystick(JoystickEvent::Direction(dir));
        }
        return;
    }

    let Ok(window) = windows.get_single() else { return };
    let size = Vec2::new(window.width(), window.height());
    if let Some(touch) = touches
        .iter_just_pressed()
        .find(|t| in_joystick_zone(t.position(), size))
    {
        joystick.touch = Some(touch.id());
        joystick.origin = touch.position();
    }
}

/// Drag-to-look for touches that are not the joystick.
#[allow(clippy::needless_pass_by_value)]
pub fn touch_look(
    touches: Res<Touches>,
    joystick: Res<ActiveJoystick>,
    settings: Res<crate::settings::Settings>,
    mut query: Query<(&mut Transform, &mut PlayerLook), With<Player>>,
) {
    let delta: Vec2 = touches
        .iter()
        .filter(|t| Some(t.id()) != joystick.touch)
        .map(bevy::input::touch::Touch::delta)
        .sum();
    if delta == Vec2::ZERO {
        return;
    }
    for (mut transform, mut look) in &mut query {
        look.apply_delta(delta, &settings.controls);
        transform.rotation = look.rotation();
    }
}

/// Spawn the joystick base and knob in the lower-left corner.
pub fn spawn_joystick_widget(mut commands: Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(JOYSTICK_MARGIN),
                bottom: Val::Px(JOYSTICK_MARGIN),
                width: Val::Px(JOYSTICK_BASE_SIZE),
                height: Val::Px(JOYSTICK_BASE_SIZE),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            background_color: Color::srgba(1.0, 1.0, 1.0, 0.12).into(),
            border_radius: BorderRadius::MAX,
            ..default()
        })
        .with_children(|base| {
            base.spawn((
                NodeBundle {
                    style: Style {
                        width: Val::Px(JOYSTICK_KNOB_SIZE),
                        height: Val::Px(JOYSTICK_KNOB_SIZE),
                        ..default()
                    },
                    background_color: Color::srgba(1.0, 1.0, 1.0, 0.35).into(),
                    border_radius: BorderRadius::MAX,
                    ..default()
                },
                JoystickKnob,
            ));
        });
}

/// Nudge the knob toward the active direction.
#[allow(clippy::needless_pass_by_value)]
pub fn update_joystick_widget(input: Res<InputState>, mut knobs: Query<&mut Style, With<JoystickKnob>>) {
    if !input.is_changed() {
        return;
    }
    let offset = input
        .joystick()
        .map_or(Vec2::ZERO, |d| d.screen_vector() * KNOB_TRAVEL);
    for mut style in &mut knobs {
        style.left = Val::Px(offset.x);
        style.top = Val::Px(offset.y);
    }
}
