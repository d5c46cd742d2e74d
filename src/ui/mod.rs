//! User interface: instructions overlay, crosshair, debug overlay and a
//! room-bounds gizmo.
//!
//! The instructions overlay is visible whenever the pointer is not locked,
//! which is how the visitor learns to click into the gallery. The debug
//! overlay refreshes on a timer with FPS, position, look angles, jump state
//! and the current music track.

use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::audio::TrackCycler;
use crate::input::PointerLock;
use crate::player::{JumpState, Player, PlayerLook, RoomBounds};

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    pub visible: bool,
}

#[derive(Resource, Default)]
pub struct DebugOverlayTimer(pub Timer);

#[derive(Resource, Default)]
pub struct BoundsGizmoVisible(pub bool);

#[derive(Component)]
pub struct DebugOverlayText;

#[derive(Component)]
pub struct InstructionsOverlay;

pub fn setup_debug_overlay(mut commands: Commands) {
    commands.insert_resource(DebugOverlayTimer(Timer::from_seconds(0.5, TimerMode::Repeating)));
    commands.insert_resource(DebugOverlayState::default());
    commands.insert_resource(BoundsGizmoVisible::default());
}

#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(
    mut state: ResMut<DebugOverlayState>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<crate::settings::Settings>,
) {
    if input.just_pressed(settings.key_for("toggle_debug", KeyCode::F1)) {
        state.visible = !state.visible;
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn toggle_bounds_gizmo(
    mut shown: ResMut<BoundsGizmoVisible>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<crate::settings::Settings>,
) {
    if input.just_pressed(settings.key_for("toggle_bounds", KeyCode::F2)) {
        shown.0 = !shown.0;
    }
}

pub fn spawn_debug_overlay(mut commands: Commands) {
    commands.spawn((
        TextBundle {
            text: Text::from_section(
                "",
                TextStyle {
                    font_size: 18.0,
                    color: Color::srgb(1.0, 1.0, 0.0),
                    ..default()
                },
            ),
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            ..default()
        },
        DebugOverlayText,
    ));
}

#[derive(bevy::ecs::system::SystemParam)]
pub struct DebugOverlayCtx<'w, 's> {
    pub diagnostics: Res<'w, DiagnosticsStore>,
    pub state: Res<'w, DebugOverlayState>,
    pub time: Res<'w, Time>,
    pub timer: ResMut<'w, DebugOverlayTimer>,
    pub cycler: Option<Res<'w, TrackCycler>>,
    pub query: Query<'w, 's, &'static mut Text, With<DebugOverlayText>>,
    pub player_query: Query<'w, 's, (&'static Transform, &'static PlayerLook, &'static JumpState), With<Player>>,
}

/// Format the overlay body. Kept separate from the system for testing.
#[must_use]
pub fn debug_text(fps: f64, position: Vec3, look: &PlayerLook, jump: &JumpState, track: Option<(usize, usize)>) -> String {
    let track = track.map_or_else(|| "none".to_string(), |(i, n)| format!("{}/{n}", i + 1));
    format!(
        "FPS: {fps:.1}\nPos: ({:.2}, {:.2}, {:.2})\nYaw: {:.1}° Pitch: {:.1}°\nJumping: {} (vy {:.3})\nTrack: {track}",
        position.x,
        position.y,
        position.z,
        look.yaw.to_degrees(),
        look.pitch.to_degrees(),
        jump.is_jumping,
        jump.vertical_velocity,
    )
}

pub fn update_debug_overlay(mut ctx: DebugOverlayCtx<'_, '_>) {
    if !ctx.timer.0.tick(ctx.time.delta()).just_finished() {
        return;
    }

    let Ok(mut text) = ctx.query.get_single_mut() else { return };

    if !ctx.state.visible {
        text.sections[0].value.clear();
        return;
    }

    let fps = ctx
        .diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let track = ctx
        .cycler
        .as_ref()
        .and_then(|c| c.current().map(|i| (i, c.len())));

    text.sections[0].value = match ctx.player_query.get_single() {
        Ok((transform, look, jump)) => debug_text(fps, transform.translation, look, jump, track),
        Err(_) => format!("FPS: {fps:.1}\nPlayer: N/A"),
    };
}

/// Outline the region the player may walk in before being sent back.
#[allow(clippy::needless_pass_by_value)]
pub fn render_room_bounds(
    shown: Res<BoundsGizmoVisible>,
    bounds: Res<RoomBounds>,
    mut gizmos: Gizmos,
) {
    if !shown.0 {
        return;
    }
    let RoomBounds { half_width: w, half_depth: d } = *bounds;
    // Just above the floor so it is not z-fighting with it.
    let y = 0.05;
    let corners = [
        Vec3::new(-w, y, -d),
        Vec3::new(w, y, -d),
        Vec3::new(w, y, d),
        Vec3::new(-w, y, d),
    ];
    let green = Color::srgb(0.0, 1.0, 0.0);
    for i in 0..corners.len() {
        gizmos.line(corners[i], corners[(i + 1) % corners.len()], green);
    }
}

/// "Click to explore" panel shown while the pointer is free.
pub fn spawn_instructions(mut commands: Commands) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    position_type: PositionType::Absolute,
                    flex_direction: FlexDirection::Column,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.5).into(),
                ..default()
            },
            InstructionsOverlay,
        ))
        .with_children(|p| {
            p.spawn(TextBundle::from_section(
                "Click to explore",
                TextStyle { font_size: 40.0, color: Color::WHITE, ..default() },
            ));
            p.spawn(TextBundle::from_section(
                "WASD move · Shift run · Space jump · Mouse look · N/P music · Esc release",
                TextStyle { font_size: 18.0, color: Color::srgb(0.85, 0.85, 0.85), ..default() },
            ));
        });
}

/// Show the instructions while unlocked, hide them while locked. Touch
/// devices never lock the pointer, so the first touch dismisses them for good.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_instructions_overlay(
    lock: Res<PointerLock>,
    touches: Res<Touches>,
    mut touched: Local<bool>,
    mut overlays: Query<&mut Visibility, With<InstructionsOverlay>>,
) {
    if touches.any_just_pressed() {
        *touched = true;
    }
    let target = if lock.locked || *touched { Visibility::Hidden } else { Visibility::Inherited };
    for mut v in &mut overlays {
        if *v != target {
            *v = target;
        }
    }
}

/// Spawn a crosshair UI element centered on the screen.
pub fn spawn_crosshair(commands: &mut Commands) {
    commands
        .spawn(NodeBundle {
            style: Style {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            ..default()
        })
        .with_children(|p| {
            for (w, h) in [(16.0, 2.0), (2.0, 16.0)] {
                p.spawn(NodeBundle {
                    style: Style {
                        position_type: PositionType::Absolute,
                        width: Val::Px(w),
                        height: Val::Px(h),
                        ..default()
                    },
                    background_color: Color::srgba(1.0, 1.0, 1.0, 0.8).into(),
                    ..default()
                });
            }
        });
}
