//! Display-related systems that keep the window and camera in step with the
//! hot-reloadable `Settings`.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use gallery::player::Player;
use gallery::settings::Settings;

/// Apply `graphics.vsync` to the primary window's present mode.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_vsync_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut last: Local<Option<bool>>,
) {
    let desired = settings.graphics.vsync;
    if *last == Some(desired) {
        return;
    }

    for mut w in &mut windows {
        w.present_mode = if desired { PresentMode::AutoVsync } else { PresentMode::AutoNoVsync };
    }
    *last = Some(desired);
}

/// Apply `graphics.fov_degrees` to the visitor camera.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_camera_fov(settings: Res<Settings>, mut cameras: Query<&mut Projection, With<Player>>) {
    if !settings.is_changed() {
        return;
    }
    let fov = settings.graphics.fov_degrees.clamp(30.0, 120.0).to_radians();
    for mut projection in &mut cameras {
        if let Projection::Perspective(p) = &mut *projection
            && (p.fov - fov).abs() > f32::EPSILON
        {
            p.fov = fov;
        }
    }
}
