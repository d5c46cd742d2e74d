//! Startup: derive the movement resources from the gallery layout and spawn
//! the camera, lights and HUD.
use bevy::prelude::*;
use gallery::gallery::GalleryLayout;
use gallery::player::{JumpState, Player, PlayerLook};
use gallery::settings::Settings;

/// Insert `RoomBounds` / `SpawnPoint` and spawn the visitor camera and lights.
///
/// The camera starts at the spawn point looking down -Z, towards the back
/// wall.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(mut commands: Commands, layout: Res<GalleryLayout>, settings: Res<Settings>) {
    let spawn = layout.spawn_point();
    commands.insert_resource(layout.bounds());
    commands.insert_resource(spawn);

    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(spawn.0),
            projection: Projection::Perspective(PerspectiveProjection {
                fov: settings.graphics.fov_degrees.to_radians(),
                near: 0.1,
                far: 1000.0,
                ..default()
            }),
            ..default()
        },
        Player,
        PlayerLook::default(),
        JumpState::default(),
        Name::new("visitor"),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    commands.spawn((
        PointLightBundle {
            point_light: PointLight {
                intensity: 1_500_000.0,
                range: 100.0,
                color: Color::WHITE,
                shadows_enabled: false,
                ..default()
            },
            transform: Transform::from_xyz(0.0, 5.0, 5.0),
            ..default()
        },
        Name::new("gallery light"),
    ));

    gallery::ui::spawn_crosshair(&mut commands);
}
