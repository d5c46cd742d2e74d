//! Room geometry and artwork panels.
//!
//! All surfaces are `Rectangle` meshes (XY plane, facing +Z) rotated into
//! place. Artwork panels start hidden and are revealed once their image has
//! loaded; a panel whose image fails to load is removed.

use bevy::asset::LoadState;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use crate::gallery::{GalleryLayout, RoomSize};

const WALL_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);

/// A flat room surface: its size and where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub name: &'static str,
    pub size: Vec2,
    pub transform: Transform,
}

#[derive(Component, Debug)]
pub struct RoomSurface;

/// An artwork panel and the image it shows.
#[derive(Component, Debug)]
pub struct Artwork {
    pub file: String,
}

/// Panel still waiting for its texture.
#[derive(Component, Debug)]
pub struct PendingArtwork(pub Handle<Image>);

/// Floor, four walls and ceiling of a room centred on the origin.
#[must_use]
pub fn room_surfaces(room: &RoomSize) -> [Surface; 6] {
    let RoomSize { width, height, depth } = *room;
    let mid = height / 2.0;
    [
        Surface {
            name: "floor",
            size: Vec2::new(width, depth),
            transform: Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
        },
        Surface {
            name: "back wall",
            size: Vec2::new(width, height),
            transform: Transform::from_xyz(0.0, mid, -depth / 2.0),
        },
        Surface {
            name: "front wall",
            size: Vec2::new(width, height),
            transform: Transform::from_xyz(0.0, mid, depth / 2.0),
        },
        Surface {
            name: "left wall",
            size: Vec2::new(depth, height),
            transform: Transform::from_xyz(-width / 2.0, mid, 0.0)
                .with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
        },
        Surface {
            name: "right wall",
            size: Vec2::new(depth, height),
            transform: Transform::from_xyz(width / 2.0, mid, 0.0)
                .with_rotation(Quat::from_rotation_y(-FRAC_PI_2)),
        },
        Surface {
            name: "ceiling",
            size: Vec2::new(width, depth),
            transform: Transform::from_xyz(0.0, height, 0.0)
                .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        },
    ]
}

/// Spawn the room surfaces with a shared grey material.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_room(
    mut commands: Commands,
    layout: Res<GalleryLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Double sided so the walls read correctly from inside and out.
    let wall_material = materials.add(StandardMaterial {
        base_color: WALL_COLOR,
        perceptual_roughness: 0.9,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    for surface in room_surfaces(&layout.room) {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Rectangle::from_size(surface.size)),
                material: wall_material.clone(),
                transform: surface.transform,
                ..default()
            },
            RoomSurface,
            Name::new(surface.name),
        ));
    }
}

/// Start loading every artwork and spawn its (hidden) panel.
#[allow(clippy::needless_pass_by_value)]
pub fn spawn_artworks(
    mut commands: Commands,
    layout: Res<GalleryLayout>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for art in &layout.artworks {
        let image: Handle<Image> = asset_server.load(art.file.clone());
        let material = materials.add(StandardMaterial {
            base_color_texture: Some(image.clone()),
            unlit: true,
            ..default()
        });

        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Rectangle::new(art.size, art.size)),
                material,
                transform: Transform::from_translation(Vec3::from_array(art.position))
                    .with_rotation(Quat::from_rotation_y(art.rotation_y)),
                visibility: Visibility::Hidden,
                ..default()
            },
            Artwork { file: art.file.clone() },
            PendingArtwork(image),
            Name::new(format!("artwork {}", art.file)),
        ));
    }
}

/// Show panels whose image is ready and drop the ones that failed.
#[allow(clippy::needless_pass_by_value)]
pub fn reveal_loaded_artworks(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut pending: Query<(Entity, &Artwork, &PendingArtwork, &mut Visibility)>,
) {
    for (entity, art, PendingArtwork(image), mut visibility) in &mut pending {
        match asset_server.get_load_state(image.id()) {
            Some(LoadState::Loaded) => {
                *visibility = Visibility::Inherited;
                commands.entity(entity).remove::<PendingArtwork>();
                debug!("artwork ready: {}", art.file);
            }
            Some(LoadState::Failed(err)) => {
                warn!("artwork '{}' could not be loaded, skipping: {err}", art.file);
                commands.entity(entity).despawn_recursive();
            }
            _ => {}
        }
    }
}
