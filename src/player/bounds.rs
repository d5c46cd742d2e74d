//! Out-of-bounds recovery.
//!
//! Leaving the room horizontally teleports the player back to the spawn
//! point. Height is never checked, and the jump state is left as is, so a jump
//! in progress carries on from the spawn point.

use bevy::prelude::*;

use crate::player::Player;

/// Horizontal extent of the room around the origin.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RoomBounds {
    pub half_width: f32,
    pub half_depth: f32,
}

impl RoomBounds {
    #[must_use]
    pub fn from_size(width: f32, depth: f32) -> Self {
        Self { half_width: width / 2.0, half_depth: depth / 2.0 }
    }

    /// Points exactly on the edge still count as inside.
    #[must_use]
    pub fn contains(&self, position: Vec3) -> bool {
        position.x.abs() <= self.half_width && position.z.abs() <= self.half_depth
    }
}

/// Where the player starts and is sent back to.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint(pub Vec3);

/// Reset `position` to the spawn point when it has left `bounds`.
/// Returns whether a teleport happened.
pub fn enforce_bounds(position: &mut Vec3, bounds: &RoomBounds, spawn: &SpawnPoint) -> bool {
    if bounds.contains(*position) {
        return false;
    }
    *position = spawn.0;
    true
}

/// Runs after the movement integrator each tick.
#[allow(clippy::needless_pass_by_value)]
pub fn boundary_monitor(
    bounds: Res<RoomBounds>,
    spawn: Res<SpawnPoint>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    for mut transform in &mut query {
        let escaped_at = transform.translation;
        if enforce_bounds(&mut transform.translation, &bounds, &spawn) {
            info!(
                "left the room at ({:.2}, {:.2}, {:.2}), back to spawn",
                escaped_at.x, escaped_at.y, escaped_at.z
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (RoomBounds, SpawnPoint) {
        (RoomBounds { half_width: 25.0, half_depth: 25.0 }, SpawnPoint(Vec3::new(0.0, 2.0, 10.0)))
    }

    #[test]
    fn crossing_x_teleports_to_spawn() {
        let (bounds, spawn) = setup();
        let mut pos = Vec3::new(26.0, 2.0, 3.0);
        assert!(enforce_bounds(&mut pos, &bounds, &spawn));
        assert_eq!(pos, Vec3::new(0.0, 2.0, 10.0));
    }

    #[test]
    fn crossing_negative_z_teleports_to_spawn() {
        let (bounds, spawn) = setup();
        let mut pos = Vec3::new(0.0, 3.1, -25.01);
        assert!(enforce_bounds(&mut pos, &bounds, &spawn));
        assert_eq!(pos, spawn.0);
    }

    #[test]
    fn height_is_unconstrained() {
        let (bounds, spawn) = setup();
        let mut pos = Vec3::new(1.0, 500.0, 1.0);
        assert!(!enforce_bounds(&mut pos, &bounds, &spawn));
        assert_eq!(pos, Vec3::new(1.0, 500.0, 1.0));
    }

    #[test]
    fn edge_is_inside() {
        let (bounds, spawn) = setup();
        let mut pos = Vec3::new(25.0, 2.0, -25.0);
        assert!(!enforce_bounds(&mut pos, &bounds, &spawn));
    }

    #[test]
    fn bounds_from_room_size() {
        assert_eq!(RoomBounds::from_size(30.0, 20.0), RoomBounds { half_width: 15.0, half_depth: 10.0 });
    }
}
