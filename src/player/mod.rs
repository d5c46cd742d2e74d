//! Player components and systems (look, movement, jump physics, bounds).
//!
//! The gallery visitor is a single camera entity carrying [`Player`],
//! [`PlayerLook`] and [`JumpState`]. Per fixed tick the systems run as
//! `camera_movement -> player_physics -> boundary_monitor`; mouse-look runs
//! every rendered frame.
//!
//! # Example:
//!
//! ```ignore
//! commands.spawn((
//!     Camera3dBundle::default(),
//!     Player,
//!     PlayerLook::default(),
//!     JumpState::default(),
//! ));
//! app.add_systems(
//!     FixedUpdate,
//!     (camera_movement, player_physics, boundary_monitor).chain(),
//! );
//! ```
pub mod bounds;
pub mod camera;
pub mod movement;
pub mod physics;

use bevy::prelude::*;

pub use bounds::*;
pub use camera::*;
pub use movement::*;
pub use physics::*;

/// Marks the camera entity driven by the visitor's input.
#[derive(Component, Debug, Default)]
pub struct Player;

/// Vertical jump state of the player.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct JumpState {
    pub is_jumping: bool,
    /// World units per tick, positive upwards.
    pub vertical_velocity: f32,
}
