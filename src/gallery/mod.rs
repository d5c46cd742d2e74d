//! Gallery layout: room size, spawn point, artworks and music playlist.
//!
//! The layout is read from `data/gallery/*.ron` at startup. Every field has
//! a default, so an empty `()` document describes the stock gallery: a
//! 30 x 10 x 20 room with four paintings and three music tracks.

pub mod loader;
pub mod room;

use bevy::prelude::{Quat, Resource, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::player::{RoomBounds, SpawnPoint};

pub use room::*;

/// Why a layout was rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LayoutError {
    #[error("room dimensions must be positive, got {width} x {height} x {depth}")]
    InvalidRoom { width: f32, height: f32, depth: f32 },
    #[error("spawn point ({x}, {z}) lies outside the room")]
    SpawnOutsideRoom { x: f32, z: f32 },
    #[error("artwork '{file}' has non-positive size {size}")]
    InvalidArtworkSize { file: String, size: f32 },
    #[error("music volume {0} is outside 0..=1")]
    InvalidVolume(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for RoomSize {
    fn default() -> Self {
        Self { width: 30.0, height: 10.0, depth: 20.0 }
    }
}

/// One framed image on the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkSpec {
    /// Path relative to the `assets/` directory.
    pub file: String,
    pub position: [f32; 3],
    /// Rotation about the vertical axis; 0 faces +Z.
    #[serde(default)]
    pub rotation_y: f32,
    #[serde(default = "ArtworkSpec::default_size")]
    pub size: f32,
}

impl ArtworkSpec {
    fn default_size() -> f32 { 3.0 }

    fn new(file: &str, position: [f32; 3], rotation_y: f32) -> Self {
        Self { file: file.to_string(), position, rotation_y, size: Self::default_size() }
    }

    /// Direction the painted side faces.
    #[must_use]
    pub fn facing(&self) -> Vec3 {
        Quat::from_rotation_y(self.rotation_y) * Vec3::Z
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryLayout {
    #[serde(default)]
    pub room: RoomSize,
    #[serde(default = "GalleryLayout::default_spawn")]
    pub spawn: [f32; 3],
    #[serde(default = "GalleryLayout::default_artworks")]
    pub artworks: Vec<ArtworkSpec>,
    #[serde(default = "GalleryLayout::default_music")]
    pub music: Vec<String>,
    /// Overrides the volume derived from the audio settings.
    #[serde(default)]
    pub music_volume: Option<f32>,
}

impl GalleryLayout {
    fn default_spawn() -> [f32; 3] { [0.0, 2.0, 10.0] }

    fn default_artworks() -> Vec<ArtworkSpec> {
        vec![
            ArtworkSpec::new("artworks/art1.jpg", [-3.0, 2.0, -9.0], 0.0),
            ArtworkSpec::new("artworks/art2.jpg", [3.0, 2.0, -9.0], 0.0),
            // Front wall pieces turn around to face into the room.
            ArtworkSpec::new("artworks/art3.jpg", [-4.0, 2.0, 9.0], PI),
            ArtworkSpec::new("artworks/art4.jpg", [4.0, 2.0, 9.0], PI),
        ]
    }

    fn default_music() -> Vec<String> {
        (1..=3).map(|i| format!("music/track{i}.ogg")).collect()
    }

    #[must_use]
    pub fn bounds(&self) -> RoomBounds {
        RoomBounds::from_size(self.room.width, self.room.depth)
    }

    #[must_use]
    pub fn spawn_point(&self) -> SpawnPoint {
        SpawnPoint(Vec3::from_array(self.spawn))
    }

    /// Check the layout describes a usable room.
    ///
    /// # Errors
    /// Returns the first [`LayoutError`] found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let RoomSize { width, height, depth } = self.room;
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !(positive(width) && positive(height) && positive(depth)) {
            return Err(LayoutError::InvalidRoom { width, height, depth });
        }

        let spawn = self.spawn_point();
        if !self.bounds().contains(spawn.0) {
            return Err(LayoutError::SpawnOutsideRoom { x: spawn.0.x, z: spawn.0.z });
        }

        if let Some(art) = self.artworks.iter().find(|a| !positive(a.size)) {
            return Err(LayoutError::InvalidArtworkSize { file: art.file.clone(), size: art.size });
        }

        if let Some(v) = self.music_volume
            && !(0.0..=1.0).contains(&v)
        {
            return Err(LayoutError::InvalidVolume(v));
        }

        Ok(())
    }
}

impl Default for GalleryLayout {
    fn default() -> Self {
        Self {
            room: RoomSize::default(),
            spawn: Self::default_spawn(),
            artworks: Self::default_artworks(),
            music: Self::default_music(),
            music_volume: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_layout_is_valid() {
        let layout = GalleryLayout::default();
        assert_eq!(layout.validate(), Ok(()));
        assert_eq!(layout.bounds(), RoomBounds { half_width: 15.0, half_depth: 10.0 });
        assert_eq!(layout.spawn_point(), SpawnPoint(Vec3::new(0.0, 2.0, 10.0)));
        assert_eq!(layout.artworks.len(), 4);
        assert_eq!(layout.music.len(), 3);
    }

    #[test]
    fn empty_document_is_the_stock_layout() {
        let layout: GalleryLayout = crate::ron::parse_ron("()").unwrap();
        assert_eq!(layout, GalleryLayout::default());
    }

    #[test]
    fn artwork_size_defaults_when_omitted() {
        let layout: GalleryLayout =
            crate::ron::parse_ron(r#"(artworks: [(file: "a.png", position: (0.0, 2.0, -9.0))])"#).unwrap();
        assert_eq!(layout.artworks[0].size, 3.0);
        assert_eq!(layout.artworks[0].rotation_y, 0.0);
    }

    #[test]
    fn stock_artworks_face_into_the_room() {
        for art in GalleryLayout::default().artworks {
            let to_centre = -Vec3::from_array(art.position).with_y(0.0).normalize();
            assert!(art.facing().dot(to_centre) > 0.0, "{} faces the wall", art.file);
        }
    }

    #[test]
    fn zero_sized_room_is_rejected() {
        let layout = GalleryLayout { room: RoomSize { width: 0.0, height: 10.0, depth: 20.0 }, ..Default::default() };
        assert!(matches!(layout.validate(), Err(LayoutError::InvalidRoom { .. })));
    }

    #[test]
    fn spawn_outside_is_rejected() {
        let layout = GalleryLayout { spawn: [40.0, 2.0, 0.0], ..Default::default() };
        assert_eq!(layout.validate(), Err(LayoutError::SpawnOutsideRoom { x: 40.0, z: 0.0 }));
    }

    #[test]
    fn loud_music_is_rejected() {
        let layout = GalleryLayout { music_volume: Some(1.5), ..Default::default() };
        assert_eq!(layout.validate(), Err(LayoutError::InvalidVolume(1.5)));
    }
}
