//! Loading the gallery layout from `data/gallery`.
use bevy::log::{info, warn};

use crate::gallery::GalleryLayout;
use crate::ron_loader::load_ron_files;

pub const GALLERY_DIR: &str = "data/gallery";

/// First valid layout in `path` (by file name), else the stock layout.
/// Layouts that fail validation are reported and skipped.
#[must_use]
pub fn load_layout_from_dir(path: &str) -> GalleryLayout {
    pick_layout(load_ron_files::<GalleryLayout>(path))
}

fn pick_layout(candidates: Vec<GalleryLayout>) -> GalleryLayout {
    for layout in candidates {
        match layout.validate() {
            Ok(()) => {
                info!(
                    "gallery layout: {} artworks, {} tracks",
                    layout.artworks.len(),
                    layout.music.len()
                );
                return layout;
            }
            Err(e) => warn!("ignoring gallery layout: {e}"),
        }
    }
    GalleryLayout::default()
}
