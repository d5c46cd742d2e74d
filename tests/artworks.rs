//! Artwork panels against a real `AssetServer`: shown once the image is in,
//! removed when it cannot be loaded.

use bevy::asset::{AssetPlugin, LoadState};
use bevy::prelude::*;
use std::time::Duration;

use gallery::gallery::{reveal_loaded_artworks, Artwork, PendingArtwork};

fn gallery_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .init_asset::<Image>()
        .add_systems(Update, reveal_loaded_artworks);
    app
}

fn spawn_panel(app: &mut App, file: &str, image: Handle<Image>) -> Entity {
    app.world_mut()
        .spawn((Artwork { file: file.to_string() }, PendingArtwork(image), Visibility::Hidden))
        .id()
}

/// Run frames until the image has either loaded or failed.
fn settle(app: &mut App, image: &Handle<Image>) -> LoadState {
    for _ in 0..400 {
        app.update();
        let state = app.world().resource::<AssetServer>().get_load_state(image.id());
        if let Some(state @ (LoadState::Loaded | LoadState::Failed(_))) = state {
            app.update();
            return state;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("image never finished loading");
}

#[test]
fn loaded_artwork_becomes_visible() {
    let mut app = gallery_app();
    let image = app.world().resource::<AssetServer>().add(Image::default());
    let panel = spawn_panel(&mut app, "artworks/in-memory.png", image.clone());

    assert!(matches!(settle(&mut app, &image), LoadState::Loaded));
    assert_eq!(app.world().get::<Visibility>(panel), Some(&Visibility::Inherited));
    assert!(app.world().get::<PendingArtwork>(panel).is_none());
    assert!(app.world().get::<Artwork>(panel).is_some());
}

#[test]
fn missing_artwork_is_despawned() {
    let mut app = gallery_app();
    let image: Handle<Image> = app.world().resource::<AssetServer>().load("artworks/does-not-exist.png");
    let panel = spawn_panel(&mut app, "artworks/does-not-exist.png", image.clone());

    assert!(matches!(settle(&mut app, &image), LoadState::Failed(_)));
    assert!(app.world().get_entity(panel).is_none());
}

#[test]
fn unresolved_panel_stays_hidden() {
    let mut app = gallery_app();
    let image: Handle<Image> = Handle::default();
    let panel = spawn_panel(&mut app, "artworks/placeholder.png", image);

    app.update();
    assert_eq!(app.world().get::<Visibility>(panel), Some(&Visibility::Hidden));
    assert!(app.world().get::<PendingArtwork>(panel).is_some());
}
