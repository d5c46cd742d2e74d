use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::input::InputSystem;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use gallery::audio::{cycle_music, spawn_music, sync_music_volume};
use gallery::gallery::loader::{load_layout_from_dir, GALLERY_DIR};
use gallery::gallery::{reveal_loaded_artworks, spawn_artworks, spawn_room};
use gallery::input::{
    collect_keyboard_input, spawn_joystick_widget, touch_joystick, touch_look,
    update_joystick_widget, ActiveJoystick, InputState, PointerLock,
};
use gallery::player::{boundary_monitor, camera_look, camera_movement, cursor_grab, player_physics};
use gallery::settings::loader::{self as settings_loader, SETTINGS_DIR};
use gallery::ui::{
    render_room_bounds, setup_debug_overlay, spawn_debug_overlay, spawn_instructions,
    sync_instructions_overlay, toggle_bounds_gizmo, toggle_debug_overlay, update_debug_overlay,
};

mod app;
use app::{setup, sync_camera_fov, sync_tick_rate, sync_vsync_settings};

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Gallery".into(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(LogDiagnosticsPlugin::default());

    // Loaded after the plugins so the log subscriber is already installed.
    let settings = settings_loader::load_settings_from_dir(SETTINGS_DIR);
    let settings_watcher = settings_loader::setup_settings_watcher(SETTINGS_DIR).unwrap_or_else(|e| {
        warn!("settings hot-reload unavailable: {e}");
        settings_loader::SettingsWatcher::stub()
    });
    let layout = load_layout_from_dir(GALLERY_DIR);

    app.insert_resource(Time::<Fixed>::from_hz(settings.movement.effective_tick_rate()));
    app.insert_resource(settings);
    app.insert_resource(settings_watcher);
    app.insert_resource(layout);
    app.insert_resource(InputState::default());
    app.insert_resource(PointerLock::default());
    app.insert_resource(ActiveJoystick::default());

    app.add_systems(
        Startup,
        (
            setup,
            spawn_room,
            spawn_artworks,
            spawn_music,
            spawn_instructions,
            setup_debug_overlay,
            spawn_debug_overlay,
            spawn_joystick_widget,
        ),
    );

    app.add_systems(PreUpdate, (collect_keyboard_input, touch_joystick).after(InputSystem));

    // One tick of the frame loop: move, jump/fall, then recover from escapes.
    app.add_systems(FixedUpdate, (camera_movement, player_physics, boundary_monitor).chain());

    app.add_systems(Update, (cursor_grab, camera_look, sync_instructions_overlay).chain());
    app.add_systems(Update, touch_look);
    app.add_systems(Update, update_joystick_widget);
    app.add_systems(Update, cycle_music);
    app.add_systems(Update, reveal_loaded_artworks);
    app.add_systems(Update, toggle_debug_overlay);
    app.add_systems(Update, toggle_bounds_gizmo);
    app.add_systems(Update, update_debug_overlay);
    app.add_systems(Update, render_room_bounds);
    app.add_systems(Update, settings_loader::check_settings_changes);
    app.add_systems(Update, sync_vsync_settings);
    app.add_systems(Update, sync_camera_fov);
    app.add_systems(Update, sync_tick_rate);
    app.add_systems(Update, sync_music_volume);

    app.run();
}
