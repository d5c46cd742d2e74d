pub mod display;
pub mod setup;
pub mod timing;

pub use display::{sync_camera_fov, sync_vsync_settings};
pub use setup::setup;
pub use timing::sync_tick_rate;
