pub mod audio;
pub mod gallery;
pub mod input;
pub mod player;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod settings;
pub mod ui;
