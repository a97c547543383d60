//! Demo scene: gaze targets on a ground plane and a head-look camera.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
