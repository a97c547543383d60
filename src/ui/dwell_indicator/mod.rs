// src/ui/dwell_indicator/mod.rs
//
// Dwell indicator showing selection, waiting state and the last interaction.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::UiPlugin;
