// src/ui/mod.rs
//
// UI module providing screen-space HUD elements.
//
// Current features:
// - Dwell indicator (top-left readout of the gaze dwell state)

pub mod dwell_indicator;

// Re-export the main plugin
pub use dwell_indicator::UiPlugin;
