//! Core timing shared by every gaze system.
pub mod plugin;

pub use plugin::{CorePlugin, FrameClock};
