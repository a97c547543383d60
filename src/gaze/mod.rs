//! Gaze interaction: hit sampling, the shared selection, the base single-shot
//! dwell detector and the continuous dwell debouncer layered on top of it.
pub mod base;
pub mod config;
pub mod debouncer;
pub mod errors;
pub mod hit;
pub mod interactive;
pub mod plugin;
pub mod reset;
pub mod selection;

pub use config::DwellSettings;
pub use debouncer::{DwellDebouncer, DwellStatus};
pub use hit::{GazeCollider, GazeSource};
pub use interactive::{GroundGazeLogger, Interactive, LogInteraction};
pub use plugin::{BaseDwellPlugin, DwellDebouncerPlugin, GazeInputPlugin};
pub use selection::GazeSelection;
