// src/ui/dwell_indicator/plugin.rs
//
// UiPlugin registers the dwell indicator.

use bevy::prelude::*;

use crate::gaze::plugin::GazeSystems;

use super::components::{DwellIndicatorSettings, LastInteraction};
use super::systems::{record_last_interaction, spawn_dwell_indicator, update_dwell_indicator};

/// HUD readout of the gaze dwell state.
///
/// # Dependencies
///
/// - `GazeInputPlugin` and `DwellDebouncerPlugin` must be registered (they
///   provide the selection, hit sample, debouncer and `InteractionFired`).
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.init_resource::<DwellIndicatorSettings>()
            .init_resource::<LastInteraction>()
            .add_systems(Startup, spawn_dwell_indicator)
            .add_systems(
                Update,
                (record_last_interaction, update_dwell_indicator)
                    .chain()
                    .after(GazeSystems::BaseDwell),
            );
    }
}
