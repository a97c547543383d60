//! Plugins wiring gaze sampling, the base dwell detector and continuous dwell.
use bevy::prelude::*;

use crate::core::FrameClock;

use super::{
    base::{run_base_dwell_detector, BaseDwellDetector},
    config::DwellSettings,
    debouncer::{run_dwell_debouncer, verify_dwell_collaborators, DwellDebouncer},
    hit::{sample_gaze_hit, LatestHit},
    interactive::InteractionFired,
    reset::{restore_reset_selection, SelectionResetProtocol},
    selection::GazeSelection,
};

/// Ordering of gaze work within a frame.
///
/// Sampling happens in `PreUpdate`. In `Update` continuous dwell runs before
/// the base detector so a selection cleared by a reset is observed the same
/// frame; the deferred restore runs in `Last`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GazeSystems {
    Sample,
    ContinuousDwell,
    BaseDwell,
    RestoreSelection,
}

fn configure_gaze_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (GazeSystems::ContinuousDwell, GazeSystems::BaseDwell).chain(),
    );
}

fn ensure_settings(app: &mut App) {
    if app.world().contains_resource::<DwellSettings>() {
        return;
    }
    app.insert_resource(DwellSettings::load_or_default());
}

fn log_dwell_settings(settings: Res<DwellSettings>) {
    info!(
        "Dwell configured: min distance {:.2}, wait {:.1}s, base dwell {:.1}s, ray {:.0}",
        settings.debounce.min_distance_for_new_interaction,
        settings.debounce.wait_time.as_secs_f32(),
        settings.base_detector.dwell_time.as_secs_f32(),
        settings.raycast.max_distance
    );
}

/// Hit sampling and the shared selection handle.
pub struct GazeInputPlugin;

impl Plugin for GazeInputPlugin {
    fn build(&self, app: &mut App) {
        ensure_settings(app);
        configure_gaze_sets(app);

        app.init_resource::<GazeSelection>()
            .init_resource::<LatestHit>()
            .add_message::<InteractionFired>()
            .add_systems(Startup, log_dwell_settings)
            .add_systems(PreUpdate, sample_gaze_hit.in_set(GazeSystems::Sample));
    }
}

/// The single-shot detector: gaze enter selects, dwell interacts once.
pub struct BaseDwellPlugin;

impl Plugin for BaseDwellPlugin {
    fn build(&self, app: &mut App) {
        ensure_settings(app);
        configure_gaze_sets(app);

        app.init_resource::<FrameClock>()
            .init_resource::<GazeSelection>()
            .init_resource::<LatestHit>()
            .init_resource::<BaseDwellDetector>()
            .add_message::<InteractionFired>()
            .add_systems(
                Update,
                run_base_dwell_detector.in_set(GazeSystems::BaseDwell),
            );
    }
}

/// Continuous dwell on top of the base detector.
pub struct DwellDebouncerPlugin;

impl Plugin for DwellDebouncerPlugin {
    fn build(&self, app: &mut App) {
        ensure_settings(app);
        configure_gaze_sets(app);

        app.init_resource::<FrameClock>()
            .init_resource::<LatestHit>()
            .init_resource::<DwellDebouncer>()
            .init_resource::<SelectionResetProtocol>()
            .add_message::<InteractionFired>()
            .add_systems(Startup, verify_dwell_collaborators)
            .add_systems(
                Update,
                run_dwell_debouncer.in_set(GazeSystems::ContinuousDwell),
            )
            .add_systems(
                Last,
                restore_reset_selection.in_set(GazeSystems::RestoreSelection),
            );
    }
}
