use bevy::{log::LogPlugin, prelude::*};

mod core;
mod gaze;
mod ui;
mod world;

use crate::{
    core::CorePlugin,
    gaze::{BaseDwellPlugin, DwellDebouncerPlugin, DwellSettings, GazeInputPlugin},
    ui::UiPlugin,
    world::WorldPlugin,
};

const LOG_FILTER: &str = "info,wgpu=error,naga=warn,gazedwell=debug";

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    }));

    // Loaded after LogPlugin so config warnings reach the log.
    app.insert_resource(DwellSettings::load_or_default())
        .add_plugins((
            CorePlugin,
            GazeInputPlugin,
            BaseDwellPlugin,
            DwellDebouncerPlugin,
            WorldPlugin,
            UiPlugin, // After the gaze plugins so GazeSystems ordering exists
        ))
        .run();
}
