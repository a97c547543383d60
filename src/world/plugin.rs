//! WorldPlugin spawns the gaze scene and drives the head-look camera.
use bevy::prelude::*;

use crate::world::systems::{
    draw_gaze_markers, head_mouse_look, head_translate, spawn_gaze_scene, update_cursor_grab,
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_gaze_scene).add_systems(
            Update,
            (
                (
                    update_cursor_grab,
                    head_mouse_look.after(update_cursor_grab),
                    head_translate,
                ),
                draw_gaze_markers,
            ),
        );
    }
}
