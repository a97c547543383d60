//! Components used by the world module.
use bevy::prelude::*;

/// Head orientation for the gaze camera, driven by the mouse on desktop.
#[derive(Component)]
pub struct HeadLook {
    pub yaw: f32,
    pub pitch: f32,
    pub move_speed: f32,
    pub look_sensitivity: f32,
}

impl HeadLook {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch,
            move_speed: 6.0,
            look_sensitivity: 0.15,
        }
    }
}
