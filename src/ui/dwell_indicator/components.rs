// src/ui/dwell_indicator/components.rs
//
// Components and resources for the dwell indicator.

use bevy::prelude::*;

use crate::gaze::interactive::InteractionFired;

/// Marker for the indicator's text node.
#[derive(Component, Debug)]
pub struct DwellIndicatorText;

/// Layout of the indicator panel.
#[derive(Resource, Debug, Clone)]
pub struct DwellIndicatorSettings {
    pub top_offset: f32,
    pub left_offset: f32,
    pub padding: f32,
    pub font_size: f32,
}

impl Default for DwellIndicatorSettings {
    fn default() -> Self {
        Self {
            top_offset: 16.0,
            left_offset: 16.0,
            padding: 10.0,
            font_size: 15.0,
        }
    }
}

/// Remembers the most recent interaction so the HUD can keep showing it.
#[derive(Resource, Debug, Default)]
pub struct LastInteraction {
    pub fired: Option<InteractionFired>,
}
