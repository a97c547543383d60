// src/ui/dwell_indicator/systems.rs
//
// Systems spawning and refreshing the dwell indicator.

use bevy::{ecs::message::MessageReader, prelude::*};

use crate::gaze::{interactive::InteractionFired, DwellStatus, GazeSelection};

use super::components::{DwellIndicatorSettings, DwellIndicatorText, LastInteraction};

const BACKGROUND_COLOR: Color = Color::srgba(0.08, 0.08, 0.1, 0.85);
const BORDER_COLOR: Color = Color::srgb(0.3, 0.3, 0.32);
const WAITING_COLOR: Color = Color::srgb(1.0, 0.75, 0.3);
const IDLE_COLOR: Color = Color::WHITE;

pub fn spawn_dwell_indicator(mut commands: Commands, settings: Res<DwellIndicatorSettings>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(settings.top_offset),
                left: Val::Px(settings.left_offset),
                padding: UiRect::all(Val::Px(settings.padding)),
                border: UiRect::all(Val::Px(1.5)),
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
            BorderColor::from(BORDER_COLOR),
            Name::new("Dwell Indicator"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Gaze: idle"),
                TextFont {
                    font_size: settings.font_size,
                    ..default()
                },
                TextColor(IDLE_COLOR),
                DwellIndicatorText,
            ));
        });
}

pub fn record_last_interaction(
    mut last: ResMut<LastInteraction>,
    mut fired: MessageReader<InteractionFired>,
) {
    if let Some(event) = fired.read().last() {
        last.fired = Some(*event);
    }
}

pub fn update_dwell_indicator(
    status: DwellStatus,
    selection: Res<GazeSelection>,
    last: Res<LastInteraction>,
    names: Query<&Name>,
    mut text_query: Query<(&mut Text, &mut TextColor), With<DwellIndicatorText>>,
) {
    let Ok((mut text, mut color)) = text_query.single_mut() else {
        return;
    };

    let label = |entity: Entity| {
        names
            .get(entity)
            .map(|name| name.as_str().to_owned())
            .unwrap_or_else(|_| entity.to_string())
    };

    let selected = selection
        .current()
        .map(&label)
        .unwrap_or_else(|| "nothing".to_owned());
    let hit = status.current_hit_position();

    let mut lines = vec![
        format!("Selected: {}", selected),
        format!("Gaze: ({:.2}, {:.2}, {:.2})", hit.x, hit.y, hit.z),
    ];

    if status.is_waiting() {
        let pending = status.pending_position();
        lines.push(format!(
            "Waiting {:.1}s at ({:.2}, {:.2}, {:.2})",
            status.remaining_wait_time().as_secs_f32(),
            pending.x,
            pending.y,
            pending.z
        ));
        color.0 = WAITING_COLOR;
    } else {
        color.0 = IDLE_COLOR;
    }

    if let Some(fired) = last.fired {
        lines.push(format!("Last: {} via {}", label(fired.target), fired.source));
    }

    text.0 = lines.join("\n");
}
