//! Systems for the world module.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    math::primitives::Plane3d,
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    gaze::{DwellStatus, GazeCollider, GazeSource, GroundGazeLogger, Interactive, LogInteraction},
    world::components::HeadLook,
};

const GROUND_SCALE: f32 = 40.0;
const HEAD_START_POS: Vec3 = Vec3::new(0.0, 1.7, 8.0);
const CRATE_SIZE: f32 = 1.2;
const LANTERN_RADIUS: f32 = 0.6;
const MARKER_RADIUS: f32 = 0.08;

/// Spawns the ground, a few gaze targets, a light and the head camera.
pub fn spawn_gaze_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(90, 140, 90),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
        GazeCollider::Plane {
            half_size: Vec2::splat(0.5),
        },
        Interactive::new(GroundGazeLogger),
        Name::new("Ground"),
    ));

    let crate_mesh = meshes.add(Cuboid::from_length(CRATE_SIZE));
    let crate_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(150, 110, 70),
        ..default()
    });
    for (index, x) in [-3.0_f32, 3.0].into_iter().enumerate() {
        let label = format!("Crate {}", index + 1);
        commands.spawn((
            Mesh3d(crate_mesh.clone()),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_xyz(x, CRATE_SIZE * 0.5, 0.0),
            GazeCollider::Cuboid {
                half_extents: Vec3::splat(CRATE_SIZE * 0.5),
            },
            Interactive::new(LogInteraction::new(label.clone())),
            Name::new(label),
        ));
    }

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(LANTERN_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.85, 0.4),
            emissive: LinearRgba::rgb(0.8, 0.6, 0.2),
            ..default()
        })),
        Transform::from_xyz(0.0, 2.5, -4.0),
        GazeCollider::Sphere {
            radius: LANTERN_RADIUS,
        },
        Interactive::new(LogInteraction::new("Lantern")),
        Name::new("Lantern"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 15_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let mut head_transform = Transform::from_translation(HEAD_START_POS);
    head_transform.look_at(Vec3::new(0.0, 0.0, 0.0), Vec3::Y);
    let (yaw, pitch) = yaw_pitch_from_transform(&head_transform);

    commands.spawn((
        Camera3d::default(),
        head_transform,
        HeadLook::new(yaw, pitch),
        GazeSource,
        Name::new("Head"),
    ));
}

/// Locks the cursor while the right mouse button steers the head.
pub fn update_cursor_grab(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_options: Single<&mut CursorOptions>,
) {
    if mouse_buttons.just_pressed(MouseButton::Right) {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else if mouse_buttons.just_released(MouseButton::Right) {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Turns the head with the mouse while the right button is held.
pub fn head_mouse_look(
    mut motion_events: MessageReader<MouseMotion>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut query: Query<(&mut HeadLook, &mut Transform)>,
) {
    let cumulative_delta: Vec2 = motion_events.read().map(|ev| ev.delta).sum();

    if !mouse_buttons.pressed(MouseButton::Right) || cumulative_delta == Vec2::ZERO {
        return;
    }

    if let Ok((mut head, mut transform)) = query.single_mut() {
        head.yaw -= cumulative_delta.x * head.look_sensitivity * time.delta_secs();
        head.pitch -= cumulative_delta.y * head.look_sensitivity * time.delta_secs();
        head.pitch = head.pitch.clamp(-1.54, 1.54);

        let rotation =
            Quat::from_axis_angle(Vec3::Y, head.yaw) * Quat::from_axis_angle(Vec3::X, head.pitch);
        transform.rotation = rotation.normalize();
    }
}

/// Walks the head around with WASD on the ground plane.
pub fn head_translate(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&HeadLook, &mut Transform)>,
) {
    let Ok((head, mut transform)) = query.single_mut() else {
        return;
    };

    let flat = |v: Vec3| Vec3::new(v.x, 0.0, v.z).normalize_or_zero();
    let forward = flat(transform.forward().as_vec3());
    let right = flat(transform.right().as_vec3());

    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction += forward;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction -= forward;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction -= right;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += right;
    }

    if direction.length_squared() > 0.0 {
        transform.translation += direction.normalize() * head.move_speed * time.delta_secs();
    }
}

/// Marks the gaze hit and, while waiting, the pending dwell spot.
pub fn draw_gaze_markers(mut gizmos: Gizmos, status: DwellStatus) {
    gizmos.sphere(
        Isometry3d::from_translation(status.current_hit_position()),
        MARKER_RADIUS,
        Color::WHITE,
    );

    if status.is_waiting() {
        gizmos.sphere(
            Isometry3d::from_translation(status.pending_position()),
            MARKER_RADIUS * 2.0,
            Color::srgb(1.0, 0.6, 0.1),
        );
    }
}

fn yaw_pitch_from_transform(transform: &Transform) -> (f32, f32) {
    let (yaw, pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
    (yaw, pitch)
}
