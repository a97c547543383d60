//! Forward-ray hit sampling from the gaze source.
use bevy::{
    math::bounding::{Aabb3d, BoundingSphere, RayCast3d},
    prelude::*,
};

use super::config::DwellSettings;

/// One tick's hit-test result. `point` keeps the last valid hit on a miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitSample {
    pub point: Vec3,
    pub entity: Option<Entity>,
    pub valid: bool,
}

impl HitSample {
    pub fn hit(point: Vec3, entity: Entity) -> Self {
        Self {
            point,
            entity: Some(entity),
            valid: true,
        }
    }

    pub fn miss(point: Vec3) -> Self {
        Self {
            point,
            entity: None,
            valid: false,
        }
    }
}

impl Default for HitSample {
    fn default() -> Self {
        Self::miss(Vec3::ZERO)
    }
}

/// The most recent gaze hit sample, refreshed every frame in `PreUpdate`.
#[derive(Resource, Debug, Default)]
pub struct LatestHit {
    sample: HitSample,
}

impl LatestHit {
    pub fn sample(&self) -> HitSample {
        self.sample
    }

    pub fn record(&mut self, sample: HitSample) {
        self.sample = sample;
    }

    pub fn record_miss(&mut self) {
        self.sample = HitSample::miss(self.sample.point);
    }
}

/// Marks the entity whose forward ray is the user's gaze (the head camera).
#[derive(Component, Debug, Default)]
pub struct GazeSource;

/// Shape the gaze ray is tested against, placed by the entity's transform.
#[derive(Component, Debug, Clone, Copy)]
pub enum GazeCollider {
    Sphere { radius: f32 },
    /// Axis-aligned; rotation is ignored.
    Cuboid { half_extents: Vec3 },
    /// Local XZ rectangle facing local +Y.
    Plane { half_size: Vec2 },
}

impl GazeCollider {
    /// Distance along `ray` to the first hit within `max_distance`.
    pub fn cast(&self, ray: Ray3d, transform: &GlobalTransform, max_distance: f32) -> Option<f32> {
        let (scale, _, center) = transform.to_scale_rotation_translation();
        match *self {
            Self::Sphere { radius } => {
                let radius = radius * scale.abs().max_element();
                RayCast3d::from_ray(ray, max_distance)
                    .sphere_intersection_at(&BoundingSphere::new(center, radius))
            }
            Self::Cuboid { half_extents } => RayCast3d::from_ray(ray, max_distance)
                .aabb_intersection_at(&Aabb3d::new(center, half_extents * scale.abs())),
            Self::Plane { half_size } => {
                let plane = InfinitePlane3d {
                    normal: transform.up(),
                };
                let distance = ray
                    .intersect_plane(center, plane)
                    .filter(|distance| *distance <= max_distance)?;
                let local = transform
                    .affine()
                    .inverse()
                    .transform_point3(ray.get_point(distance));
                (local.x.abs() <= half_size.x && local.z.abs() <= half_size.y).then_some(distance)
            }
        }
    }
}

/// Casts the gaze ray and stores the nearest hit in [`LatestHit`].
pub fn sample_gaze_hit(
    settings: Res<DwellSettings>,
    sources: Query<&GlobalTransform, With<GazeSource>>,
    colliders: Query<(Entity, &GazeCollider, &GlobalTransform)>,
    mut latest: ResMut<LatestHit>,
) {
    let Ok(source) = sources.single() else {
        latest.record_miss();
        return;
    };

    let ray = Ray3d {
        origin: source.translation(),
        direction: source.forward(),
    };
    let max_distance = settings.raycast.max_distance;

    let nearest = colliders
        .iter()
        .filter_map(|(entity, collider, transform)| {
            collider
                .cast(ray, transform, max_distance)
                .map(|distance| (entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match nearest {
        Some((entity, distance)) => latest.record(HitSample::hit(ray.get_point(distance), entity)),
        None => latest.record_miss(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_ray(x: f32, z: f32) -> Ray3d {
        Ray3d {
            origin: Vec3::new(x, 10.0, z),
            direction: Dir3::NEG_Y,
        }
    }

    #[test]
    fn plane_respects_bounds_and_scale() {
        let ground = GlobalTransform::from(Transform::from_scale(Vec3::splat(10.0)));
        let collider = GazeCollider::Plane {
            half_size: Vec2::splat(0.5),
        };

        let distance = collider
            .cast(down_ray(4.0, -4.0), &ground, 100.0)
            .expect("inside the plane");
        assert!((distance - 10.0).abs() < 1e-4);

        assert!(collider.cast(down_ray(6.0, 0.0), &ground, 100.0).is_none());
        assert!(collider.cast(down_ray(0.0, 0.0), &ground, 5.0).is_none());
    }

    #[test]
    fn sphere_and_cuboid_report_near_surface() {
        let at = GlobalTransform::from(Transform::from_xyz(0.0, 2.0, 0.0));

        let sphere = GazeCollider::Sphere { radius: 1.0 };
        let d = sphere.cast(down_ray(0.0, 0.0), &at, 100.0).expect("hit");
        assert!((d - 7.0).abs() < 1e-4);

        let cuboid = GazeCollider::Cuboid {
            half_extents: Vec3::splat(0.5),
        };
        let d = cuboid.cast(down_ray(0.2, 0.2), &at, 100.0).expect("hit");
        assert!((d - 7.5).abs() < 1e-4);
        assert!(cuboid.cast(down_ray(2.0, 0.0), &at, 100.0).is_none());
    }

    #[test]
    fn miss_keeps_last_point() {
        let target = World::new().spawn_empty().id();
        let mut latest = LatestHit::default();
        latest.record(HitSample::hit(Vec3::X, target));
        latest.record_miss();

        let sample = latest.sample();
        assert!(!sample.valid);
        assert_eq!(sample.entity, None);
        assert_eq!(sample.point, Vec3::X);
    }

    #[test]
    fn sampler_picks_nearest_collider() {
        let mut app = App::new();
        app.insert_resource(DwellSettings::default())
            .init_resource::<LatestHit>()
            .add_systems(Update, sample_gaze_hit);

        app.world_mut().spawn((
            GazeSource,
            GlobalTransform::from(
                Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::Z),
            ),
        ));
        app.world_mut().spawn((
            GazeCollider::Plane {
                half_size: Vec2::splat(50.0),
            },
            GlobalTransform::IDENTITY,
        ));
        let crate_box = app
            .world_mut()
            .spawn((
                GazeCollider::Cuboid {
                    half_extents: Vec3::splat(1.0),
                },
                GlobalTransform::from(Transform::from_xyz(0.0, 1.0, 0.0)),
            ))
            .id();

        app.update();

        let sample = app.world().resource::<LatestHit>().sample();
        assert!(sample.valid);
        assert_eq!(sample.entity, Some(crate_box));
        assert!((sample.point.y - 2.0).abs() < 1e-4);
    }
}
