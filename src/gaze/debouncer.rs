//! Continuous dwell: turns a stream of gaze hits into rate-limited interactions.
//!
//! The first hit after a selection is confirmed instantly. Moving the gaze at
//! least `min_distance_for_new_interaction` away arms a pending candidate,
//! which interacts once the gaze has stayed near it for `wait_time`. Moving far
//! from the candidate re-arms the timer at the new spot.
use std::time::Duration;

use bevy::{ecs::system::SystemParam, prelude::*};

use crate::core::FrameClock;

use super::{
    base::BaseDwellDetector,
    config::DwellSettings,
    errors::GazeSetupError,
    hit::{HitSample, LatestHit},
    interactive::{InteractContext, InteractionFired, InteractionSource, Interactive},
    reset::SelectionResetProtocol,
    selection::GazeSelection,
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingDwell {
    position: Vec3,
    since: Duration,
}

/// What a single [`DwellDebouncer::tick`] decided.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DwellTick {
    /// A new pending candidate was armed at this position.
    pub armed: Option<Vec3>,
    /// The pending candidate at this position expired and should interact.
    pub executed: Option<Vec3>,
}

#[derive(Resource, Debug)]
pub struct DwellDebouncer {
    min_distance: f32,
    wait_time: Duration,
    confirmed: Option<Vec3>,
    pending: Option<PendingDwell>,
    setup_error: Option<GazeSetupError>,
}

impl DwellDebouncer {
    pub fn new(settings: &DwellSettings) -> Self {
        Self {
            min_distance: settings.debounce.min_distance_for_new_interaction,
            wait_time: settings.debounce.wait_time,
            confirmed: None,
            pending: None,
            setup_error: None,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn confirmed_position(&self) -> Option<Vec3> {
        self.confirmed
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Zero when nothing is pending.
    pub fn pending_position(&self) -> Vec3 {
        self.pending.map_or(Vec3::ZERO, |pending| pending.position)
    }

    pub fn remaining_wait_time(&self, now: Duration) -> Duration {
        self.pending.map_or(Duration::ZERO, |pending| {
            self.wait_time.saturating_sub(now.saturating_sub(pending.since))
        })
    }

    pub fn is_operational(&self) -> bool {
        self.setup_error.is_none()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn setup_error(&self) -> Option<GazeSetupError> {
        self.setup_error
    }

    pub(crate) fn disable(&mut self, error: GazeSetupError) {
        self.reset();
        self.setup_error = Some(error);
    }

    /// Back to idle: no confirmed spot and no pending candidate.
    pub fn reset(&mut self) {
        self.confirmed = None;
        self.pending = None;
    }

    /// One evaluation of the per-tick contract.
    pub fn tick(&mut self, now: Duration, selected: bool, sample: &HitSample) -> DwellTick {
        if !selected {
            self.reset();
            return DwellTick::default();
        }

        let armed = self.handle_continuous_dwell(now, sample);
        let executed = if self.is_expired(now) {
            self.execute_pending_interaction()
        } else {
            None
        };
        DwellTick { armed, executed }
    }

    /// Returns the position of a newly armed candidate, if any.
    pub fn handle_continuous_dwell(&mut self, now: Duration, sample: &HitSample) -> Option<Vec3> {
        if !sample.valid {
            return None;
        }
        let point = sample.point;

        let Some(confirmed) = self.confirmed else {
            self.confirmed = Some(point);
            return None;
        };
        if point.distance(confirmed) < self.min_distance {
            return None;
        }

        let far_from_pending = self
            .pending
            .is_none_or(|pending| point.distance(pending.position) >= self.min_distance);
        if !far_from_pending {
            return None;
        }

        self.set_pending_interaction(point, now);
        Some(point)
    }

    pub fn set_pending_interaction(&mut self, position: Vec3, now: Duration) {
        self.pending = Some(PendingDwell {
            position,
            since: now,
        });
        info!(
            "New gaze position detected at {:.2?}. Waiting {:.1} seconds...",
            position,
            self.wait_time.as_secs_f32()
        );
    }

    fn is_expired(&self, now: Duration) -> bool {
        self.pending
            .is_some_and(|pending| now.saturating_sub(pending.since) >= self.wait_time)
    }

    /// Consumes the pending candidate, promoting it to the confirmed spot.
    ///
    /// Returns the consumed position; `None` (and no change) when nothing is pending.
    pub fn execute_pending_interaction(&mut self) -> Option<Vec3> {
        let pending = self.pending.take()?;
        self.confirmed = Some(pending.position);
        Some(pending.position)
    }
}

impl FromWorld for DwellDebouncer {
    fn from_world(world: &mut World) -> Self {
        let settings = world.get_resource_or_init::<DwellSettings>();
        Self::new(&settings)
    }
}

/// Startup check for the collaborators continuous dwell depends on.
pub fn verify_dwell_collaborators(
    mut debouncer: ResMut<DwellDebouncer>,
    base: Option<Res<BaseDwellDetector>>,
    selection: Option<Res<GazeSelection>>,
) {
    let missing = if selection.is_none() {
        Some(GazeSetupError::MissingSelectionHandle)
    } else if base.is_none() {
        Some(GazeSetupError::MissingBaseDetector)
    } else {
        None
    };

    match missing {
        Some(error) => {
            error!("Continuous dwell disabled: {}", error);
            debouncer.disable(error);
        }
        None => info!(
            "Continuous dwell ready: min distance {:.2}, wait {:.1}s",
            debouncer.min_distance,
            debouncer.wait_time.as_secs_f32()
        ),
    }
}

/// Per-frame continuous dwell evaluation.
pub fn run_dwell_debouncer(
    mut debouncer: ResMut<DwellDebouncer>,
    selection: Option<ResMut<GazeSelection>>,
    mut protocol: ResMut<SelectionResetProtocol>,
    hit: Res<LatestHit>,
    clock: Res<FrameClock>,
    mut targets: Query<&mut Interactive>,
    mut fired: MessageWriter<InteractionFired>,
) {
    if !debouncer.is_operational() {
        return;
    }
    let Some(mut selection) = selection else {
        return;
    };

    let sample = hit.sample();
    let outcome = debouncer.tick(clock.now(), !selection.is_empty(), &sample);

    if outcome.armed.is_some() {
        protocol.begin(&mut selection, clock.frame());
    }

    let Some(position) = outcome.executed else {
        return;
    };

    let target = sample
        .valid
        .then_some(sample.entity)
        .flatten()
        .and_then(|entity| targets.get_mut(entity).ok().map(|target| (entity, target)));

    match target {
        Some((entity, mut interactive)) => {
            let ctx = InteractContext {
                target: entity,
                hit_point: sample.point,
                hit_entity: sample.entity,
                source: InteractionSource::ContinuousDwell,
            };
            interactive.interact(&ctx);
            fired.write(InteractionFired::from(&ctx));
            info!(
                "Continuous dwell interaction executed at {:.2?} on {}",
                position, entity
            );
        }
        None => info!(
            "Continuous dwell confirmed {:.2?} with no interactive target under gaze",
            position
        ),
    }
}

/// Read-only view of the continuous dwell state for HUDs and other systems.
#[derive(SystemParam)]
pub struct DwellStatus<'w> {
    debouncer: Res<'w, DwellDebouncer>,
    hit: Res<'w, LatestHit>,
    clock: Res<'w, FrameClock>,
}

impl DwellStatus<'_> {
    pub fn current_hit_position(&self) -> Vec3 {
        self.hit.sample().point
    }

    pub fn is_waiting(&self) -> bool {
        self.debouncer.is_waiting()
    }

    pub fn remaining_wait_time(&self) -> Duration {
        self.debouncer.remaining_wait_time(self.clock.now())
    }

    pub fn pending_position(&self) -> Vec3 {
        self.debouncer.pending_position()
    }
}
