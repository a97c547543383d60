//! Single-shot dwell: select what the gaze enters, interact once after a dwell.
use std::time::Duration;

use bevy::prelude::*;

use crate::core::FrameClock;

use super::{
    config::DwellSettings,
    debouncer::DwellDebouncer,
    hit::LatestHit,
    interactive::{InteractContext, InteractionFired, InteractionSource, Interactive},
    selection::GazeSelection,
};

#[derive(Resource, Debug)]
pub struct BaseDwellDetector {
    dwell_time: Duration,
    suppress_while_waiting: bool,
    /// Entity under the last valid hit, for enter/exit edges.
    gazed: Option<Entity>,
    /// Selection value seen on the previous evaluation.
    observed: Option<Entity>,
    selected_since: Duration,
    spent: bool,
}

impl BaseDwellDetector {
    pub fn new(settings: &DwellSettings) -> Self {
        Self {
            dwell_time: settings.base_detector.dwell_time,
            suppress_while_waiting: settings.base_detector.suppress_while_waiting,
            gazed: None,
            observed: None,
            selected_since: Duration::ZERO,
            spent: false,
        }
    }

    /// When the current selection's dwell timer started.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn selected_since(&self) -> Option<Duration> {
        self.observed.map(|_| self.selected_since)
    }

    /// Updates selection from gaze edges and returns the entity to interact with.
    ///
    /// `gazed` is `None` for invalid samples, `Some(None)` for a hit on a
    /// non-interactive entity.
    pub fn evaluate(
        &mut self,
        now: Duration,
        selection: &mut GazeSelection,
        gazed: Option<Option<Entity>>,
        continuous_waiting: bool,
    ) -> Option<Entity> {
        if let Some(interactive) = gazed {
            if interactive != self.gazed {
                self.gazed = interactive;
                match interactive {
                    Some(target) => selection.select(target),
                    None => selection.clear(),
                }
            }
        }

        if selection.current() != self.observed {
            self.observed = selection.current();
            self.selected_since = now;
            self.spent = false;
        }

        let target = self.observed?;
        if self.spent || now.saturating_sub(self.selected_since) < self.dwell_time {
            return None;
        }
        self.spent = true;

        if self.suppress_while_waiting && continuous_waiting {
            debug!("Base dwell on {} suppressed while continuous dwell is pending", target);
            return None;
        }
        Some(target)
    }
}

impl FromWorld for BaseDwellDetector {
    fn from_world(world: &mut World) -> Self {
        let settings = world.get_resource_or_init::<DwellSettings>();
        Self::new(&settings)
    }
}

pub fn run_base_dwell_detector(
    mut detector: ResMut<BaseDwellDetector>,
    mut selection: ResMut<GazeSelection>,
    hit: Res<LatestHit>,
    clock: Res<FrameClock>,
    continuous: Option<Res<DwellDebouncer>>,
    mut targets: Query<&mut Interactive>,
    mut fired: MessageWriter<InteractionFired>,
) {
    let sample = hit.sample();
    let gazed = sample
        .valid
        .then(|| sample.entity.filter(|entity| targets.contains(*entity)));
    let waiting = continuous.is_some_and(|debouncer| debouncer.is_waiting());

    let Some(target) = detector.evaluate(clock.now(), &mut selection, gazed, waiting) else {
        return;
    };
    let Ok(mut interactive) = targets.get_mut(target) else {
        return;
    };

    let ctx = InteractContext {
        target,
        hit_point: sample.point,
        hit_entity: sample.entity,
        source: InteractionSource::BaseDwell,
    };
    interactive.interact(&ctx);
    fired.write(InteractionFired::from(&ctx));
    info!("Base dwell interaction on {} at {:.2?}", target, sample.point);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: f32) -> Duration {
        Duration::from_secs_f32(value)
    }

    fn detector() -> BaseDwellDetector {
        BaseDwellDetector::new(&DwellSettings::default())
    }

    #[test]
    fn gaze_enter_selects_and_fires_once() {
        let target = World::new().spawn_empty().id();
        let mut selection = GazeSelection::default();
        let mut base = detector();

        assert_eq!(base.evaluate(secs(0.0), &mut selection, Some(Some(target)), false), None);
        assert_eq!(selection.current(), Some(target));

        assert_eq!(base.evaluate(secs(1.0), &mut selection, Some(Some(target)), false), None);
        assert_eq!(
            base.evaluate(secs(1.5), &mut selection, Some(Some(target)), false),
            Some(target)
        );
        assert_eq!(base.evaluate(secs(9.0), &mut selection, Some(Some(target)), false), None);
    }

    #[test]
    fn gaze_exit_clears_but_misses_do_not() {
        let target = World::new().spawn_empty().id();
        let mut selection = GazeSelection::default();
        let mut base = detector();

        base.evaluate(secs(0.0), &mut selection, Some(Some(target)), false);
        base.evaluate(secs(0.1), &mut selection, None, false);
        assert_eq!(selection.current(), Some(target));

        base.evaluate(secs(0.2), &mut selection, Some(None), false);
        assert!(selection.is_empty());
        assert_eq!(base.selected_since(), None);
    }

    #[test]
    fn observed_clear_restarts_timer() {
        let target = World::new().spawn_empty().id();
        let mut selection = GazeSelection::default();
        let mut base = detector();

        base.evaluate(secs(0.0), &mut selection, Some(Some(target)), false);
        selection.clear();
        base.evaluate(secs(1.0), &mut selection, Some(Some(target)), false);
        selection.select(target);
        base.evaluate(secs(1.2), &mut selection, Some(Some(target)), false);

        assert_eq!(base.selected_since(), Some(secs(1.2)));
        assert_eq!(base.evaluate(secs(2.0), &mut selection, Some(Some(target)), false), None);
        assert_eq!(
            base.evaluate(secs(2.8), &mut selection, Some(Some(target)), false),
            Some(target)
        );
    }

    #[test]
    fn suppressed_while_continuous_dwell_waits() {
        let target = World::new().spawn_empty().id();
        let mut selection = GazeSelection::default();
        let mut base = detector();

        base.evaluate(secs(0.0), &mut selection, Some(Some(target)), true);
        assert_eq!(base.evaluate(secs(2.0), &mut selection, Some(Some(target)), true), None);
        assert_eq!(base.evaluate(secs(3.0), &mut selection, Some(Some(target)), false), None);
    }
}
