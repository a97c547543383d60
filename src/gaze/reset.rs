//! Clear-then-restore of the shared selection, used to restart the base
//! detector's dwell timer whenever a new continuous-dwell candidate is armed.
//!
//! The clear happens immediately; the restore is deferred to the `Last`
//! schedule so every `Update` consumer observes the empty handle first. A newer
//! reset supersedes (cancels) an older one that has not restored yet.
use bevy::prelude::*;

use crate::core::FrameClock;

use super::{interactive::Interactive, selection::GazeSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRestore {
    pub generation: u64,
    pub target: Entity,
    pub armed_frame: u64,
    /// Selection revision right after the clear.
    revision: u64,
}

/// Result of attempting a deferred restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored(Entity),
    /// The captured target was despawned or stopped being Interactive.
    TargetGone(Entity),
    /// Someone else wrote the selection after the clear.
    SelectionChanged,
}

#[derive(Resource, Debug, Default)]
pub struct SelectionResetProtocol {
    generation: u64,
    in_flight: Option<PendingRestore>,
}

impl SelectionResetProtocol {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn in_flight(&self) -> Option<PendingRestore> {
        self.in_flight
    }

    /// Captures and clears the selection, arming a restore for the end of `frame`.
    ///
    /// Returns the new generation, or `None` when there was nothing to capture.
    pub fn begin(&mut self, selection: &mut GazeSelection, frame: u64) -> Option<u64> {
        let superseded = self
            .in_flight
            .take()
            .filter(|restore| restore.revision == selection.revision())
            .map(|restore| restore.target);
        let target = selection.current().or(superseded)?;

        selection.clear();
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = Some(PendingRestore {
            generation: self.generation,
            target,
            armed_frame: frame,
            revision: selection.revision(),
        });
        Some(self.generation)
    }

    /// Takes the in-flight restore if it was armed on or before `frame`.
    pub fn take_due(&mut self, frame: u64) -> Option<PendingRestore> {
        match self.in_flight {
            Some(restore) if restore.armed_frame <= frame => self.in_flight.take(),
            _ => None,
        }
    }

    /// Drops any in-flight restore without touching the selection.
    pub fn cancel(&mut self) {
        self.in_flight = None;
    }

    pub fn complete(
        restore: PendingRestore,
        selection: &mut GazeSelection,
        target_alive: bool,
    ) -> RestoreOutcome {
        if selection.revision() != restore.revision {
            return RestoreOutcome::SelectionChanged;
        }
        if !target_alive {
            return RestoreOutcome::TargetGone(restore.target);
        }
        selection.select(restore.target);
        RestoreOutcome::Restored(restore.target)
    }
}

/// Runs in `Last`: restores the selection captured by the latest reset.
pub fn restore_reset_selection(
    mut protocol: ResMut<SelectionResetProtocol>,
    selection: Option<ResMut<GazeSelection>>,
    clock: Res<FrameClock>,
    targets: Query<(), With<Interactive>>,
) {
    let Some(mut selection) = selection else {
        protocol.cancel();
        return;
    };
    let Some(restore) = protocol.take_due(clock.frame()) else {
        return;
    };

    let alive = targets.contains(restore.target);
    match SelectionResetProtocol::complete(restore, &mut selection, alive) {
        RestoreOutcome::Restored(target) => {
            debug!(
                "Base selection reset for new position (generation {}, target {})",
                restore.generation, target
            );
        }
        RestoreOutcome::TargetGone(target) => {
            debug!(
                "Skipping selection restore: target {} is gone (generation {})",
                target, restore.generation
            );
        }
        RestoreOutcome::SelectionChanged => {
            debug!(
                "Skipping selection restore: selection changed externally (generation {})",
                restore.generation
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_targets() -> (Entity, Entity) {
        let mut world = World::new();
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    #[test]
    fn begin_clears_and_complete_restores() {
        let (target, _) = two_targets();
        let mut selection = GazeSelection::default();
        selection.select(target);
        let mut protocol = SelectionResetProtocol::default();

        assert_eq!(protocol.begin(&mut selection, 4), Some(1));
        assert!(selection.is_empty());

        assert!(protocol.take_due(3).is_none());
        let restore = protocol.take_due(4).expect("armed this frame");
        assert_eq!(
            SelectionResetProtocol::complete(restore, &mut selection, true),
            RestoreOutcome::Restored(target)
        );
        assert_eq!(selection.current(), Some(target));
        assert!(protocol.in_flight().is_none());
    }

    #[test]
    fn nothing_selected_is_a_no_op() {
        let mut selection = GazeSelection::default();
        let mut protocol = SelectionResetProtocol::default();

        assert_eq!(protocol.begin(&mut selection, 1), None);
        assert_eq!(protocol.generation(), 0);
        assert_eq!(selection.revision(), 0);
    }

    #[test]
    fn superseding_reset_keeps_original_target() {
        let (target, _) = two_targets();
        let mut selection = GazeSelection::default();
        selection.select(target);
        let mut protocol = SelectionResetProtocol::default();

        protocol.begin(&mut selection, 1);
        assert_eq!(protocol.begin(&mut selection, 1), Some(2));

        let restore = protocol.in_flight().expect("in flight");
        assert_eq!(restore.generation, 2);
        assert_eq!(restore.target, target);
    }

    #[test]
    fn dead_target_is_not_restored() {
        let (target, _) = two_targets();
        let mut selection = GazeSelection::default();
        selection.select(target);
        let mut protocol = SelectionResetProtocol::default();
        protocol.begin(&mut selection, 1);

        let restore = protocol.take_due(1).expect("due");
        assert_eq!(
            SelectionResetProtocol::complete(restore, &mut selection, false),
            RestoreOutcome::TargetGone(target)
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn deselect_while_cleared_cancels_restore() {
        let (target, _) = two_targets();
        let mut selection = GazeSelection::default();
        selection.select(target);
        let mut protocol = SelectionResetProtocol::default();
        protocol.begin(&mut selection, 1);

        selection.clear();
        let restore = protocol.take_due(1).expect("due");
        assert_eq!(
            SelectionResetProtocol::complete(restore, &mut selection, true),
            RestoreOutcome::SelectionChanged
        );
        assert!(selection.is_empty());
    }

    #[test]
    fn external_write_wins_over_restore() {
        let (target, other) = two_targets();
        let mut selection = GazeSelection::default();
        selection.select(target);
        let mut protocol = SelectionResetProtocol::default();
        protocol.begin(&mut selection, 1);

        selection.select(other);
        let restore = protocol.take_due(1).expect("due");
        assert_eq!(
            SelectionResetProtocol::complete(restore, &mut selection, true),
            RestoreOutcome::SelectionChanged
        );
        assert_eq!(selection.current(), Some(other));
    }
}
