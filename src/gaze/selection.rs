//! The shared "currently selected target" handle.
use bevy::prelude::*;

/// At most one selected Interactive target, shared by both dwell detectors.
///
/// Every write bumps `revision`, even one that leaves the value unchanged, so
/// deferred work can tell whether anyone touched the handle since it last looked.
#[derive(Resource, Debug, Default)]
pub struct GazeSelection {
    current: Option<Entity>,
    revision: u64,
}

impl GazeSelection {
    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn select(&mut self, target: Entity) {
        self.set(Some(target));
    }

    pub fn clear(&mut self) {
        self.set(None);
    }

    fn set(&mut self, value: Option<Entity>) {
        self.current = value;
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_write_moves_revision() {
        let target = World::new().spawn_empty().id();
        let mut selection = GazeSelection::default();

        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.revision(), 1);

        selection.select(target);
        selection.select(target);
        assert_eq!(selection.current(), Some(target));
        assert_eq!(selection.revision(), 3);

        selection.clear();
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.revision(), 5);
    }
}
