//! The Interactive capability: anything that can be gazed at and activated.
use std::fmt;

use bevy::prelude::*;

/// Which detector confirmed an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionSource {
    BaseDwell,
    ContinuousDwell,
}

impl fmt::Display for InteractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BaseDwell => "base dwell",
            Self::ContinuousDwell => "continuous dwell",
        };
        write!(f, "{}", label)
    }
}

/// Everything an action learns about the gaze that triggered it.
#[derive(Debug, Clone, Copy)]
pub struct InteractContext {
    pub target: Entity,
    /// Point of the latest hit sample.
    pub hit_point: Vec3,
    /// Entity the latest hit sample landed on, if any.
    pub hit_entity: Option<Entity>,
    pub source: InteractionSource,
}

/// Behaviour run when a gaze interaction is confirmed on its entity.
pub trait InteractAction: Send + Sync + 'static {
    fn interact(&mut self, ctx: &InteractContext);
}

/// Marks an entity as a gaze target and carries its action.
#[derive(Component)]
pub struct Interactive {
    action: Box<dyn InteractAction>,
}

impl Interactive {
    pub fn new(action: impl InteractAction) -> Self {
        Self {
            action: Box::new(action),
        }
    }

    pub fn interact(&mut self, ctx: &InteractContext) {
        self.action.interact(ctx);
    }
}

/// Written after every `Interact()` invocation.
#[derive(Message, Debug, Clone, Copy)]
pub struct InteractionFired {
    pub target: Entity,
    pub point: Vec3,
    pub source: InteractionSource,
}

impl From<&InteractContext> for InteractionFired {
    fn from(ctx: &InteractContext) -> Self {
        Self {
            target: ctx.target,
            point: ctx.hit_point,
            source: ctx.source,
        }
    }
}

/// Logs where on the ground the user is looking.
#[derive(Debug, Default, Clone, Copy)]
pub struct GroundGazeLogger;

impl InteractAction for GroundGazeLogger {
    fn interact(&mut self, ctx: &InteractContext) {
        if ctx.hit_entity != Some(ctx.target) {
            return;
        }
        let p = ctx.hit_point;
        info!(
            "User is looking at ground position: X={:.2}, Y={:.2}, Z={:.2}",
            p.x, p.y, p.z
        );
    }
}

/// Logs a fixed label each time the target is activated.
#[derive(Debug, Clone)]
pub struct LogInteraction {
    label: String,
}

impl LogInteraction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl InteractAction for LogInteraction {
    fn interact(&mut self, ctx: &InteractContext) {
        info!(
            "{} activated by {} at {:.2?}",
            self.label, ctx.source, ctx.hit_point
        );
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Records every context it is invoked with.
    #[derive(Clone, Default)]
    pub struct RecordingAction {
        calls: Arc<Mutex<Vec<InteractContext>>>,
    }

    impl RecordingAction {
        pub fn calls(&self) -> Vec<InteractContext> {
            self.calls.lock().expect("mutex poisoned").clone()
        }
    }

    impl InteractAction for RecordingAction {
        fn interact(&mut self, ctx: &InteractContext) {
            self.calls.lock().expect("mutex poisoned").push(*ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingAction;
    use super::*;

    #[test]
    fn interactive_forwards_to_its_action() {
        let recorder = RecordingAction::default();
        let mut interactive = Interactive::new(recorder.clone());
        let target = World::new().spawn_empty().id();

        let ctx = InteractContext {
            target,
            hit_point: Vec3::new(1.0, 0.0, 2.0),
            hit_entity: Some(target),
            source: InteractionSource::ContinuousDwell,
        };
        interactive.interact(&ctx);

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].target, target);

        let fired = InteractionFired::from(&ctx);
        assert_eq!(fired.point, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(fired.source.to_string(), "continuous dwell");
    }
}
