//! CorePlugin wires the frame clock every dwell timer and deferred step reads from.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Monotonic gaze time plus the index of the frame currently being evaluated.
///
/// `elapsed` is the timestamp handed to dwell timers; `frame` marks scheduling
/// boundaries for deferred work.
#[derive(Resource, Debug, Default)]
pub struct FrameClock {
    last_delta: Duration,
    elapsed: Duration,
    frame: u64,
}

impl FrameClock {
    /// Delta applied by the most recent tick.
    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn last_delta(&self) -> Duration {
        self.last_delta
    }

    /// Time since the clock was created. Never decreases.
    pub fn now(&self) -> Duration {
        self.elapsed
    }

    /// Number of completed ticks; the frame currently running.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advances to the next frame.
    pub fn tick(&mut self, delta: Duration) {
        self.last_delta = delta;
        self.elapsed += delta;
        self.frame = self.frame.saturating_add(1);
    }
}

/// Registers the frame clock and advances it at the start of every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameClock>()
            .add_systems(First, advance_frame_clock);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_clock_ticks);
        }
    }
}

fn advance_frame_clock(mut clock: ResMut<FrameClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

#[cfg(feature = "core_debug")]
fn log_clock_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<FrameClock>) {
    if timer.timer.tick(clock.last_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Gaze clock: {:.2}s | frame {} | dt: {:.4}s",
            clock.now().as_secs_f32(),
            clock.frame(),
            clock.last_delta().as_secs_f32(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_advances_time_and_frame() {
        let mut clock = FrameClock::default();
        clock.tick(Duration::from_millis(500));
        clock.tick(Duration::from_millis(250));

        assert_eq!(clock.frame(), 2);
        assert_eq!(clock.now(), Duration::from_millis(750));
        assert_eq!(clock.last_delta(), Duration::from_millis(250));
    }

    #[test]
    fn plugin_ticks_clock_each_frame() {
        let mut app = App::new();
        app.init_resource::<Time>().add_plugins(CorePlugin);

        app.update();
        app.update();

        let clock = app.world().resource::<FrameClock>();
        assert_eq!(clock.frame(), 2);
        assert_eq!(clock.now(), Duration::ZERO);
    }
}
