//! Error types surfaced while wiring the gaze controllers.
use std::fmt;

/// A collaborator the continuous dwell controller cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GazeSetupError {
    MissingBaseDetector,
    MissingSelectionHandle,
}

impl fmt::Display for GazeSetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBaseDetector => write!(
                f,
                "continuous dwell requires the base dwell detector (add BaseDwellPlugin)"
            ),
            Self::MissingSelectionHandle => write!(
                f,
                "continuous dwell requires the shared gaze selection (add GazeInputPlugin)"
            ),
        }
    }
}

impl std::error::Error for GazeSetupError {}
