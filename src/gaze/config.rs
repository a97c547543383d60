use std::{fs, path::Path, time::Duration};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/dwell.toml";
const MIN_DISTANCE: f32 = 0.001;
const MIN_SECONDS: f32 = 0.01;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawDwellConfig {
    #[serde(default)]
    debounce: RawDebounce,
    #[serde(default)]
    base_detector: RawBaseDetector,
    #[serde(default)]
    raycast: RawRaycast,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDebounce {
    min_distance_for_new_interaction: f32,
    wait_seconds: f32,
}

impl Default for RawDebounce {
    fn default() -> Self {
        Self {
            min_distance_for_new_interaction: 0.5,
            wait_seconds: 6.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawBaseDetector {
    dwell_seconds: f32,
    suppress_while_waiting: bool,
}

impl Default for RawBaseDetector {
    fn default() -> Self {
        Self {
            dwell_seconds: 1.5,
            suppress_while_waiting: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawRaycast {
    max_distance: f32,
}

impl Default for RawRaycast {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
        }
    }
}

/// Dwell tuning derived from `config/dwell.toml`. Inserted once at startup.
#[derive(Resource, Debug, Clone)]
pub struct DwellSettings {
    pub debounce: DebounceSettings,
    pub base_detector: BaseDetectorSettings,
    pub raycast: RaycastSettings,
}

#[derive(Debug, Clone, Copy)]
pub struct DebounceSettings {
    /// Gaze travel (world units) that counts as a new spot.
    pub min_distance_for_new_interaction: f32,
    /// Dwell required on a new spot before it interacts.
    pub wait_time: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct BaseDetectorSettings {
    pub dwell_time: Duration,
    /// Consume the base timer without firing while a continuous dwell is pending.
    pub suppress_while_waiting: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RaycastSettings {
    pub max_distance: f32,
}

impl DwellSettings {
    pub fn load_or_default() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(raw) => Self::parse(&raw).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                RawDwellConfig::default().into()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    path.display(),
                    err
                );
                RawDwellConfig::default().into()
            }
        }
    }

    fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawDwellConfig>(raw).map(Into::into)
    }

    /// Builds settings in code, applying the same sanitising as the file loader.
    pub fn new(min_distance_for_new_interaction: f32, wait_seconds: f32) -> Self {
        RawDwellConfig {
            debounce: RawDebounce {
                min_distance_for_new_interaction,
                wait_seconds,
            },
            ..Default::default()
        }
        .into()
    }
}

impl Default for DwellSettings {
    fn default() -> Self {
        RawDwellConfig::default().into()
    }
}

impl From<RawDwellConfig> for DwellSettings {
    fn from(value: RawDwellConfig) -> Self {
        Self {
            debounce: DebounceSettings {
                min_distance_for_new_interaction: sanitise(
                    value.debounce.min_distance_for_new_interaction,
                    MIN_DISTANCE,
                ),
                wait_time: Duration::from_secs_f32(sanitise(
                    value.debounce.wait_seconds,
                    MIN_SECONDS,
                )),
            },
            base_detector: BaseDetectorSettings {
                dwell_time: Duration::from_secs_f32(sanitise(
                    value.base_detector.dwell_seconds,
                    MIN_SECONDS,
                )),
                suppress_while_waiting: value.base_detector.suppress_while_waiting,
            },
            raycast: RaycastSettings {
                max_distance: sanitise(value.raycast.max_distance, MIN_DISTANCE),
            },
        }
    }
}

fn sanitise(value: f32, min: f32) -> f32 {
    if value.is_finite() {
        value.max(min)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_tuning() {
        let settings = DwellSettings::default();
        assert_eq!(settings.debounce.min_distance_for_new_interaction, 0.5);
        assert_eq!(settings.debounce.wait_time, Duration::from_secs(6));
        assert!(settings.base_detector.suppress_while_waiting);
    }

    #[test]
    fn partial_file_keeps_defaults_and_clamps() {
        let settings = DwellSettings::parse(
            r#"
            [debounce]
            wait_seconds = -3.0

            [raycast]
            max_distance = 25.0
            "#,
        )
        .expect("valid toml");

        assert_eq!(settings.debounce.min_distance_for_new_interaction, 0.5);
        assert_eq!(
            settings.debounce.wait_time,
            Duration::from_secs_f32(MIN_SECONDS)
        );
        assert_eq!(settings.raycast.max_distance, 25.0);
        assert_eq!(settings.base_detector.dwell_time, Duration::from_secs_f32(1.5));
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let settings = DwellSettings::load_from(Path::new("config/does-not-exist.toml"));
        assert_eq!(settings.debounce.wait_time, Duration::from_secs(6));
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(DwellSettings::parse("[debounce\nwait_seconds = 1").is_err());
    }
}
