//! Feedback tuning and preferences
//!
//! Loaded from a JSON file named by `SLIDE_BLOCKS_SETTINGS`, defaults otherwise.

use serde::{Deserialize, Serialize};

use crate::consts::{self, ticks};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Drag feedback timings and preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// World units per grid cell (pointer to cell mapping)
    pub cell_size: f32,

    // === Phase durations (ms) ===
    /// Intent shake in Begin before the slide is tested
    pub begin_shake_ms: f32,
    /// Nudge toward the target cell while the move is tested
    pub slide_test_ms: f32,
    /// Per-segment duration of the passing slide
    pub slide_pass_ms: f32,
    /// Rejection shake and spring-back
    pub slide_fail_ms: f32,

    // === Offsets ===
    /// Offset clamp while testing or rejecting
    pub test_clamp: f32,
    /// Offset clamp while passing
    pub pass_clamp: f32,

    // === Shake ===
    pub begin_shake_bias: f32,
    pub fail_shake_amplitude: f32,
    /// Oscillation speed (radians per ms)
    pub shake_speed: f32,
    /// Shake feedback on drag intent and rejection
    pub shake_feedback: bool,

    // === Accessibility ===
    /// Reduced motion (mutes shake in the render sample)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_size: consts::CELL_SIZE,

            begin_shake_ms: ticks::THREE,
            slide_test_ms: ticks::FIVE,
            slide_pass_ms: ticks::FIVE,
            slide_fail_ms: ticks::SIXTH,

            test_clamp: consts::TEST_CLAMP,
            pass_clamp: consts::PASS_CLAMP,

            begin_shake_bias: consts::BEGIN_SHAKE_BIAS,
            fail_shake_amplitude: consts::FAIL_SHAKE_AMPLITUDE,
            shake_speed: 1.0,
            shake_feedback: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    const PATH_VAR: &'static str = "SLIDE_BLOCKS_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Scale applied to shake samples handed to rendering
    pub fn effective_shake_scale(&self) -> f32 {
        if self.shake_feedback && !self.reduced_motion {
            1.0
        } else {
            0.0
        }
    }

    /// Load settings from the file named by `SLIDE_BLOCKS_SETTINGS`
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::PATH_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "reduced_motion": true, "slide_fail_ms": 250.0 }"#).unwrap();
        assert!(settings.reduced_motion);
        assert_eq!(settings.slide_fail_ms, 250.0);
        assert_eq!(settings.cell_size, consts::CELL_SIZE);
        assert_eq!(settings.effective_shake_scale(), 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            shake_feedback: false,
            ..Default::default()
        };
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(Settings::from_json("{ nope"), Err(SettingsError::Parse(_))));
    }
}
