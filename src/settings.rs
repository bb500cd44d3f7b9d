//! Runtime settings
//!
//! Read from a JSON file by the host; every field has a default so partial
//! files are fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_FRAME_DT;
use crate::tuning::LevelKey;

/// Environment variable the binary reads the settings path from
pub const SETTINGS_ENV: &str = "ECO_RUNNER_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Host settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty to start with
    pub level: LevelKey,
    /// Fixed RNG seed; None lets the host pick one
    pub seed: Option<u64>,
    /// Upper bound on a single tick's delta (seconds)
    pub max_frame_dt: f32,
    /// Let the autopilot play
    pub autopilot: bool,
    /// Synthetic frame period for the headless host (ms)
    pub frame_ms: f64,
    /// Stop the headless host after this many frames
    pub max_frames: u64,
    /// Print every n-th frame
    pub print_every: u64,
    /// Runs to play back to back (restarting in between)
    pub runs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LevelKey::Easy,
            seed: None,
            max_frame_dt: MAX_FRAME_DT,
            autopilot: true,
            frame_ms: 16.0,
            max_frames: 60 * 60 * 5,
            print_every: 30,
            runs: 3,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load from the path in `ECO_RUNNER_SETTINGS`, or defaults when unset
    pub fn from_env() -> Result<Self, SettingsError> {
        match std::env::var_os(SETTINGS_ENV) {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
