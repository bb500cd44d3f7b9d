//! Data-driven game balance
//!
//! Immutable per-difficulty tables. The key set is closed, so lookups by
//! [`LevelKey`] cannot fail; only parsing a key from text can.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while resolving tuning data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuningError {
    #[error("unknown level key: {0:?} (expected easy, medium or hard)")]
    UnknownLevel(String),
}

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelKey {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl LevelKey {
    pub const ALL: [LevelKey; 3] = [LevelKey::Easy, LevelKey::Medium, LevelKey::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelKey::Easy => "easy",
            LevelKey::Medium => "medium",
            LevelKey::Hard => "hard",
        }
    }

    /// Tuning table for this tier
    pub fn config(self) -> &'static LevelConfig {
        lookup(self)
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelKey {
    type Err = TuningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(LevelKey::Easy),
            "medium" | "med" => Ok(LevelKey::Medium),
            "hard" => Ok(LevelKey::Hard),
            _ => Err(TuningError::UnknownLevel(s.to_string())),
        }
    }
}

/// Spawn weights, evaluated cumulatively in the order shield, green, fact.
/// Whatever probability mass is left over becomes pollution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWeights {
    pub shield_chance: f32,
    pub green_chance: f32,
    pub fact_chance: f32,
}

/// Balance table for one difficulty tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub key: LevelKey,
    /// Scroll speed (px/s)
    pub speed: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    pub weights: SpawnWeights,
    /// Carbon level at which the run is lost
    pub max_carbon: f32,
    /// Carbon added by an unshielded pollution hit
    pub pollution_hit: f32,
    /// Score for a green pickup
    pub green_reward: u32,
    /// Carbon removed by a green pickup
    pub green_carbon_cut: f32,
    pub distance_multiplier: f32,
}

static EASY: LevelConfig = LevelConfig {
    key: LevelKey::Easy,
    speed: 250.0,
    spawn_interval: 1.6,
    weights: SpawnWeights {
        shield_chance: 0.08,
        green_chance: 0.42,
        fact_chance: 0.10,
    },
    max_carbon: 170.0,
    pollution_hit: 10.0,
    green_reward: 10,
    green_carbon_cut: 8.0,
    distance_multiplier: 1.0,
};

static MEDIUM: LevelConfig = LevelConfig {
    key: LevelKey::Medium,
    speed: 320.0,
    spawn_interval: 1.25,
    weights: SpawnWeights {
        shield_chance: 0.06,
        green_chance: 0.36,
        fact_chance: 0.08,
    },
    max_carbon: 150.0,
    pollution_hit: 15.0,
    green_reward: 12,
    green_carbon_cut: 6.0,
    distance_multiplier: 1.25,
};

static HARD: LevelConfig = LevelConfig {
    key: LevelKey::Hard,
    speed: 400.0,
    spawn_interval: 0.95,
    weights: SpawnWeights {
        shield_chance: 0.05,
        green_chance: 0.30,
        fact_chance: 0.06,
    },
    max_carbon: 135.0,
    pollution_hit: 20.0,
    green_reward: 15,
    green_carbon_cut: 5.0,
    distance_multiplier: 1.5,
};

/// Look up the tuning table for a tier
pub fn lookup(key: LevelKey) -> &'static LevelConfig {
    match key {
        LevelKey::Easy => &EASY,
        LevelKey::Medium => &MEDIUM,
        LevelKey::Hard => &HARD,
    }
}

/// Facts shown when a fact item is collected, cycled in order
pub const ECO_FACTS: &[&str] = &[
    "A single mature tree can absorb around 22 kg of CO2 a year.",
    "Recycling one aluminium can saves enough energy to run a TV for three hours.",
    "Transport is responsible for roughly a quarter of energy-related CO2 emissions.",
    "Wetlands store more carbon per hectare than most forests.",
    "Switching off standby devices can cut household electricity use by 10%.",
    "Composting food scraps keeps methane out of landfills.",
    "Oceans absorb about a quarter of the CO2 humans emit.",
    "Cycling 10 km instead of driving saves about 2 kg of CO2.",
];

/// Fact for the n-th unlock (wraps around the catalogue)
pub fn fact_text(index: usize) -> &'static str {
    ECO_FACTS[index % ECO_FACTS.len()]
}
