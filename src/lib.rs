//! Eco Runner - endless-runner simulation core for the environmental lessons
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, economy)
//! - `engine`: Session state machine and host-facing input/output surface
//! - `tuning`: Per-difficulty level tables and the eco-fact catalogue
//! - `settings`: Runtime configuration
//! - `highscores`: In-memory leaderboard fed by completed runs
//! - `autopilot`: Attract-mode controller

pub mod autopilot;
pub mod engine;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use autopilot::Autopilot;
pub use engine::{Engine, Presenter};
pub use highscores::HighScores;
pub use settings::{Settings, SettingsError};
pub use tuning::{LevelConfig, LevelKey, TuningError};

/// Game configuration constants
///
/// Units: pixels and seconds. The vertical axis points up, with the ground
/// line at 0.
pub mod consts {
    /// Downward acceleration applied while airborne (px/s²)
    pub const GRAVITY: f32 = -2200.0;
    /// Launch velocity of a jump from the ground (px/s)
    pub const JUMP_FORCE: f32 = 820.0;
    /// Launch velocity of the single mid-air jump (px/s)
    pub const DOUBLE_JUMP_FORCE: f32 = 700.0;

    /// Play field width; entities spawn at this x
    pub const PLAY_FIELD_WIDTH: f32 = 800.0;
    /// Entities whose x falls below this are discarded
    pub const DESPAWN_X: f32 = -60.0;

    /// Player box (fixed horizontal position, left edge)
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 56.0;

    /// Entity box (square)
    pub const ENTITY_SIZE: f32 = 32.0;

    /// Height of an elevated green item
    pub const GREEN_ELEVATED_Y: f32 = 110.0;
    /// Vertical band for shields and facts
    pub const PICKUP_BAND_MIN_Y: f32 = 70.0;
    pub const PICKUP_BAND_MAX_Y: f32 = 170.0;

    /// Carbon level every session starts with
    pub const START_CARBON: f32 = 100.0;
    /// Lives every session starts with
    pub const START_LIVES: u8 = 3;
    /// Carbon drained every tick regardless of collisions
    pub const PASSIVE_DECAY_RATE: f32 = 0.01;

    /// Score lost on an unshielded pollution hit
    pub const POLLUTION_SCORE_PENALTY: u32 = 3;
    /// A combo bonus is granted every this many consecutive greens
    pub const COMBO_STEP: u32 = 3;
    pub const COMBO_BONUS: u32 = 6;

    /// Pixels to displayed meters
    pub const DISTANCE_SCALE: f32 = 0.01;

    /// Default upper bound on a single tick's delta (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
