//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (passed in by the caller)
//! - Stable iteration order (entities in spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod economy;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::GameClock;
pub use collision::{Aabb, entity_aabb, player_aabb};
pub use physics::{JumpOutcome, PlayerState, Stance};
pub use spawner::choose_kind;
pub use state::{
    Entity, EntityKind, GameEvent, GameOverReason, GameSession, RunSummary, SessionPhase,
};
pub use tick::{jump, tick};
