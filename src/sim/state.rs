//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameSession`]; the engine owns exactly
//! one of them while a run is active.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::PlayerState;
use crate::consts::*;
use crate::tuning::{LevelConfig, LevelKey};

/// Externally visible lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No active session (menu)
    #[default]
    Idle,
    /// Ticking and accepting input
    Running,
    /// Run ended; terminal until restart
    GameOver(GameOverReason),
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Out of lives
    Lives,
    /// Carbon level reached the level maximum
    Carbon,
}

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Pollution,
    Green,
    Shield,
    Fact,
}

/// A scrolling obstacle or collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// x = left edge, y = bottom edge above the ground line
    pub pos: Vec2,
    /// Set once on first overlap with the player, never cleared
    pub consumed: bool,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            consumed: false,
        }
    }

    /// Scroll left by `distance`
    pub fn advance(&mut self, distance: f32) {
        self.pos.x -= distance;
    }

    /// True once the entity has fully left the play field
    pub fn is_off_screen(&self) -> bool {
        self.pos.x < DESPAWN_X
    }
}

/// Discrete things that happened during a step, for presenters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    DoubleJumped,
    Spawned(EntityKind),
    /// A shield absorbed a pollution hit
    ShieldAbsorbed,
    PollutionHit,
    GreenCollected,
    /// Every third consecutive green
    ComboBonus { combo: u32 },
    ShieldCollected,
    FactUnlocked { index: usize },
    GameOver(GameOverReason),
}

/// Final numbers of a terminated run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub level: LevelKey,
    pub score: u32,
    pub carbon_level: f32,
    pub distance_traveled: f32,
    pub facts_unlocked: u32,
    pub reason: GameOverReason,
    pub ticks: u64,
}

/// Complete run state (the aggregate root)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub level: LevelKey,
    pub score: u32,
    pub carbon_level: f32,
    pub lives: u8,
    pub combo_count: u32,
    pub shield_count: u32,
    pub facts_unlocked: u32,
    pub distance_traveled: f32,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Active entities, in spawn order
    pub entities: Vec<Entity>,
    pub player: PlayerState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events recorded since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Fresh run under the given level
    pub fn new(level: LevelKey) -> Self {
        Self {
            level,
            score: 0,
            carbon_level: START_CARBON,
            lives: START_LIVES,
            combo_count: 0,
            shield_count: 0,
            facts_unlocked: 0,
            distance_traveled: 0.0,
            spawn_timer: 0.0,
            entities: Vec::new(),
            player: PlayerState::default(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &'static LevelConfig {
        self.level.config()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a freshly spawned entity
    pub fn push_entity(&mut self, kind: EntityKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.entities.push(Entity::new(id, kind, pos));
        id
    }

    pub fn record(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events recorded so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Which termination predicate holds, lives first
    pub fn termination(&self) -> Option<GameOverReason> {
        if self.lives == 0 {
            Some(GameOverReason::Lives)
        } else if self.carbon_level >= self.config().max_carbon {
            Some(GameOverReason::Carbon)
        } else {
            None
        }
    }

    pub fn summary(&self, reason: GameOverReason) -> RunSummary {
        RunSummary {
            level: self.level,
            score: self.score,
            carbon_level: self.carbon_level,
            distance_traveled: self.distance_traveled,
            facts_unlocked: self.facts_unlocked,
            reason,
            ticks: self.time_ticks,
        }
    }
}
