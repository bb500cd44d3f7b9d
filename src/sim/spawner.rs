//! Timer-driven procedural spawning
//!
//! Entity types are drawn against cumulative thresholds in a fixed order
//! (shield, green, fact, anything else is pollution), so the effective odds
//! of a later type depend on the ones before it.

use glam::Vec2;
use rand::Rng;

use super::state::{EntityKind, GameEvent, GameSession};
use crate::consts::*;
use crate::tuning::SpawnWeights;

/// Pick an entity type for a uniform roll `r` in `[0, 1)`
pub fn choose_kind(r: f32, weights: &SpawnWeights) -> EntityKind {
    let shield = weights.shield_chance;
    let green = shield + weights.green_chance;
    let fact = green + weights.fact_chance;

    if r < shield {
        EntityKind::Shield
    } else if r < green {
        EntityKind::Green
    } else if r < fact {
        EntityKind::Fact
    } else {
        EntityKind::Pollution
    }
}

/// Vertical placement for a freshly spawned entity
pub fn spawn_height<R: Rng>(kind: EntityKind, rng: &mut R) -> f32 {
    match kind {
        EntityKind::Pollution => 0.0,
        EntityKind::Green => {
            if rng.random_bool(0.5) {
                0.0
            } else {
                GREEN_ELEVATED_Y
            }
        }
        EntityKind::Shield | EntityKind::Fact => {
            rng.random_range(PICKUP_BAND_MIN_Y..PICKUP_BAND_MAX_Y)
        }
    }
}

/// Advance the spawn timer and create at most one entity at the right edge.
/// Returns the kind spawned, if any.
pub fn update<R: Rng>(session: &mut GameSession, dt: f32, rng: &mut R) -> Option<EntityKind> {
    let config = session.config();
    session.spawn_timer += dt;
    if session.spawn_timer < config.spawn_interval {
        return None;
    }
    session.spawn_timer = 0.0;

    let roll: f32 = rng.random();
    let kind = choose_kind(roll, &config.weights);
    let y = spawn_height(kind, rng);
    let id = session.push_entity(kind, Vec2::new(PLAY_FIELD_WIDTH, y));
    session.record(GameEvent::Spawned(kind));
    log::debug!("Spawned {:?} #{} at y={:.0}", kind, id, y);

    Some(kind)
}

/// Scroll every entity left by `distance`
pub fn advance_entities(session: &mut GameSession, distance: f32) {
    for entity in &mut session.entities {
        entity.advance(distance);
    }
}

/// Drop consumed and off-screen entities in place
pub fn compact(session: &mut GameSession) {
    session
        .entities
        .retain(|e| !e.consumed && !e.is_off_screen());
}
