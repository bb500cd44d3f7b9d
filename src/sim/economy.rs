//! Scoring and resource bookkeeping
//!
//! Collision effects per entity type, passive carbon decay and distance.

use super::state::{EntityKind, GameEvent, GameSession};
use crate::consts::*;
use crate::tuning::{ECO_FACTS, fact_text};

/// Apply the effect of touching an entity of `kind`
pub fn apply_collision(session: &mut GameSession, kind: EntityKind) {
    let config = session.config();

    match kind {
        EntityKind::Pollution if session.shield_count > 0 => {
            session.shield_count -= 1;
            session.record(GameEvent::ShieldAbsorbed);
        }
        EntityKind::Pollution => {
            session.lives = session.lives.saturating_sub(1);
            session.carbon_level += config.pollution_hit;
            session.combo_count = 0;
            session.score = session.score.saturating_sub(POLLUTION_SCORE_PENALTY);
            session.record(GameEvent::PollutionHit);
        }
        EntityKind::Green => {
            session.carbon_level = (session.carbon_level - config.green_carbon_cut).max(0.0);
            session.score += config.green_reward;
            session.combo_count += 1;
            session.record(GameEvent::GreenCollected);

            if session.combo_count.is_multiple_of(COMBO_STEP) {
                session.score += COMBO_BONUS;
                session.record(GameEvent::ComboBonus {
                    combo: session.combo_count,
                });
            }
        }
        EntityKind::Shield => {
            session.shield_count += 1;
            session.record(GameEvent::ShieldCollected);
        }
        EntityKind::Fact => {
            let index = session.facts_unlocked as usize % ECO_FACTS.len();
            session.facts_unlocked += 1;
            log::info!("Fact unlocked: {}", fact_text(index));
            session.record(GameEvent::FactUnlocked { index });
        }
    }
}

/// Per-tick carbon drain, floored at zero
pub fn apply_passive_decay(session: &mut GameSession) {
    session.carbon_level = (session.carbon_level - PASSIVE_DECAY_RATE).max(0.0);
}

/// Accumulate displayed distance for a tick of `dt` seconds
pub fn accumulate_distance(session: &mut GameSession, dt: f32) {
    let config = session.config();
    session.distance_traveled += config.speed * dt * config.distance_multiplier * DISTANCE_SCALE;
}
