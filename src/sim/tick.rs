//! Variable timestep simulation tick
//!
//! One call runs the whole pipeline to completion:
//! physics -> scroll/spawn -> collisions -> economy -> decay -> termination.

use rand::Rng;

use super::economy::{accumulate_distance, apply_collision, apply_passive_decay};
use super::physics::JumpOutcome;
use super::state::{GameEvent, GameOverReason, GameSession};
use super::{collision, spawner};

/// Apply a jump input to the session's player
pub fn jump(session: &mut GameSession) -> JumpOutcome {
    let outcome = session.player.jump();
    match outcome {
        JumpOutcome::Jumped => session.record(GameEvent::Jumped),
        JumpOutcome::DoubleJumped => session.record(GameEvent::DoubleJumped),
        JumpOutcome::Ignored => {}
    }
    outcome
}

/// Advance the session by `dt` seconds.
/// Returns the game-over reason if a termination predicate fired this tick.
pub fn tick<R: Rng>(session: &mut GameSession, dt: f32, rng: &mut R) -> Option<GameOverReason> {
    session.time_ticks += 1;

    session.player.integrate(dt);

    // Scroll before spawning so a new entity starts at the right edge.
    let scroll = session.config().speed * dt;
    spawner::advance_entities(session, scroll);
    spawner::update(session, dt, rng);

    for kind in collision::detect(session) {
        apply_collision(session, kind);
    }
    spawner::compact(session);

    apply_passive_decay(session);
    accumulate_distance(session, dt);

    let reason = session.termination();
    if let Some(reason) = reason {
        session.record(GameEvent::GameOver(reason));
    }
    reason
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::EntityKind;
    use crate::tuning::LevelKey;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_tick_scrolls_and_collects() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = GameSession::new(LevelKey::Easy);
        // one tick away from the player's right edge
        let x = PLAYER_X + PLAYER_WIDTH + session.config().speed * DT - 0.5;
        session.push_entity(EntityKind::Green, Vec2::new(x, 0.0));

        assert_eq!(tick(&mut session, DT, &mut rng), None);
        assert_eq!(session.score, 10);
        assert_eq!(session.combo_count, 1);
        assert!(session.entities.iter().all(|e| e.kind != EntityKind::Green));
    }

    #[test]
    fn test_new_entity_starts_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut session = GameSession::new(LevelKey::Easy);
        session.push_entity(EntityKind::Green, Vec2::new(500.0, GREEN_ELEVATED_Y));
        session.spawn_timer = session.config().spawn_interval;

        tick(&mut session, DT, &mut rng);

        assert_eq!(session.entities.len(), 2);
        let scrolled = 500.0 - session.config().speed * DT;
        assert!((session.entities[0].pos.x - scrolled).abs() < 1e-3);
        assert_eq!(session.entities[1].pos.x, PLAY_FIELD_WIDTH);
    }

    #[test]
    fn test_decay_applies_every_tick() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = GameSession::new(LevelKey::Easy);
        tick(&mut session, 0.0, &mut rng);
        tick(&mut session, 0.0, &mut rng);
        assert!((session.carbon_level - (START_CARBON - 2.0 * PASSIVE_DECAY_RATE)).abs() < 1e-4);
    }

    #[test]
    fn test_zero_dt_tick_moves_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = GameSession::new(LevelKey::Easy);
        session.push_entity(EntityKind::Pollution, Vec2::new(400.0, 0.0));
        tick(&mut session, 0.0, &mut rng);
        assert_eq!(session.entities[0].pos.x, 400.0);
        assert_eq!(session.distance_traveled, 0.0);
    }

    #[test]
    fn test_carbon_game_over() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut session = GameSession::new(LevelKey::Easy);
        session.carbon_level = 200.0;
        assert_eq!(tick(&mut session, DT, &mut rng), Some(GameOverReason::Carbon));
        assert_eq!(
            session.events.last(),
            Some(&GameEvent::GameOver(GameOverReason::Carbon))
        );
    }

    #[test]
    fn test_jump_records_events() {
        let mut session = GameSession::new(LevelKey::Easy);
        assert_eq!(jump(&mut session), JumpOutcome::Jumped);
        assert_eq!(jump(&mut session), JumpOutcome::DoubleJumped);
        assert_eq!(jump(&mut session), JumpOutcome::Ignored);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::Jumped, GameEvent::DoubleJumped]
        );
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);
        let mut s1 = GameSession::new(LevelKey::Hard);
        let mut s2 = GameSession::new(LevelKey::Hard);

        for i in 0..600 {
            if i % 45 == 0 {
                jump(&mut s1);
                jump(&mut s2);
            }
            tick(&mut s1, DT, &mut rng1);
            tick(&mut s2, DT, &mut rng2);
        }

        assert_eq!(s1.score, s2.score);
        assert_eq!(s1.lives, s2.lives);
        assert_eq!(s1.carbon_level, s2.carbon_level);
        assert_eq!(s1.entities, s2.entities);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn carbon_never_negative(
                seed in 0u64..1000,
                steps in proptest::collection::vec((0.0f32..0.1, any::<bool>()), 10..300)
            ) {
                let mut rng = Pcg32::seed_from_u64(seed);
                let mut session = GameSession::new(LevelKey::Easy);
                for (dt, jump_now) in steps {
                    if jump_now {
                        jump(&mut session);
                    }
                    let over = tick(&mut session, dt, &mut rng);
                    prop_assert!(session.carbon_level >= 0.0);
                    if over.is_some() {
                        break;
                    }
                }
            }
        }
    }
}
