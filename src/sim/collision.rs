//! Axis-aligned collision detection
//!
//! Both the player and entities are boxes; overlap is a plain separating-axis
//! test. Touching edges count as overlap.

use glam::Vec2;

use super::physics::PlayerState;
use super::state::{Entity, EntityKind, GameSession};
use crate::consts::*;

/// Axis-aligned bounding box (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    /// True unless one of the four separating conditions holds
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }
}

pub fn player_aabb(player: &PlayerState) -> Aabb {
    Aabb::new(
        Vec2::new(PLAYER_X, player.offset),
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
    )
}

pub fn entity_aabb(entity: &Entity) -> Aabb {
    Aabb::new(entity.pos, Vec2::splat(ENTITY_SIZE))
}

/// Mark every live entity touching the player as consumed and return the
/// kinds hit this tick, in entity order. Already-consumed entities are skipped.
pub fn detect(session: &mut GameSession) -> Vec<EntityKind> {
    let player_box = player_aabb(&session.player);
    let mut hits = Vec::new();

    for entity in session.entities.iter_mut().filter(|e| !e.consumed) {
        if player_box.overlaps(&entity_aabb(entity)) {
            entity.consumed = true;
            log::debug!("Collision with {:?} #{}", entity.kind, entity.id);
            hits.push(entity.kind);
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::LevelKey;

    fn square(x: f32, y: f32, size: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::splat(size))
    }

    #[test]
    fn test_overlap_cases() {
        let a = square(0.0, 0.0, 10.0);
        assert!(a.overlaps(&square(5.0, 5.0, 10.0)));
        assert!(a.overlaps(&square(10.0, 0.0, 10.0)), "shared edge");
        assert!(!a.overlaps(&square(10.1, 0.0, 10.0)));
        assert!(!a.overlaps(&square(-10.1, 0.0, 10.0)));
        assert!(!a.overlaps(&square(0.0, 10.1, 10.0)));
        assert!(!a.overlaps(&square(0.0, -10.1, 10.0)));
        assert!(a.overlaps(&square(2.0, 2.0, 1.0)), "contained");
    }

    #[test]
    fn test_detect_marks_consumed_once() {
        let mut session = GameSession::new(LevelKey::Easy);
        session.push_entity(EntityKind::Green, Vec2::new(PLAYER_X + 5.0, 0.0));
        session.push_entity(EntityKind::Pollution, Vec2::new(600.0, 0.0));

        assert_eq!(detect(&mut session), vec![EntityKind::Green]);
        assert!(session.entities[0].consumed);
        assert!(!session.entities[1].consumed);

        // second pass: nothing new
        assert!(detect(&mut session).is_empty());
    }

    #[test]
    fn test_jumping_clears_ground_obstacle() {
        let mut session = GameSession::new(LevelKey::Easy);
        session.push_entity(EntityKind::Pollution, Vec2::new(PLAYER_X, 0.0));
        session.player.offset = ENTITY_SIZE + 1.0;

        assert!(detect(&mut session).is_empty());
    }
}
