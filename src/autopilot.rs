//! Attract-mode controller
//!
//! Looks at a snapshot and decides whether to press jump. Dodges pollution
//! first; when the way is clear it hops for elevated pickups.

use crate::consts::*;
use crate::engine::{SessionView, Snapshot};
use crate::sim::{EntityKind, SessionPhase};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Seconds of warning before an obstacle reaches the player
    pub lead_time: f32,
    /// Jump for shields, facts and elevated greens when safe
    pub chase_pickups: bool,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lead_time: 0.15,
            chase_pickups: true,
        }
    }
}

impl Autopilot {
    /// True if the player should jump now
    pub fn decide(&self, snapshot: &Snapshot) -> bool {
        if snapshot.phase != SessionPhase::Running || snapshot.suspended {
            return false;
        }
        let (Some(view), Some(level)) = (&snapshot.session, snapshot.level) else {
            return false;
        };
        let window = level.config().speed * self.lead_time;

        let threat = nearest_gap(view, |kind, _| kind == EntityKind::Pollution);
        let player = &view.player;

        if let Some(gap) = threat {
            if gap > window {
                return self.wants_pickup(view, window);
            }
            if player.grounded() {
                return true;
            }
            // falling back onto it: spend the double jump
            return player.double_jump_available()
                && player.velocity < 0.0
                && player.offset < ENTITY_SIZE * 2.0;
        }

        self.wants_pickup(view, window)
    }

    fn wants_pickup(&self, view: &SessionView, window: f32) -> bool {
        if !self.chase_pickups || !view.player.grounded() {
            return false;
        }
        // don't commit to a jump if pollution follows closely
        if nearest_gap(view, |kind, _| kind == EntityKind::Pollution)
            .is_some_and(|gap| gap < window * 4.0)
        {
            return false;
        }
        nearest_gap(view, |kind, y| kind != EntityKind::Pollution && y > 0.0)
            .is_some_and(|gap| gap <= window)
    }
}

/// Horizontal gap from the player's front edge to the closest matching
/// entity that hasn't passed the player yet
fn nearest_gap(view: &SessionView, filter: impl Fn(EntityKind, f32) -> bool) -> Option<f32> {
    view.entities
        .iter()
        .filter(|e| !e.consumed && filter(e.kind, e.pos.y))
        .filter(|e| e.pos.x + ENTITY_SIZE >= PLAYER_X)
        .map(|e| (e.pos.x - (PLAYER_X + PLAYER_WIDTH)).max(0.0))
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::sim::GameSession;
    use crate::tuning::LevelKey;
    use glam::Vec2;

    fn snapshot_with(entities: &[(EntityKind, f32, f32)]) -> Snapshot {
        let mut session = GameSession::new(LevelKey::Easy);
        for &(kind, x, y) in entities {
            session.push_entity(kind, Vec2::new(x, y));
        }
        Snapshot {
            phase: SessionPhase::Running,
            suspended: false,
            level: Some(LevelKey::Easy),
            session: Some(SessionView::from(&session)),
            events: Vec::new(),
        }
    }

    #[test]
    fn test_jumps_for_close_pollution() {
        let pilot = Autopilot::default();
        let front = PLAYER_X + PLAYER_WIDTH;
        assert!(pilot.decide(&snapshot_with(&[(EntityKind::Pollution, front + 10.0, 0.0)])));
        assert!(!pilot.decide(&snapshot_with(&[(EntityKind::Pollution, front + 300.0, 0.0)])));
    }

    #[test]
    fn test_ignores_ground_green() {
        let pilot = Autopilot::default();
        let front = PLAYER_X + PLAYER_WIDTH;
        assert!(!pilot.decide(&snapshot_with(&[(EntityKind::Green, front + 10.0, 0.0)])));
    }

    #[test]
    fn test_chases_elevated_pickup_only_when_safe() {
        let pilot = Autopilot::default();
        let front = PLAYER_X + PLAYER_WIDTH;
        assert!(pilot.decide(&snapshot_with(&[(EntityKind::Shield, front + 10.0, 90.0)])));
        assert!(!pilot.decide(&snapshot_with(&[
            (EntityKind::Shield, front + 10.0, 90.0),
            (EntityKind::Pollution, front + 80.0, 0.0),
        ])));
    }

    #[test]
    fn test_idle_engine_never_jumps() {
        let engine = Engine::new(1);
        assert!(!Autopilot::default().decide(&engine.snapshot()));
    }
}
