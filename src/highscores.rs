//! High score leaderboard
//!
//! In-memory only; fed from the engine's completion listener.

use serde::{Deserialize, Serialize};

use crate::sim::{GameOverReason, RunSummary};
use crate::tuning::LevelKey;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub level: LevelKey,
    /// Meters covered
    pub distance: f32,
    pub facts: u32,
    pub reason: GameOverReason,
}

impl From<&RunSummary> for HighScoreEntry {
    fn from(summary: &RunSummary) -> Self {
        Self {
            score: summary.score,
            level: summary.level,
            distance: summary.distance_traveled,
            facts: summary.facts_unlocked,
            reason: summary.reason,
        }
    }
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Record a finished run. Returns the rank achieved, if any.
    pub fn add(&mut self, summary: &RunSummary) -> Option<usize> {
        let rank = self.potential_rank(summary.score)?;
        self.entries.insert(rank - 1, HighScoreEntry::from(summary));
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("New high score #{}: {}", rank, summary.score);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best entry so far
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    /// Best score reached on a given level
    pub fn best_for(&self, level: LevelKey) -> Option<u32> {
        self.entries
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.score)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: u32, level: LevelKey) -> RunSummary {
        RunSummary {
            level,
            score,
            carbon_level: 120.0,
            distance_traveled: 42.0,
            facts_unlocked: 1,
            reason: GameOverReason::Lives,
            ticks: 600,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
    }

    #[test]
    fn test_add_keeps_descending_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add(&summary(30, LevelKey::Easy)), Some(1));
        assert_eq!(scores.add(&summary(50, LevelKey::Hard)), Some(1));
        assert_eq!(scores.add(&summary(40, LevelKey::Easy)), Some(2));

        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![50, 40, 30]);
        assert_eq!(scores.best().map(|e| e.score), Some(50));
        assert_eq!(scores.best_for(LevelKey::Easy), Some(40));
        assert_eq!(scores.best_for(LevelKey::Medium), None);
    }

    #[test]
    fn test_board_is_capped() {
        let mut scores = HighScores::new();
        for score in 1..=MAX_HIGH_SCORES as u32 + 5 {
            scores.add(&summary(score, LevelKey::Medium));
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert!(!scores.qualifies(5));
        assert_eq!(scores.entries.last().map(|e| e.score), Some(6));
    }
}
