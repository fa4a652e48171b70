//! Session high score leaderboard
//!
//! Kept in memory for the lifetime of the scene; tracks the top 10 runs.

use serde::Serialize;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighScoreEntry {
    /// Final score
    pub score: u32,
    /// Level reached
    pub level: u32,
    /// 1-based run number within the session
    pub run: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Default, Serialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Slot a score would take: after every entry scoring at least as much
    fn slot_for(&self, score: u32) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// A run scores on the board if it earned anything and beats a full board's last place
    pub fn qualifies(&self, score: u32) -> bool {
        score > 0 && self.slot_for(score) < MAX_HIGH_SCORES
    }

    /// Record a finished run. Returns its 1-based rank, or None when it
    /// does not make the board.
    pub fn add_score(&mut self, score: u32, level: u32, run: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let slot = self.slot_for(score);
        self.entries.insert(slot, HighScoreEntry { score, level, run });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}
