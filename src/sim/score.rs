//! Scoring and best-score tracking

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::HighScoreStore;

/// Points awarded for clearing a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelScore {
    pub level_bonus: u64,
    pub time_bonus: u64,
    pub total: u64,
}

/// All-homes bonus plus whole seconds left times the per-second bonus
pub fn level_score(time_remaining: f32) -> LevelScore {
    let level_bonus = POINTS_ALL_HOMES;
    let time_bonus = whole_seconds(time_remaining) * POINTS_TIME_BONUS;
    LevelScore {
        level_bonus,
        time_bonus,
        total: level_bonus + time_bonus,
    }
}

fn whole_seconds(seconds: f32) -> u64 {
    seconds.max(0.0).floor() as u64
}

/// Running score and the persisted best
#[derive(Debug, Clone, Default)]
pub struct Score {
    score: u64,
    high_score: u64,
}

impl Score {
    /// Start at zero with the best score read from `store`
    ///
    /// An unreadable store just means no best score yet.
    pub fn load(store: &dyn HighScoreStore) -> Self {
        let high_score = match store.load() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("High score unavailable, starting from 0: {e}");
                0
            }
        };
        Self {
            score: 0,
            high_score,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn add_hop_forward(&mut self) -> u64 {
        self.add(POINTS_HOP_FORWARD)
    }

    pub fn add_home(&mut self) -> u64 {
        self.add(POINTS_HOME)
    }

    /// Level bonus and time bonus together
    pub fn add_level_complete(&mut self, time_remaining: f32) -> LevelScore {
        let award = level_score(time_remaining);
        self.add(award.total);
        award
    }

    pub fn add(&mut self, points: u64) -> u64 {
        self.score += points;
        points
    }

    /// Record a new best if the score beats it
    ///
    /// Save failures are logged and ignored; the in-memory best still updates.
    pub fn check_high_score(&mut self, store: &mut dyn HighScoreStore) -> bool {
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        if let Err(e) = store.save(self.high_score) {
            log::warn!("Failed to save high score {}: {e}", self.high_score);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StorageError};

    /// Store that always fails
    #[derive(Debug)]
    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> Result<u64, StorageError> {
            Err(StorageError::Unavailable("no storage".into()))
        }

        fn save(&mut self, _score: u64) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("no storage".into()))
        }
    }

    #[test]
    fn test_level_score_full_seconds() {
        let award = level_score(30.0);
        assert_eq!(award.level_bonus, 1000);
        assert_eq!(award.time_bonus, 300);
        assert_eq!(award.total, 1300);
    }

    #[test]
    fn test_level_score_floors_fractional_seconds() {
        let award = level_score(25.7);
        assert_eq!(award.time_bonus, 250);
        assert_eq!(award.total, 1250);
    }

    #[test]
    fn test_level_score_no_time_left() {
        let award = level_score(0.0);
        assert_eq!(award.time_bonus, 0);
        assert_eq!(award.total, 1000);
        assert_eq!(level_score(-3.0).time_bonus, 0);
    }

    #[test]
    fn test_score_deltas() {
        let mut score = Score::default();
        assert_eq!(score.add_hop_forward(), 10);
        assert_eq!(score.add_home(), 50);
        let award = score.add_level_complete(12.9);
        assert_eq!(award.total, 1120);
        assert_eq!(score.score(), 1180);
        score.reset();
        assert_eq!(score.score(), 0);
    }

    #[test]
    fn test_high_score_loaded_and_saved() {
        let mut store = MemoryStore::with_score(500);
        let mut score = Score::load(&store);
        assert_eq!(score.high_score(), 500);

        score.add(400);
        assert!(!score.check_high_score(&mut store));
        assert_eq!(store.load().ok(), Some(500));

        score.add(200);
        assert!(score.check_high_score(&mut store));
        assert_eq!(score.high_score(), 600);
        assert_eq!(store.load().ok(), Some(600));
    }

    #[test]
    fn test_broken_store_does_not_affect_scoring() {
        let mut store = BrokenStore;
        let mut score = Score::load(&store);
        assert_eq!(score.high_score(), 0);
        score.add(70);
        assert!(score.check_high_score(&mut store));
        assert_eq!(score.high_score(), 70);
    }
}
