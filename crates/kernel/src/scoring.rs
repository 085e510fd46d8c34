use serde::{Deserialize, Serialize};

use crate::config::ScoringPolicy;

/// Result of settling a finished game against the high score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverOutcome {
    pub score: u32,
    pub high_score: u32,
    pub new_record: bool,
}

/// Score, lives and the high score.
///
/// # Invariants
/// - `lives <= max_lives` and `score >= 0` after every operation.
/// - A game is settled against the high score at most once per reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u32,
    lives: u32,
    max_lives: u32,
    high_score: u32,
    policy: ScoringPolicy,
    miss_penalty: u32,
    settled: bool,
}

impl Scoreboard {
    pub fn new(policy: ScoringPolicy, max_lives: u32, miss_penalty: u32, high_score: u32) -> Self {
        Self {
            score: 0,
            lives: max_lives,
            max_lives,
            high_score,
            policy,
            miss_penalty,
            settled: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }

    /// Fresh game: zero score, full lives. The high score is kept.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.max_lives;
        self.settled = false;
    }

    /// Award a hit. Returns the points added. Lives refill by one up to the cap.
    pub fn on_hit(&mut self, reaction_secs: f64) -> u32 {
        let points = self.policy.points(reaction_secs);
        self.score = self.score.saturating_add(points);
        self.lives = self.lives.saturating_add(1).min(self.max_lives);
        points
    }

    /// Charge a miss: one life and the miss penalty, both floored at zero.
    /// Returns the points actually deducted.
    pub fn on_miss(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        let before = self.score;
        self.score = self.score.saturating_sub(self.miss_penalty);
        before - self.score
    }

    /// When lives have run out, settle the score against the high score.
    ///
    /// Returns `None` while lives remain or if this game was already settled.
    pub fn check_game_over(&mut self) -> Option<GameOverOutcome> {
        if self.lives > 0 || self.settled {
            return None;
        }
        self.settled = true;
        let new_record = self.score > self.high_score;
        if new_record {
            self.high_score = self.score;
        }
        Some(GameOverOutcome {
            score: self.score,
            high_score: self.high_score,
            new_record,
        })
    }
}
