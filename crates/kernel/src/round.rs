use serde::{Deserialize, Serialize};

/// Round bookkeeping: which round, how many targets it has, how many are down.
///
/// `cubes_shot <= cubes_per_round` always holds; the round is complete
/// exactly when they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundController {
    current_round: u32,
    cubes_per_round: u32,
    cubes_shot: u32,
    round_started_at: Option<f64>,
}

impl RoundController {
    pub fn new(cubes_per_round: u32) -> Self {
        Self {
            current_round: 1,
            cubes_per_round,
            cubes_shot: 0,
            round_started_at: None,
        }
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn cubes_per_round(&self) -> u32 {
        self.cubes_per_round
    }

    pub fn cubes_shot(&self) -> u32 {
        self.cubes_shot
    }

    /// Host time the current round spawned, `None` before the first round.
    pub fn round_started_at(&self) -> Option<f64> {
        self.round_started_at
    }

    pub fn is_complete(&self) -> bool {
        self.cubes_shot == self.cubes_per_round
    }

    /// Back to round 1 with nothing started.
    pub fn reset(&mut self) {
        self.current_round = 1;
        self.cubes_shot = 0;
        self.round_started_at = None;
    }

    /// Start `round`, zeroing the shot count.
    pub fn begin(&mut self, round: u32, now: f64) {
        self.current_round = round;
        self.cubes_shot = 0;
        self.round_started_at = Some(now);
    }

    /// Count one target down. Returns `true` when this hit completed the round.
    /// Hits past completion are ignored.
    pub fn record_hit(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.cubes_shot += 1;
        self.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_round_one() {
        let rounds = RoundController::new(3);
        assert_eq!(rounds.current_round(), 1);
        assert_eq!(rounds.cubes_shot(), 0);
        assert!(rounds.round_started_at().is_none());
    }

    #[test]
    fn completes_on_last_hit_only() {
        let mut rounds = RoundController::new(3);
        rounds.begin(1, 0.0);
        assert!(!rounds.record_hit());
        assert!(!rounds.record_hit());
        assert!(rounds.record_hit());
        assert!(rounds.is_complete());
    }

    #[test]
    fn hits_past_completion_are_ignored() {
        let mut rounds = RoundController::new(1);
        rounds.begin(1, 0.0);
        assert!(rounds.record_hit());
        assert!(!rounds.record_hit());
        assert_eq!(rounds.cubes_shot(), 1);
    }

    #[test]
    fn begin_resets_shot_count() {
        let mut rounds = RoundController::new(2);
        rounds.begin(1, 0.0);
        rounds.record_hit();
        rounds.begin(2, 5.0);
        assert_eq!(rounds.current_round(), 2);
        assert_eq!(rounds.cubes_shot(), 0);
        assert_eq!(rounds.round_started_at(), Some(5.0));
    }

    #[test]
    fn reset_returns_to_round_one() {
        let mut rounds = RoundController::new(2);
        rounds.begin(4, 1.0);
        rounds.record_hit();
        rounds.reset();
        assert_eq!(rounds.current_round(), 1);
        assert_eq!(rounds.cubes_shot(), 0);
    }
}
