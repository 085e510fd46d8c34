//! Input dispatch: one aim in, at most one credited target out.

use cubehunt_common::{Aim, TargetId};

use crate::event::GameEvent;
use crate::session::GameSession;

/// Why a shot was dropped without touching score or lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No game running (menu, or after game over).
    NotStarted,
    NoLives,
    /// The source does not aim in the current mode (e.g. touch while immersive).
    SourceDisabled,
}

/// What a single shot did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    Ignored(IgnoreReason),
    Hit {
        id: TargetId,
        points: u32,
        /// This hit finished the round; the next one is scheduled.
        round_complete: bool,
    },
    Miss {
        /// Points actually deducted.
        penalty: u32,
        game_over: bool,
    },
}

impl GameSession {
    /// Resolve one shot against the alive targets.
    ///
    /// The nearest alive target along the ray is credited (marked hit,
    /// scored, counted toward the round). No target means a miss, which costs
    /// a life and may end the game.
    pub fn handle_aim(&mut self, aim: Aim, now: f64) -> ShotOutcome {
        if !self.game_started {
            return ShotOutcome::Ignored(IgnoreReason::NotStarted);
        }
        if self.scoreboard.is_out_of_lives() {
            return ShotOutcome::Ignored(IgnoreReason::NoLives);
        }
        if !self.source_enabled(aim.source) {
            tracing::debug!(source = ?aim.source, mode = ?self.mode, "shot from inactive source ignored");
            return ShotOutcome::Ignored(IgnoreReason::SourceDisabled);
        }

        let Some((id, _distance)) = self.registry.ray_test(&aim.ray) else {
            return self.miss(aim, now);
        };
        let reaction_secs = self
            .registry
            .get(id)
            .map(|t| t.reaction_time(now))
            .unwrap_or_default();
        // ray_test only returns alive targets, so this transition always happens.
        self.registry.mark_hit(id, now);

        let points = self.scoreboard.on_hit(reaction_secs);
        tracing::info!(%id, points, reaction_secs, source = ?aim.source, "hit");
        self.events.push(GameEvent::TargetHit {
            id,
            source: aim.source,
            points,
            reaction_secs,
        });
        self.push_hud();
        self.on_target_hit(now);

        ShotOutcome::Hit {
            id,
            points,
            round_complete: self.rounds.is_complete(),
        }
    }

    fn miss(&mut self, aim: Aim, now: f64) -> ShotOutcome {
        let penalty = self.scoreboard.on_miss();
        tracing::info!(lives = self.scoreboard.lives(), penalty, source = ?aim.source, "miss");
        self.events.push(GameEvent::Missed {
            source: aim.source,
            penalty,
        });
        self.push_hud();
        self.check_game_over(now);
        ShotOutcome::Miss {
            penalty,
            game_over: !self.game_started,
        }
    }
}
