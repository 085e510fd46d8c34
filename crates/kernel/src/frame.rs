//! Per-frame update: delayed tasks, target motion, fade and reaping.

use crate::event::GameEvent;
use crate::placement::PlacementPolicy;
use crate::schedule::TaskKind;
use crate::session::GameSession;
use crate::target::Motion;

impl GameSession {
    /// Called once per rendered frame, whether or not a game is running.
    ///
    /// Due tasks from the current session run first; tasks left over from an
    /// older session are dropped. Targets only move and fade while a game is
    /// running.
    pub fn update(&mut self, now: f64) {
        for task in self.scheduler.take_due(now) {
            if task.session != self.id {
                tracing::debug!(kind = ?task.kind, "dropping task from a previous session");
                continue;
            }
            self.run_task(task.kind, now);
        }

        if !self.game_started {
            return;
        }
        let motion = self.motion();
        for id in self.registry.advance(now, &motion) {
            self.events.push(GameEvent::TargetRemoved { id });
        }
    }

    /// Motion parameters for the current round and mode.
    pub fn motion(&self) -> Motion {
        let drift_rate = if PlacementPolicy::drifts(self.mode) {
            self.config.drift_rate
        } else {
            0.0
        };
        Motion {
            speed: self.config.speed_for_round(self.rounds.current_round()),
            wander_rate: self.config.wander_rate,
            drift_rate,
        }
    }

    fn run_task(&mut self, kind: TaskKind, now: f64) {
        match kind {
            TaskKind::StartRound { round } => {
                if !self.game_started || round != self.rounds.current_round() + 1 {
                    tracing::debug!(round, "stale round start skipped");
                    return;
                }
                self.begin_round(round, now);
            }
            TaskKind::DismissAnnouncement => {
                if self.announcement_visible {
                    self.announcement_visible = false;
                    self.events.push(GameEvent::AnnouncementDismissed);
                }
            }
            TaskKind::ReturnToMenu => {
                if !self.game_started && !self.menu_visible {
                    self.menu_visible = true;
                    self.events.push(GameEvent::MenuShown);
                }
            }
        }
    }
}
