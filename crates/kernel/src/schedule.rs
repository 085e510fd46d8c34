use cubehunt_common::SessionId;
use serde::{Deserialize, Serialize};

/// Delayed work the session schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Spawn the given round.
    StartRound { round: u32 },
    /// Hide the "Round N" overlay.
    DismissAnnouncement,
    /// Bring the start menu back after a game over.
    ReturnToMenu,
}

/// A task that came due, tagged with the session that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DueTask {
    seq: u64,
    pub session: SessionId,
    pub fire_at: f64,
    pub kind: TaskKind,
}

/// Cancellable one-shot timers driven by host time.
///
/// Nothing fires on its own: the owner calls [`Scheduler::take_due`] from its
/// frame update and runs what comes back.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<DueTask>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn schedule(&mut self, session: SessionId, fire_at: f64, kind: TaskKind) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(DueTask {
            seq,
            session,
            fire_at,
            kind,
        });
    }

    /// Drop every pending task of the given kind. Returns how many were dropped.
    pub fn cancel_kind(&mut self, kind: TaskKind) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.kind != kind);
        before - self.tasks.len()
    }

    /// Drop every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.tasks.len();
        self.tasks.clear();
        n
    }

    /// Remove and return tasks with `fire_at <= now`, earliest first.
    /// Tasks due at the same time come back in scheduling order.
    pub fn take_due(&mut self, now: f64) -> Vec<DueTask> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|t| t.fire_at <= now);
        self.tasks = waiting;
        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due
    }
}
