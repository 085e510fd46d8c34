use cubehunt_common::TargetId;
use cubehunt_kernel::{GameSession, PlayMode, TargetState};
use glam::Vec3;

/// Session inspector for developer tooling.
///
/// Read-only queries against a running session for debugging and the CLI.
pub struct SessionInspector;

impl SessionInspector {
    pub fn summary(session: &GameSession) -> SessionSummary {
        SessionSummary {
            round: session.current_round(),
            score: session.score(),
            lives: session.lives(),
            high_score: session.high_score(),
            mode: session.mode(),
            game_started: session.game_started(),
            alive_targets: session.registry().alive_count(),
            total_targets: session.registry().len(),
            cubes_shot: session.cubes_shot(),
            pending_tasks: session.pending_tasks(),
            pending_events: session.events().len(),
        }
    }

    pub fn inspect_target(session: &GameSession, id: TargetId, now: f64) -> Option<TargetInfo> {
        session.registry().get(id).map(|t| TargetInfo {
            id,
            position: t.position,
            state: t.state,
            age_secs: t.reaction_time(now),
            opacity: 1.0 - t.fade_progress(now, session.registry().fade_secs()) as f32,
        })
    }

    /// Ids of every target in the scene, in spawn order.
    pub fn list_targets(session: &GameSession) -> Vec<TargetId> {
        session.registry().iter().map(|t| t.id).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub round: u32,
    pub score: u32,
    pub lives: u32,
    pub high_score: u32,
    pub mode: PlayMode,
    pub game_started: bool,
    pub alive_targets: usize,
    pub total_targets: usize,
    pub cubes_shot: u32,
    pub pending_tasks: usize,
    pub pending_events: usize,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: round={} score={} lives={} high={} mode={:?} started={} targets={}/{} shot={} tasks={} pending_events={}",
            self.round,
            self.score,
            self.lives,
            self.high_score,
            self.mode,
            self.game_started,
            self.alive_targets,
            self.total_targets,
            self.cubes_shot,
            self.pending_tasks,
            self.pending_events,
        )
    }
}

/// Detailed info about a single target.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetInfo {
    pub id: TargetId,
    pub position: Vec3,
    pub state: TargetState,
    /// Seconds since spawn.
    pub age_secs: f64,
    pub opacity: f32,
}

impl std::fmt::Display for TargetInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Target [{}] pos=({:.2}, {:.2}, {:.2}) {:?} age={:.2}s opacity={:.2}",
            self.id,
            self.position.x,
            self.position.y,
            self.position.z,
            self.state,
            self.age_secs,
            self.opacity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubehunt_kernel::GameConfig;

    fn session() -> GameSession {
        GameSession::new(GameConfig::default().with_seed(8), 120)
    }

    #[test]
    fn summary_idle_session() {
        let s = session();
        let summary = SessionInspector::summary(&s);
        assert_eq!(summary.round, 1);
        assert_eq!(summary.high_score, 120);
        assert!(!summary.game_started);
        assert_eq!(summary.total_targets, 0);
    }

    #[test]
    fn summary_running_session() {
        let mut s = session();
        s.start_game(0.0);
        let summary = SessionInspector::summary(&s);
        assert!(summary.game_started);
        assert_eq!(summary.alive_targets, 3);
        assert_eq!(summary.lives, 3);
        assert!(summary.pending_events > 0);
    }

    #[test]
    fn inspect_target_found() {
        let mut s = session();
        s.start_game(1.0);
        let ids = SessionInspector::list_targets(&s);
        assert_eq!(ids.len(), 3);

        let info = SessionInspector::inspect_target(&s, ids[0], 1.5).unwrap();
        assert_eq!(info.state, TargetState::Alive);
        assert_eq!(info.age_secs, 0.5);
        assert_eq!(info.opacity, 1.0);
    }

    #[test]
    fn inspect_target_not_found() {
        let s = session();
        assert!(SessionInspector::inspect_target(&s, TargetId(999), 0.0).is_none());
    }

    #[test]
    fn summary_display() {
        let s = session();
        let text = format!("{}", SessionInspector::summary(&s));
        assert!(text.contains("round=1"));
        assert!(text.contains("mode=Flat"));
    }
}
