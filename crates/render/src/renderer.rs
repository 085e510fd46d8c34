use cubehunt_kernel::{GameSession, TargetState};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads session state at a point in time and produces output.
/// It never mutates the session.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `session` as of host time `now`.
    fn render(&self, session: &GameSession, now: f64) -> Self::Output;
}

/// Human-readable dump of the session, for the CLI, logs and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, session: &GameSession, now: f64) -> String {
        let hud = session.hud();
        let mut out = String::new();
        out.push_str(&format!(
            "=== Round {} | Score {} | Lives {} | High {} | {:?} ===\n",
            hud.round,
            hud.score,
            hud.lives,
            hud.high_score,
            session.mode()
        ));
        out.push_str(&format!(
            "Targets: {} ({} alive, {}/{} shot)",
            session.registry().len(),
            session.registry().alive_count(),
            session.cubes_shot(),
            session.cubes_per_round()
        ));
        if let Some(started) = session.round_started_at().filter(|_| session.game_started()) {
            out.push_str(&format!(" for {:.1}s", (now - started).max(0.0)));
        }
        out.push('\n');

        let fade_secs = session.registry().fade_secs();
        for target in session.registry().iter() {
            let p = target.position;
            let state = match target.state {
                TargetState::Alive => "alive".to_string(),
                TargetState::Hit => format!(
                    "hit, opacity {:.2}",
                    1.0 - target.fade_progress(now, fade_secs)
                ),
                TargetState::Expired => "expired".to_string(),
            };
            out.push_str(&format!(
                "  [{}] pos=({:.2}, {:.2}, {:.2}) {}\n",
                target.id, p.x, p.y, p.z, state
            ));
        }

        if !session.game_started() {
            out.push_str(if session.menu_visible() {
                "(menu)\n"
            } else {
                "(game over)\n"
            });
        }
        out
    }
}
