use cubehunt_kernel::{GameEvent, GameSession};

use crate::hud::Hud;
use crate::scene::Scene;

/// Color of a live target.
pub const TARGET_COLOR: u32 = 0x00ff00;
/// Color a target turns when hit, for the length of its fade.
pub const HIT_COLOR: u32 = 0xff0000;

/// Pushes drained session events to the scene and the display.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    target_size: f32,
}

impl Presenter {
    pub fn new(target_size: f32) -> Self {
        Self { target_size }
    }

    pub fn for_session(session: &GameSession) -> Self {
        Self::new(session.registry().target_size())
    }

    pub fn present(&self, events: &[GameEvent], scene: &mut impl Scene, hud: &mut impl Hud) {
        for event in events {
            match event {
                GameEvent::TargetSpawned { id, position } => {
                    scene.add_target(*id, *position, self.target_size, TARGET_COLOR);
                }
                GameEvent::TargetHit { id, .. } => scene.set_color(*id, HIT_COLOR),
                GameEvent::TargetRemoved { id } => scene.remove_target(*id),
                GameEvent::Missed { .. } => {}
                GameEvent::HudChanged(state) => hud.set_state(*state),
                GameEvent::RoundAnnounced { round } => {
                    hud.show_announcement(&format!("Round {round}"));
                }
                GameEvent::AnnouncementDismissed => hud.hide_announcement(),
                GameEvent::GameOver {
                    score,
                    high_score,
                    new_record,
                } => hud.show_game_over(*score, *high_score, *new_record),
                // The store consumes this one.
                GameEvent::HighScoreBeaten { .. } => {}
                GameEvent::MenuShown => hud.show_menu(),
                GameEvent::MenuHidden => hud.hide_menu(),
                GameEvent::ModeChanged { mode } => tracing::debug!(?mode, "mode changed"),
                GameEvent::Advisory(text) => hud.show_advisory(text),
            }
        }
    }

    /// Copy per-frame positions and fade opacity from the registry.
    ///
    /// Motion and fade are not logged as events, so hosts call this after
    /// every [`GameSession::update`].
    pub fn sync_frame(&self, session: &GameSession, now: f64, scene: &mut impl Scene) {
        let fade_secs = session.registry().fade_secs();
        for target in session.registry().iter() {
            scene.set_position(target.id, target.position);
            let opacity = 1.0 - target.fade_progress(now, fade_secs) as f32;
            scene.set_opacity(target.id, opacity);
        }
    }
}
