use cubehunt_common::{InputSource, TargetId};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::placement::PlayMode;

/// What the score/lives/round display should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HudState {
    pub round: u32,
    pub score: u32,
    pub lives: u32,
    pub high_score: u32,
}

/// One record per observable mutation of the session.
///
/// The log is the push interface to the outside: hosts drain it after each
/// input event or frame and forward it to the scene, the display and the
/// high-score store. Per-frame motion and fade are not logged; renderers read
/// those straight from the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new target entered the scene.
    TargetSpawned { id: TargetId, position: Vec3 },
    /// A target was credited to a shot and starts fading.
    TargetHit {
        id: TargetId,
        source: InputSource,
        points: u32,
        reaction_secs: f64,
    },
    /// A target left the scene (faded out, cleared by a new round, reset or game over).
    TargetRemoved { id: TargetId },
    /// A shot hit nothing.
    Missed { source: InputSource, penalty: u32 },
    /// Round, score, lives or high score changed.
    HudChanged(HudState),
    /// Show the transient "Round N" overlay.
    RoundAnnounced { round: u32 },
    /// Hide the overlay again.
    AnnouncementDismissed,
    /// Lives ran out. `new_record` is set when the score beat the previous high score.
    GameOver {
        score: u32,
        high_score: u32,
        new_record: bool,
    },
    /// The high score changed and should be persisted.
    HighScoreBeaten { high_score: u32 },
    /// Show the start menu (after game over).
    MenuShown,
    /// Hide the start menu (game started).
    MenuHidden,
    /// Flat/immersive mode switched.
    ModeChanged { mode: PlayMode },
    /// A capability or boundary failure degraded the game; the text is user-facing.
    Advisory(String),
}
