//! Game Kernel: authoritative session state for the cube shooting gallery.
//!
//! Rounds, targets, score and lives live in one [`GameSession`]. Hosts feed it
//! aims and frame ticks, then drain its [`GameEvent`] log to drive the scene,
//! the display and the high-score store.
//!
//! # Invariants
//! - `lives <= max_lives`; `lives == 0` implies no game is running.
//! - At most one target is credited per aim; a hit target is never hit again.
//! - `cubes_shot <= cubes_per_round`; rounds advance by exactly one.
//! - Delayed work never outlives the session that scheduled it.

pub mod config;
pub mod dispatch;
pub mod event;
mod frame;
pub mod immersive;
pub mod placement;
pub mod round;
pub mod schedule;
pub mod scoring;
pub mod session;
pub mod target;

pub use config::{ConfigError, GameConfig, ScoringPolicy};
pub use dispatch::{IgnoreReason, ShotOutcome};
pub use event::{GameEvent, HudState};
pub use immersive::{DeviceInfo, ImmersiveSupport};
pub use placement::{PlacementPolicy, PlayMode};
pub use round::RoundController;
pub use schedule::{Scheduler, TaskKind};
pub use scoring::{GameOverOutcome, Scoreboard};
pub use session::GameSession;
pub use target::{Motion, Target, TargetRegistry, TargetState};
