//! Rendering Adapter: the scene graph and display sink seen from the game.
//!
//! # Invariants
//! - Rendering never mutates game truth; it reads events and the registry.
//! - Asset failures degrade the look, never the game.
//!
//! The real scene graph and DOM live outside this workspace. [`Scene`] and
//! [`Hud`] are the contracts they implement; [`RecordingScene`] and
//! [`TextHud`] are in-process versions for headless hosts and tests.

mod backdrop;
mod hud;
mod presenter;
mod renderer;
mod scene;

pub use backdrop::{Background, BackdropError, SKY_BLUE, resolve_backdrop, resolve_environment};
pub use hud::{Hud, TextHud};
pub use presenter::{HIT_COLOR, Presenter, TARGET_COLOR};
pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{RecordingScene, Scene, SceneObject};
