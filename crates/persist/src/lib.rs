//! Persistence: the single persisted scalar, the high score.
//!
//! # Invariants
//! - A missing record reads as 0.
//! - A record that fails its checksum is never trusted.
//! - Store failures never reach gameplay; they degrade to an in-memory
//!   high score and surface an advisory.

pub mod keeper;
pub mod store;

pub use keeper::HighScoreKeeper;
pub use store::{HighScoreRecord, HighScoreStore, JsonFileStore, MemoryStore, StoreError};
