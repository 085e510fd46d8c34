use std::path::Path;

use cubehunt_kernel::GameEvent;

use crate::store::{HighScoreStore, JsonFileStore, MemoryStore};

const UNAVAILABLE_ADVISORY: &str = "High score storage is unavailable; scores will not be saved.";
const CORRUPT_ADVISORY: &str = "The saved high score was unreadable and starts again from 0.";

/// Keeps the persisted high score in step with a running session.
///
/// Hosts drain session events and hand them to [`HighScoreKeeper::apply`].
/// If the backing store fails at any point the keeper swaps in a
/// [`MemoryStore`] and reports an advisory, so play carries on unsaved.
/// A corrupt record is not a failure: the keeper starts from 0 and the
/// next save replaces it.
pub struct HighScoreKeeper {
    store: Box<dyn HighScoreStore>,
    high_score: u32,
    degraded: bool,
}

impl HighScoreKeeper {
    /// Load the high score from `store`.
    ///
    /// Returns the keeper and, when the store could not be read, the
    /// advisory text the host should show.
    pub fn open(store: Box<dyn HighScoreStore>) -> (Self, Option<String>) {
        match store.load() {
            Err(err) if err.is_corrupt() => {
                tracing::warn!(%err, store = %store.describe(), "stored high score is corrupt, starting from 0");
                (
                    Self {
                        store,
                        high_score: 0,
                        degraded: false,
                    },
                    Some(CORRUPT_ADVISORY.to_string()),
                )
            }
            Ok(high_score) => {
                tracing::info!(high_score, store = %store.describe(), "high score loaded");
                (
                    Self {
                        store,
                        high_score,
                        degraded: false,
                    },
                    None,
                )
            }
            Err(err) => {
                tracing::warn!(%err, store = %store.describe(), "high score store unavailable, using memory");
                (Self::in_memory(0), Some(UNAVAILABLE_ADVISORY.to_string()))
            }
        }
    }

    /// Open a [`JsonFileStore`] at `dir`, falling back to memory if the
    /// directory cannot be used.
    pub fn open_dir(dir: impl AsRef<Path>) -> (Self, Option<String>) {
        match JsonFileStore::open(dir.as_ref()) {
            Ok(store) => Self::open(Box::new(store)),
            Err(err) => {
                tracing::warn!(%err, dir = %dir.as_ref().display(), "high score directory unusable, using memory");
                (Self::in_memory(0), Some(UNAVAILABLE_ADVISORY.to_string()))
            }
        }
    }

    /// A keeper with no persistent backing.
    pub fn in_memory(high_score: u32) -> Self {
        Self {
            store: Box::new(MemoryStore::new(high_score)),
            high_score,
            degraded: true,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether the keeper fell back to memory.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn describe(&self) -> String {
        self.store.describe()
    }

    /// Persist any new high score found in `events`.
    ///
    /// Returns advisories raised while saving (at most one per failure).
    pub fn apply(&mut self, events: &[GameEvent]) -> Vec<String> {
        let mut advisories = Vec::new();
        for event in events {
            if let GameEvent::HighScoreBeaten { high_score } = event {
                if *high_score <= self.high_score {
                    continue;
                }
                self.high_score = *high_score;
                if let Err(advisory) = self.save() {
                    advisories.push(advisory);
                }
            }
        }
        advisories
    }

    /// Clear the stored high score.
    pub fn reset(&mut self) -> Option<String> {
        self.high_score = 0;
        self.save().err()
    }

    fn save(&mut self) -> Result<(), String> {
        match self.store.save(self.high_score) {
            Ok(()) => {
                tracing::info!(high_score = self.high_score, "high score persisted");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, store = %self.store.describe(), "high score save failed, using memory");
                self.store = Box::new(MemoryStore::new(self.high_score));
                self.degraded = true;
                Err(UNAVAILABLE_ADVISORY.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use cubehunt_common::{Aim, InputSource, Ray};
    use cubehunt_kernel::{GameConfig, GameSession};
    use glam::Vec3;

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&self) -> Result<u32, StoreError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn save(&mut self, _high_score: u32) -> Result<(), StoreError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn describe(&self) -> String {
            "broken".into()
        }
    }

    /// Loads fine, then refuses every write.
    struct ReadOnlyStore(u32);

    impl HighScoreStore for ReadOnlyStore {
        fn load(&self) -> Result<u32, StoreError> {
            Ok(self.0)
        }

        fn save(&mut self, _high_score: u32) -> Result<(), StoreError> {
            Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into())
        }

        fn describe(&self) -> String {
            "read-only".into()
        }
    }

    fn play_one_hit_then_lose(session: &mut GameSession) {
        session.start_game(0.0);
        let target = session.registry().iter().next().unwrap().position;
        session.handle_aim(
            Aim {
                source: InputSource::Pointer,
                ray: Ray::new(target + Vec3::Z * 5.0, Vec3::NEG_Z),
            },
            0.5,
        );
        for i in 0..3 {
            session.handle_aim(
                Aim {
                    source: InputSource::Pointer,
                    ray: Ray::new(Vec3::new(0.0, -20.0, 5.0), Vec3::NEG_Y),
                },
                1.0 + i as f64,
            );
        }
    }

    #[test]
    fn new_record_is_written_through() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let (mut keeper, advisory) = HighScoreKeeper::open(Box::new(store));
        assert!(advisory.is_none());
        assert_eq!(keeper.high_score(), 0);

        let advisories = keeper.apply(&[GameEvent::HighScoreBeaten { high_score: 250 }]);
        assert!(advisories.is_empty());
        assert_eq!(keeper.high_score(), 250);

        let reopened = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load().unwrap(), 250);
    }

    #[test]
    fn lower_scores_do_not_overwrite() {
        let (mut keeper, _) = HighScoreKeeper::open(Box::new(MemoryStore::new(300)));
        keeper.apply(&[
            GameEvent::HighScoreBeaten { high_score: 200 },
            GameEvent::GameOver {
                score: 200,
                high_score: 300,
                new_record: false,
            },
        ]);
        assert_eq!(keeper.high_score(), 300);
    }

    #[test]
    fn unreadable_store_falls_back_to_memory() {
        let (mut keeper, advisory) = HighScoreKeeper::open(Box::new(BrokenStore));
        assert!(advisory.is_some());
        assert!(keeper.is_degraded());
        assert_eq!(keeper.describe(), "memory");
        assert!(keeper.apply(&[GameEvent::HighScoreBeaten { high_score: 10 }]).is_empty());
        assert_eq!(keeper.high_score(), 10);
    }

    #[test]
    fn corrupt_record_is_replaced_by_the_next_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        std::fs::write(store.record_path(), b"garbage").unwrap();

        let (mut keeper, advisory) = HighScoreKeeper::open_dir(dir.path());
        assert_eq!(advisory.as_deref(), Some(CORRUPT_ADVISORY));
        assert!(!keeper.is_degraded());
        assert_eq!(keeper.high_score(), 0);

        assert!(keeper.apply(&[GameEvent::HighScoreBeaten { high_score: 500 }]).is_empty());
        assert_eq!(store.load().unwrap(), 500);
    }

    #[test]
    fn unusable_directory_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let (keeper, advisory) = HighScoreKeeper::open_dir(blocker.join("scores"));
        assert!(advisory.is_some());
        assert!(keeper.is_degraded());
    }

    #[test]
    fn open_dir_reads_existing_record() {
        let dir = tempfile::tempdir().unwrap();
        JsonFileStore::open(dir.path()).unwrap().save(64).unwrap();
        let (keeper, advisory) = HighScoreKeeper::open_dir(dir.path());
        assert!(advisory.is_none());
        assert_eq!(keeper.high_score(), 64);
    }

    #[test]
    fn failed_save_degrades_once() {
        let (mut keeper, advisory) = HighScoreKeeper::open(Box::new(ReadOnlyStore(40)));
        assert!(advisory.is_none());
        assert_eq!(keeper.high_score(), 40);

        let first = keeper.apply(&[GameEvent::HighScoreBeaten { high_score: 90 }]);
        assert_eq!(first.len(), 1);
        assert!(keeper.is_degraded());
        assert_eq!(keeper.high_score(), 90);

        let second = keeper.apply(&[GameEvent::HighScoreBeaten { high_score: 120 }]);
        assert!(second.is_empty());
        assert_eq!(keeper.high_score(), 120);
    }

    #[test]
    fn high_score_survives_session_reset() {
        let dir = tempfile::tempdir().unwrap();
        let (mut keeper, _) =
            HighScoreKeeper::open(Box::new(JsonFileStore::open(dir.path()).unwrap()));

        let mut first = GameSession::new(GameConfig::default().with_seed(5), keeper.high_score());
        play_one_hit_then_lose(&mut first);
        let events = first.drain_events();
        keeper.apply(&events);
        let record = first.high_score();
        assert!(record > 0);

        let (keeper, _) =
            HighScoreKeeper::open(Box::new(JsonFileStore::open(dir.path()).unwrap()));
        let second = GameSession::new(GameConfig::default().with_seed(6), keeper.high_score());
        assert_eq!(second.high_score(), record);
        assert_eq!(second.hud().high_score, record);
    }

    #[test]
    fn reset_zeroes_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        store.save(77).unwrap();
        let (mut keeper, _) = HighScoreKeeper::open(Box::new(store));
        assert_eq!(keeper.high_score(), 77);
        assert!(keeper.reset().is_none());
        assert_eq!(JsonFileStore::open(dir.path()).unwrap().load().unwrap(), 0);
    }
}
