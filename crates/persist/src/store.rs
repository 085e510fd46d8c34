//! High-score stores.
//!
//! The file store keeps one JSON record inside its directory:
//! ```text
//! highscore.json   - { schema_version, high_score, sha256 }
//! ```
//! Writes go to `highscore.json.tmp` first and are renamed into place.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Current record schema version.
const SCHEMA_VERSION: u32 = 1;

const RECORD_FILE: &str = "highscore.json";

/// Errors from high-score persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },
    #[error("schema version mismatch: file has v{file_version}, expected v{expected_version}")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
}

impl StoreError {
    /// The record was read but cannot be trusted, so overwriting it loses nothing.
    ///
    /// A record from a newer schema is not ours to overwrite and does not count.
    pub fn is_corrupt(&self) -> bool {
        match self {
            Self::Json(err) => !err.is_io(),
            Self::IntegrityMismatch { .. } => true,
            Self::Io(_) | Self::SchemaMismatch { .. } => false,
        }
    }
}

/// Somewhere the high score survives between sessions.
pub trait HighScoreStore {
    /// Read the stored high score; 0 when nothing has been stored yet.
    fn load(&self) -> Result<u32, StoreError>;

    fn save(&mut self, high_score: u32) -> Result<(), StoreError>;

    /// Short human-readable location, for logs and the CLI.
    fn describe(&self) -> String;
}

/// On-disk form of the high score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub schema_version: u32,
    pub high_score: u32,
    pub sha256: String,
}

impl HighScoreRecord {
    pub fn new(high_score: u32) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            high_score,
            sha256: checksum(SCHEMA_VERSION, high_score),
        }
    }

    pub fn verify(&self) -> Result<(), StoreError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(StoreError::SchemaMismatch {
                file_version: self.schema_version,
                expected_version: SCHEMA_VERSION,
            });
        }
        let actual = checksum(self.schema_version, self.high_score);
        if actual != self.sha256 {
            return Err(StoreError::IntegrityMismatch {
                expected: self.sha256.clone(),
                actual,
            });
        }
        Ok(())
    }
}

/// JSON file store rooted at a directory.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn record_path(&self) -> PathBuf {
        self.root.join(RECORD_FILE)
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, StoreError> {
        let path = self.record_path();
        if !path.exists() {
            return Ok(0);
        }
        let record: HighScoreRecord = serde_json::from_reader(std::fs::File::open(&path)?)?;
        record.verify()?;
        Ok(record.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<(), StoreError> {
        let path = self.record_path();
        let tmp = path.with_extension("json.tmp");
        serde_json::to_writer_pretty(
            std::fs::File::create(&tmp)?,
            &HighScoreRecord::new(high_score),
        )?;
        std::fs::rename(&tmp, &path)?;
        tracing::debug!(high_score, path = %path.display(), "high score saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.record_path().display().to_string()
    }
}

/// Non-persistent store; the fallback when the file store is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    high_score: u32,
}

impl MemoryStore {
    pub fn new(high_score: u32) -> Self {
        Self { high_score }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, StoreError> {
        Ok(self.high_score)
    }

    fn save(&mut self, high_score: u32) -> Result<(), StoreError> {
        self.high_score = high_score;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}

fn checksum(schema_version: u32, high_score: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(schema_version.to_le_bytes());
    hasher.update(high_score.to_le_bytes());
    format!("{:x}", hasher.finalize())
}
