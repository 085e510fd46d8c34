use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::placement::PlacementPolicy;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How a hit is converted to points, given the reaction time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// `max(floor, base - floor(reaction * per_second))`.
    Decay {
        base: u32,
        per_second: f64,
        floor: u32,
    },
    /// `base + fast_bonus` under `fast_secs`, `base - slow_penalty` over `slow_secs`, else `base`.
    Threshold {
        base: u32,
        fast_secs: f64,
        fast_bonus: u32,
        slow_secs: f64,
        slow_penalty: u32,
    },
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::Decay {
            base: 100,
            per_second: 20.0,
            floor: 50,
        }
    }
}

impl ScoringPolicy {
    /// Points awarded for a hit after `reaction_secs`. Negative reactions count as instant.
    pub fn points(&self, reaction_secs: f64) -> u32 {
        let reaction = reaction_secs.max(0.0);
        match *self {
            Self::Decay {
                base,
                per_second,
                floor,
            } => {
                let decayed = i64::from(base) - (reaction * per_second).floor() as i64;
                decayed.max(i64::from(floor)).max(0) as u32
            }
            Self::Threshold {
                base,
                fast_secs,
                fast_bonus,
                slow_secs,
                slow_penalty,
            } => {
                if reaction < fast_secs {
                    base.saturating_add(fast_bonus)
                } else if reaction > slow_secs {
                    base.saturating_sub(slow_penalty)
                } else {
                    base
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = match *self {
            Self::Decay { per_second, .. } => vec![("scoring.per_second", per_second)],
            Self::Threshold {
                fast_secs,
                slow_secs,
                ..
            } => vec![("scoring.fast_secs", fast_secs), ("scoring.slow_secs", slow_secs)],
        };
        for (name, value) in fields {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number"
                )));
            }
        }
        Ok(())
    }
}

/// All gameplay tunables. Every field has a default, so partial JSON files are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Targets spawned per round; a round completes when all are shot.
    pub cubes_per_round: u32,
    /// Starting lives and the cap that hits refill to.
    pub max_lives: u32,
    /// Delay between the last hit of a round and the next round's spawn.
    pub round_delay_secs: f64,
    /// Fade window after a hit before the target is removed.
    pub fade_secs: f64,
    /// How long the "Round N" overlay stays up.
    pub announcement_secs: f64,
    /// Delay between game over and the menu coming back.
    pub menu_return_secs: f64,
    /// Edge length of a target cube.
    pub target_size: f32,
    /// Per-round increase of the motion speed multiplier.
    pub speed_step: f32,
    /// Wander amplitude in units per second at speed 1.
    pub wander_rate: f32,
    /// Immersive-mode depth drift in units per second at speed 1.
    pub drift_rate: f32,
    pub placement: PlacementPolicy,
    pub scoring: ScoringPolicy,
    /// Points lost on a miss (score never drops below zero).
    pub miss_penalty: u32,
    /// Fixed RNG seed for reproducible placement. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cubes_per_round: 3,
            max_lives: 3,
            round_delay_secs: 1.5,
            fade_secs: 1.5,
            announcement_secs: 1.5,
            menu_return_secs: 2.0,
            target_size: 0.3,
            speed_step: 0.1,
            wander_rate: 0.3,
            drift_rate: 0.18,
            placement: PlacementPolicy::default(),
            scoring: ScoringPolicy::default(),
            miss_penalty: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cubes_per_round == 0 {
            return Err(ConfigError::Invalid("cubes_per_round must be at least 1".into()));
        }
        if self.max_lives == 0 {
            return Err(ConfigError::Invalid("max_lives must be at least 1".into()));
        }
        if !(self.target_size > 0.0) {
            return Err(ConfigError::Invalid("target_size must be positive".into()));
        }
        let durations = [
            ("round_delay_secs", self.round_delay_secs),
            ("fade_secs", self.fade_secs),
            ("announcement_secs", self.announcement_secs),
            ("menu_return_secs", self.menu_return_secs),
        ];
        for (name, value) in durations {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number of seconds"
                )));
            }
        }
        let rates = [
            ("speed_step", self.speed_step),
            ("wander_rate", self.wander_rate),
            ("drift_rate", self.drift_rate),
        ];
        for (name, value) in rates {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number"
                )));
            }
        }
        self.scoring.validate()
    }

    /// Motion speed multiplier for `round` (1-based).
    pub fn speed_for_round(&self, round: u32) -> f32 {
        1.0 + round.saturating_sub(1) as f32 * self.speed_step
    }
}
