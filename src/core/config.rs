// Tunable battle configuration
//
// Every balance constant the battle rules depend on lives here so that both
// peers can be launched from the same JSON file.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Balance and timing constants for a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Extra damage fraction per combo step (damage = base * (1 + combo * multiplier))
    pub combo_multiplier: f32,
    /// Damage dealt is divided by this to get the victim's special gain
    pub damage_to_special_divisor: f32,
    /// Round wins needed to take the match
    pub wins_needed: u32,

    // Timing (seconds)
    /// Countdown shown before each round becomes active
    pub countdown_secs: f32,
    /// How long the round result is announced before the next round
    pub announce_delay_secs: f32,
    /// Delay between the final round result and the match verdict
    pub match_over_delay_secs: f32,

    // Display smoothing
    /// Max change per tick of a displayed special bar
    pub special_bar_step: f32,
    /// Max change per tick of a displayed health bar
    pub health_bar_step: f32,

    // Result text thresholds (winner's residual health ratio)
    pub perfect_ratio: f32,
    pub close_ratio: f32,

    /// Longest answer the keypad accepts
    pub max_answer_digits: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            combo_multiplier: 0.1,
            damage_to_special_divisor: 100.0,
            wins_needed: 3,

            countdown_secs: 3.0,
            announce_delay_secs: 3.0,
            match_over_delay_secs: 3.0,

            special_bar_step: 0.01,
            health_bar_step: 1.0,

            perfect_ratio: 0.99,
            close_ratio: 0.10,

            max_answer_digits: 9,
        }
    }
}

impl BattleConfig {
    /// Parse and validate a config from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded battle config from {}", path.display());
        Ok(config)
    }

    /// Reject values the battle rules cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.combo_multiplier.is_finite() && self.combo_multiplier >= 0.0) {
            return Err(invalid("combo_multiplier", "must be finite and >= 0"));
        }
        if !(self.damage_to_special_divisor.is_finite() && self.damage_to_special_divisor > 0.0) {
            return Err(invalid("damage_to_special_divisor", "must be > 0"));
        }
        if self.wins_needed == 0 {
            return Err(invalid("wins_needed", "must be at least 1"));
        }
        for (field, secs) in [
            ("countdown_secs", self.countdown_secs),
            ("announce_delay_secs", self.announce_delay_secs),
            ("match_over_delay_secs", self.match_over_delay_secs),
        ] {
            if !(secs.is_finite() && secs >= 0.0) {
                return Err(invalid(field, "must be a non-negative duration"));
            }
        }
        for (field, step) in [
            ("special_bar_step", self.special_bar_step),
            ("health_bar_step", self.health_bar_step),
        ] {
            if !(step.is_finite() && step > 0.0) {
                return Err(invalid(field, "must be > 0"));
            }
        }
        if !(0.0..=1.0).contains(&self.close_ratio) || !(0.0..=1.0).contains(&self.perfect_ratio) {
            return Err(invalid("close_ratio", "ratios must lie in [0, 1]"));
        }
        if self.close_ratio >= self.perfect_ratio {
            return Err(invalid(
                "close_ratio",
                format!(
                    "{} must be below perfect_ratio {}",
                    self.close_ratio, self.perfect_ratio
                ),
            ));
        }
        if self.max_answer_digits == 0 {
            return Err(invalid("max_answer_digits", "must be at least 1"));
        }
        Ok(())
    }
}
