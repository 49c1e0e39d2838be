use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use replock_core::thresholds::{self, ThresholdConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detector: DetectorConfig,

    #[serde(default)]
    pub locks: LockDefaultsConfig,

    #[serde(default)]
    pub thresholds: ThresholdsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockDefaultsConfig {
    #[serde(default = "default_required_reps")]
    pub required_reps: u32,

    #[serde(default = "default_unlock_minutes")]
    pub unlock_minutes: i64,
}

/// Startup values for the live threshold store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_elbow_down")]
    pub elbow_down: f32,

    #[serde(default = "default_elbow_up")]
    pub elbow_up: f32,

    #[serde(default = "default_shoulder_down")]
    pub shoulder_down: f32,

    #[serde(default = "default_shoulder_up")]
    pub shoulder_up: f32,
}

// Default value functions
fn default_confidence_threshold() -> f32 {
    0.5
}

fn default_required_reps() -> u32 {
    10
}

fn default_unlock_minutes() -> i64 {
    30
}

fn default_elbow_down() -> f32 {
    thresholds::DEFAULT_ELBOW_DOWN_DEGREES
}

fn default_elbow_up() -> f32 {
    thresholds::DEFAULT_ELBOW_UP_DEGREES
}

fn default_shoulder_down() -> f32 {
    thresholds::DEFAULT_SHOULDER_DOWN_DEGREES
}

fn default_shoulder_up() -> f32 {
    thresholds::DEFAULT_SHOULDER_UP_DEGREES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            locks: LockDefaultsConfig::default(),
            thresholds: ThresholdsConfig::default(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

impl Default for LockDefaultsConfig {
    fn default() -> Self {
        Self {
            required_reps: default_required_reps(),
            unlock_minutes: default_unlock_minutes(),
        }
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            elbow_down: default_elbow_down(),
            elbow_up: default_elbow_up(),
            shoulder_down: default_shoulder_down(),
            shoulder_up: default_shoulder_up(),
        }
    }
}

impl ThresholdsConfig {
    /// Convert to the core threshold snapshot
    pub fn to_core(&self) -> ThresholdConfig {
        ThresholdConfig {
            elbow_down: self.elbow_down,
            elbow_up: self.elbow_up,
            shoulder_down: self.shoulder_down,
            shoulder_up: self.shoulder_up,
        }
    }
}

impl Config {
    /// Get config directory path (~/.replock/)
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("REPLOCK_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".replock"))
    }

    /// Get config file path (~/.replock/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_file = Self::config_file()?;

        if !config_file.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_file).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        let config_file = Self::config_file()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(())
    }
}
