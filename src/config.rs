use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::adaptive::{DifficultyTier, Thresholds};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_promote_wpm")]
    pub promote_wpm: u32,
    #[serde(default = "default_promote_accuracy")]
    pub promote_accuracy: u32,
    #[serde(default = "default_demote_wpm")]
    pub demote_wpm: u32,
    #[serde(default = "default_demote_accuracy")]
    pub demote_accuracy: u32,
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    #[serde(default = "default_starting_tier")]
    pub starting_tier: String,
}

fn default_promote_wpm() -> u32 {
    120
}
fn default_promote_accuracy() -> u32 {
    90
}
fn default_demote_wpm() -> u32 {
    70
}
fn default_demote_accuracy() -> u32 {
    75
}
fn default_cooldown_ms() -> u64 {
    6000
}
fn default_starting_tier() -> String {
    "beginner".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            promote_wpm: default_promote_wpm(),
            promote_accuracy: default_promote_accuracy(),
            demote_wpm: default_demote_wpm(),
            demote_accuracy: default_demote_accuracy(),
            cooldown_ms: default_cooldown_ms(),
            starting_tier: default_starting_tier(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lectio")
            .join("config.toml")
    }

    /// Clamp nonsense values from stale or hand-edited config files. The
    /// demote gates must sit strictly below the promote gates.
    pub fn validate(&mut self) {
        self.promote_accuracy = self.promote_accuracy.clamp(1, 100);
        self.promote_wpm = self.promote_wpm.max(1);
        if self.demote_wpm >= self.promote_wpm {
            self.demote_wpm = self.promote_wpm - 1;
        }
        if self.demote_accuracy >= self.promote_accuracy {
            self.demote_accuracy = self.promote_accuracy - 1;
        }
        if DifficultyTier::from_key(&self.starting_tier).is_none() {
            self.starting_tier = default_starting_tier();
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            promote_wpm: self.promote_wpm,
            promote_accuracy: self.promote_accuracy,
            demote_wpm: self.demote_wpm,
            demote_accuracy: self.demote_accuracy,
            cooldown: Duration::from_millis(self.cooldown_ms),
        }
    }

    pub fn starting_tier(&self) -> DifficultyTier {
        DifficultyTier::from_key(&self.starting_tier).unwrap_or_default()
    }
}
