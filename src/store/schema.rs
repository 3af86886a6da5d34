use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::adaptive::DifficultyTier;

const SCHEMA_VERSION: u32 = 1;

/// Persisted bests and the saved tier for one stats key (a passage or
/// feature identifier). Session histories are deliberately not stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsEntry {
    pub tier: DifficultyTier,
    pub best_wpm: u32,
    pub best_accuracy: u32,
    pub updated_at: DateTime<Utc>,
}

impl Default for StatsEntry {
    fn default() -> Self {
        Self {
            tier: DifficultyTier::Beginner,
            best_wpm: 0,
            best_accuracy: 0,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileData {
    pub schema_version: u32,
    pub entries: HashMap<String, StatsEntry>,
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries: HashMap::new(),
        }
    }
}

impl ProfileData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
