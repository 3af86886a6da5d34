use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::adaptive::DifficultyTier;
use crate::engine::alignment::AlignmentState;
use crate::engine::scoring::ScoreSnapshot;

/// Summary of a finished reading session, stamped when the session stops.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReadingResult {
    pub accuracy: u32,
    pub wpm: u32,
    pub words_read: usize,
    pub progress_percent: u32,
    pub error_count: u32,
    pub elapsed_secs: f64,
    pub tier: DifficultyTier,
    pub timestamp: DateTime<Utc>,
}

impl ReadingResult {
    pub fn from_parts(
        snapshot: &ScoreSnapshot,
        alignment: &AlignmentState,
        tier: DifficultyTier,
        elapsed_secs: f64,
    ) -> Self {
        Self {
            accuracy: snapshot.accuracy,
            wpm: snapshot.wpm,
            words_read: snapshot.words_read,
            progress_percent: snapshot.progress_percent,
            error_count: alignment.errors.iter().sum(),
            elapsed_secs,
            tier,
            timestamp: Utc::now(),
        }
    }
}
