//! Hysteresis-gated difficulty controller. Evaluated on every new score
//! snapshot; transitions move exactly one tier step and are suppressed
//! while the cooldown window since the previous transition is open.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::scoring::ScoreSnapshot;
use crate::store::StatsRepository;
use crate::store::schema::StatsEntry;

// --- Difficulty tier ---

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    pub fn all() -> &'static [DifficultyTier] {
        &[
            DifficultyTier::Beginner,
            DifficultyTier::Intermediate,
            DifficultyTier::Advanced,
        ]
    }

    pub fn to_key(self) -> &'static str {
        match self {
            DifficultyTier::Beginner => "beginner",
            DifficultyTier::Intermediate => "intermediate",
            DifficultyTier::Advanced => "advanced",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "beginner" => Some(DifficultyTier::Beginner),
            "intermediate" => Some(DifficultyTier::Intermediate),
            "advanced" => Some(DifficultyTier::Advanced),
            _ => None,
        }
    }

    /// Next tier up, or `None` at the top.
    pub fn promote(self) -> Option<Self> {
        match self {
            DifficultyTier::Beginner => Some(DifficultyTier::Intermediate),
            DifficultyTier::Intermediate => Some(DifficultyTier::Advanced),
            DifficultyTier::Advanced => None,
        }
    }

    /// Next tier down, or `None` at the bottom.
    pub fn demote(self) -> Option<Self> {
        match self {
            DifficultyTier::Beginner => None,
            DifficultyTier::Intermediate => Some(DifficultyTier::Beginner),
            DifficultyTier::Advanced => Some(DifficultyTier::Intermediate),
        }
    }

    /// Reading-aloud pace used by playback-driven highlighting.
    pub fn reading_rate_wpm(self) -> u32 {
        match self {
            DifficultyTier::Beginner => 80,
            DifficultyTier::Intermediate => 110,
            DifficultyTier::Advanced => 140,
        }
    }
}

// --- Controller ---

/// Transition gate values. Defaults match the shipped behavior; `Config`
/// may override them within validated bounds.
#[derive(Clone, Copy, Debug)]
pub struct Thresholds {
    pub promote_wpm: u32,
    pub promote_accuracy: u32,
    pub demote_wpm: u32,
    pub demote_accuracy: u32,
    pub cooldown: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            promote_wpm: 120,
            promote_accuracy: 90,
            demote_wpm: 70,
            demote_accuracy: 75,
            cooldown: Duration::from_millis(6000),
        }
    }
}

/// Outcome of one controller tick. `transitioned` doubles as the change
/// notice for the UI collaborator, which owns auto-expiring it from
/// display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierDecision {
    pub tier: DifficultyTier,
    pub transitioned: bool,
}

pub struct AdaptiveController {
    thresholds: Thresholds,
    current_tier: DifficultyTier,
    last_transition: Option<Instant>,
    repository: Option<(Box<dyn StatsRepository>, String)>,
}

impl AdaptiveController {
    pub fn new(tier: DifficultyTier) -> Self {
        Self::with_thresholds(tier, Thresholds::default())
    }

    pub fn with_thresholds(tier: DifficultyTier, thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            current_tier: tier,
            last_transition: None,
            repository: None,
        }
    }

    /// Inject the stats repository and restore the tier persisted under
    /// `key`, if any. The controller never touches ambient global state;
    /// all persistence goes through this seam.
    pub fn attach_repository(&mut self, repository: Box<dyn StatsRepository>, key: &str) {
        if let Some(entry) = repository.load(key) {
            self.current_tier = entry.tier;
        }
        self.repository = Some((repository, key.to_string()));
    }

    pub fn current_tier(&self) -> DifficultyTier {
        self.current_tier
    }

    /// One controller tick. Promotion is checked before demotion and at
    /// most one single-step transition applies; a transition inside the
    /// cooldown window is suppressed without updating the cooldown clock.
    pub fn evaluate(&mut self, snapshot: &ScoreSnapshot, now: Instant) -> TierDecision {
        let t = &self.thresholds;
        let target = if snapshot.wpm >= t.promote_wpm && snapshot.accuracy >= t.promote_accuracy {
            self.current_tier.promote()
        } else if (snapshot.wpm > 0 && snapshot.wpm <= t.demote_wpm)
            || snapshot.accuracy <= t.demote_accuracy
        {
            self.current_tier.demote()
        } else {
            None
        };

        let Some(next) = target else {
            return TierDecision {
                tier: self.current_tier,
                transitioned: false,
            };
        };

        if !self.cooldown_elapsed(now) {
            return TierDecision {
                tier: self.current_tier,
                transitioned: false,
            };
        }

        self.current_tier = next;
        self.last_transition = Some(now);
        info!(
            tier = next.to_key(),
            wpm = snapshot.wpm,
            accuracy = snapshot.accuracy,
            "difficulty tier changed"
        );
        self.persist_tier();

        TierDecision {
            tier: next,
            transitioned: true,
        }
    }

    /// Fold a finished session's scores into the persisted bests.
    pub fn save_best(&self, snapshot: &ScoreSnapshot) {
        let Some((repository, key)) = &self.repository else {
            return;
        };
        let mut entry = repository.load(key).unwrap_or_default();
        entry.best_wpm = entry.best_wpm.max(snapshot.wpm);
        entry.best_accuracy = entry.best_accuracy.max(snapshot.accuracy);
        entry.tier = self.current_tier;
        if let Err(err) = repository.save(key, &entry) {
            warn!(key = %key, "failed to save reading stats: {err}");
        }
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_transition {
            None => true,
            Some(last) => now
                .checked_duration_since(last)
                .is_some_and(|elapsed| elapsed >= self.thresholds.cooldown),
        }
    }

    fn persist_tier(&self) {
        let Some((repository, key)) = &self.repository else {
            return;
        };
        let mut entry = repository.load(key).unwrap_or_default();
        entry.tier = self.current_tier;
        if let Err(err) = repository.save(key, &entry) {
            warn!(key = %key, "failed to save difficulty tier: {err}");
        }
    }
}
