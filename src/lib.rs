//! Real-time reading-practice engine: aligns a live, error-prone speech
//! transcript against a known passage and derives progress, accuracy,
//! pace, a per-word error heatmap, and adaptive-difficulty decisions.
//!
//! The crate is a pure computation library. Speech recognition, speech
//! synthesis, passage display, and score rendering are external
//! collaborators; their only contracts with this core are the finalized
//! transcript fragments they feed in and the snapshots they render out.

pub mod config;
pub mod engine;
pub mod passage;
pub mod session;
pub mod store;

pub use config::Config;
pub use engine::adaptive::{AdaptiveController, DifficultyTier, TierDecision, Thresholds};
pub use engine::alignment::AlignmentState;
pub use engine::pronunciation::PronunciationFeedback;
pub use engine::scoring::ScoreSnapshot;
pub use passage::{CatalogError, Passage, PassageCatalog};
pub use session::{PositionSource, ReadingSession, SessionUpdate};
pub use session::result::ReadingResult;
pub use store::StatsRepository;
pub use store::json_store::JsonStore;
