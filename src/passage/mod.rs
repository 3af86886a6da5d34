//! Tiered passage catalog. The catalog owns the one configuration-time
//! failure in the system: a passage that tokenizes to nothing is rejected
//! here, before a session starts, so the engine itself never sees a
//! zero-length reference.

use rand::Rng;
use rand::rngs::SmallRng;
use thiserror::Error;

use crate::engine::adaptive::DifficultyTier;
use crate::engine::reference::ReferenceSequence;

const BEGINNER_PASSAGES: &[&str] = &[
    "The sun came up over the hill. A small bird sat on the fence and sang.",
    "Tom has a red kite. The wind took it up and up, over the tall trees.",
    "The cat sat on the mat. She saw a fly on the wall and jumped at it.",
    "We went to the park today. The grass was wet, so we sat on the bench.",
    "A little dog ran down the road. He found a stick and brought it home.",
    "The moon is bright tonight. It shines on the pond like a silver coin.",
    "Mia put on her boots. She likes to splash in the puddles after rain.",
    "The farmer fed the hens at dawn. They pecked at the corn by the gate.",
];

const INTERMEDIATE_PASSAGES: &[&str] = &[
    "The river wound quietly through the green valley, and the mountains rose on \
     either side, their slopes covered with pine and late snow.",
    "She opened the door and stepped into the cool morning air, breathing deeply \
     as the first light of dawn crept over the rooftops.",
    "He picked up the old book and began to read, turning the pages slowly as the \
     story drew him deeper into its strange and wonderful world.",
    "They gathered around the fire, telling stories and laughing, while the wind \
     howled outside and the snow piled up against the door.",
    "The autumn wind scattered golden leaves across the garden as the last rays \
     of sunlight painted the clouds in shades of orange and pink.",
    "Morning mist hung low over the meadow as the first birds began their chorus \
     and dew sparkled on every blade of grass.",
    "The best time to plant a tree was twenty years ago; the second best time is \
     now, so do not wait any longer to begin.",
    "Deep in the forest, where the ancient trees stood tall and silent, a small \
     stream wound its way through moss-covered stones.",
];

const ADVANCED_PASSAGES: &[&str] = &[
    "It is a truth universally acknowledged, that a single man in possession of a \
     good fortune, must be in want of a wife.",
    "When you have eliminated the impossible, whatever remains, however \
     improbable, must be the truth — a rule worth remembering whenever a puzzle \
     seems to have no solution at all.",
    "I went to the woods because I wished to live deliberately, to front only the \
     essential facts of life, and see if I could not learn what it had to teach.",
    "Imagination is more important than knowledge, for while knowledge defines \
     all we currently know and understand, imagination points to all we might \
     yet discover and create.",
    "It was a bright cold day in April, and the clocks were striking thirteen, \
     while a thin wind hunted scraps of paper down the empty street.",
    "There is a stubbornness about me that never can bear to be frightened at the \
     will of others; my courage always rises at every attempt to intimidate me.",
    "The world is full of obvious things which nobody by any chance ever \
     observes, though they lie in plain sight for anyone patient enough to look.",
    "Whoever controls the past controls the future, and whoever controls the \
     present controls the past — an idea as unsettling now as the day it was \
     written.",
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("passage text contains no readable words")]
    EmptyPassage,
}

/// One selected passage: the display text plus its immutable token
/// sequence. Construction validates that the reference is non-empty.
#[derive(Clone, Debug)]
pub struct Passage {
    tier: DifficultyTier,
    text: String,
    reference: ReferenceSequence,
}

impl Passage {
    pub fn from_text(tier: DifficultyTier, text: &str) -> Result<Self, CatalogError> {
        let reference = ReferenceSequence::from_text(text);
        if reference.is_empty() {
            return Err(CatalogError::EmptyPassage);
        }
        Ok(Self {
            tier,
            text: text.to_string(),
            reference,
        })
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn reference(&self) -> &ReferenceSequence {
        &self.reference
    }
}

pub struct PassageCatalog {
    rng: SmallRng,
}

impl PassageCatalog {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }

    /// Pick a random passage from the tier's pool.
    pub fn select(&mut self, tier: DifficultyTier) -> Result<Passage, CatalogError> {
        let pool = tier_pool(tier);
        let idx = self.rng.gen_range(0..pool.len());
        Passage::from_text(tier, pool[idx])
    }
}

fn tier_pool(tier: DifficultyTier) -> &'static [&'static str] {
    match tier {
        DifficultyTier::Beginner => BEGINNER_PASSAGES,
        DifficultyTier::Intermediate => INTERMEDIATE_PASSAGES,
        DifficultyTier::Advanced => ADVANCED_PASSAGES,
    }
}
