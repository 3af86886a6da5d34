//! Secondary per-word scorer producing advisory pronunciation
//! suggestions. Words are paired positionally (by index), not by content
//! like the error heatmap: once the reader drifts, the two attribute
//! per-word trouble differently. This output is advisory only.

use crate::engine::scoring::levenshtein;
use crate::engine::tokenizer::tokenize;

/// Scores below this get one canned suggestion attached.
pub const SUGGESTION_THRESHOLD: u32 = 80;

const PENALTY_PER_EDIT: u32 = 25;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PronunciationFeedback {
    pub index: usize,
    pub spoken: String,
    pub target: String,
    pub score: u32,
    pub suggestion: Option<&'static str>,
}

/// Score one spoken/target pair: edit distance between the characters of
/// the normalized words, 25 points off per edit, floored at zero.
pub fn word_score(spoken: &str, target: &str) -> u32 {
    let spoken: Vec<char> = tokenize(spoken).join(" ").chars().collect();
    let target: Vec<char> = tokenize(target).join(" ").chars().collect();
    let distance = levenshtein(&spoken, &target) as u32;
    100u32.saturating_sub(distance.saturating_mul(PENALTY_PER_EDIT))
}

/// Pair transcript and reference tokens by index and score each pair.
/// Absence of a suggestion is not an error.
pub fn review(reference: &[String], transcript: &[String]) -> Vec<PronunciationFeedback> {
    transcript
        .iter()
        .zip(reference.iter())
        .enumerate()
        .map(|(index, (spoken, target))| {
            let score = word_score(spoken, target);
            let suggestion = if score < SUGGESTION_THRESHOLD {
                Some(suggest(spoken, target))
            } else {
                None
            };
            PronunciationFeedback {
                index,
                spoken: spoken.clone(),
                target: target.clone(),
                score,
                suggestion,
            }
        })
        .collect()
}

/// First matching pattern rule wins.
fn suggest(spoken: &str, target: &str) -> &'static str {
    if target.contains("th") && !spoken.contains("th") {
        return "Put the tip of your tongue between your teeth for the 'th' sound.";
    }
    if target.contains("ch") && !spoken.contains("ch") {
        return "The 'ch' sound is like in 'chair' — try the word once slowly.";
    }
    if target.contains("sh") && !spoken.contains("sh") {
        return "Round your lips slightly for the 'sh' sound.";
    }
    if target.contains("ph") && !spoken.contains("ph") {
        return "The letters 'ph' make an 'f' sound.";
    }
    let spoken_len = spoken.chars().count();
    let target_len = target.chars().count();
    if spoken_len + 2 <= target_len {
        return "Part of the word was missed — sound it out one syllable at a time.";
    }
    if spoken_len >= target_len + 2 {
        return "An extra sound slipped in — say the word once, slowly.";
    }
    "Listen to the word again and repeat it slowly."
}
