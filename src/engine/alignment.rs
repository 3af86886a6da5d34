//! Keeps a progress pointer and a per-position error heatmap synchronized
//! with an ever-growing transcript, tolerant of recognizer insertions,
//! deletions, and substitutions.
//!
//! Both entry points are pure: callers pass the full current buffers on
//! every invocation and get a reproducible `AlignmentState` back, so a
//! growing transcript is handled by recomputing from scratch (buffers stay
//! under a few hundred words in a reading session, which keeps this cheap).

/// Reference positions scanned ahead of the cursor when the current pair
/// mismatches. Models the reader skipping up to `LOOKAHEAD_WINDOW - 1`
/// reference words (a recognizer deletion).
pub const LOOKAHEAD_WINDOW: usize = 3;

/// Per-reference-position alignment outcome.
///
/// `errors` accumulates one count per discrepancy observed in a single
/// pass: a substitution, a skipped word, or reference content never
/// reached by the transcript.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlignmentState {
    pub matched: Vec<bool>,
    pub errors: Vec<u32>,
    pub read_pointer: usize,
}

/// Advisory highlight pointer: forward-greedy scan of the reference.
///
/// For each transcript token in order, the reference cursor advances while
/// it does not match (bounded by the reference length), then consumes one
/// position on a match. Monotonic non-decreasing as matching tokens are
/// appended; a stray token that never matches again runs the cursor to the
/// end, which is acceptable for highlighting but not for error
/// attribution. Error attribution is what [`align`] is for.
pub fn progress_pointer(reference: &[String], transcript: &[String]) -> usize {
    let mut cursor = 0;
    for word in transcript {
        while cursor < reference.len() && reference[cursor] != *word {
            cursor += 1;
        }
        if cursor < reference.len() {
            cursor += 1;
        }
    }
    cursor
}

/// Rigorous single forward pass producing the error heatmap.
///
/// Cursor `i` walks the reference, `j` the transcript. Equal tokens match
/// and advance both. On a mismatch, the next `LOOKAHEAD_WINDOW - 1`
/// reference positions are scanned for the transcript token (smallest
/// offset wins): a hit marks the skipped positions as errors and resumes
/// at the match; a miss records one error at `reference[i]` (substitution
/// or insertion) and advances both. Reference positions never consumed by
/// the loop are counted as errors: content never reached.
///
/// O(reference + transcript): real-time cost is favored over optimal
/// alignment.
pub fn align(reference: &[String], transcript: &[String]) -> AlignmentState {
    let n = reference.len();
    let mut matched = vec![false; n];
    let mut errors = vec![0u32; n];

    let mut i = 0;
    let mut j = 0;
    while i < n && j < transcript.len() {
        if reference[i] == transcript[j] {
            matched[i] = true;
            i += 1;
            j += 1;
            continue;
        }

        // Smallest matching offset in the window wins.
        let skip = (1..LOOKAHEAD_WINDOW)
            .take_while(|k| i + k < n)
            .find(|k| reference[i + k] == transcript[j]);

        match skip {
            Some(k) => {
                for position in i..i + k {
                    errors[position] += 1;
                }
                i += k;
                matched[i] = true;
                i += 1;
                j += 1;
            }
            None => {
                errors[i] += 1;
                i += 1;
                j += 1;
            }
        }
    }

    for position in i..n {
        errors[position] += 1;
    }

    AlignmentState {
        matched,
        errors,
        read_pointer: progress_pointer(reference, transcript),
    }
}
