//! Pure score derivations over the reference/transcript pair. Everything
//! here is cheap enough to run on every transcript mutation, several times
//! per second.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Point-in-time reading scores. Ephemeral: recomputed on every update,
/// never persisted by the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub accuracy: u32,
    pub wpm: u32,
    pub words_read: usize,
    pub progress_percent: u32,
}

/// Edit distance between two sequences, two-row formulation.
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr_row[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr_row[j] = (prev_row[j] + 1)
                .min(curr_row[j - 1] + 1)
                .min(prev_row[j - 1] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Percent of read words judged correct, by word-level edit distance
/// between the transcript and the reference prefix of equal length.
///
/// Empty transcript scores 0; the denominator floors at 1, so this never
/// divides by zero. Note this deliberately disagrees with the heatmap in
/// [`crate::engine::alignment`] after insertions/deletions: the prefix
/// comparison and the windowed alignment attribute such errors
/// differently, and both outputs are kept as-is.
pub fn accuracy(reference: &[String], transcript: &[String]) -> u32 {
    let read_count = transcript.len();
    let prefix = &reference[..read_count.min(reference.len())];
    let distance = levenshtein(prefix, transcript);
    let correct = read_count.saturating_sub(distance);
    let percent = 100.0 * correct as f64 / read_count.max(1) as f64;
    (percent.round() as u32).clamp(0, 100)
}

/// Words per minute over the elapsed session time. Zero until the session
/// has started and for non-positive elapsed time.
pub fn wpm(started_at: Option<Instant>, transcript_len: usize, now: Instant) -> u32 {
    let Some(start) = started_at else {
        return 0;
    };
    let Some(elapsed) = now.checked_duration_since(start) else {
        return 0;
    };
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 {
        return 0;
    }
    (transcript_len as f64 / minutes).round() as u32
}

/// Share of the reference the read pointer has covered.
pub fn progress_percent(read_pointer: usize, reference_len: usize) -> u32 {
    let percent = 100.0 * read_pointer as f64 / reference_len.max(1) as f64;
    (percent.round() as u32).clamp(0, 100)
}

/// Saturating heuristic ramp on transcript length. Not a probability.
pub fn confidence(transcript_len: usize) -> u32 {
    (transcript_len as u32).saturating_mul(10).min(100)
}

/// Full snapshot with the read pointer derived from the forward-greedy
/// scan. Hosts that pace the pointer some other way (playback-driven
/// highlighting) use [`score_at`] instead.
pub fn score(
    reference: &[String],
    transcript: &[String],
    started_at: Option<Instant>,
    now: Instant,
) -> ScoreSnapshot {
    let read_pointer = crate::engine::alignment::progress_pointer(reference, transcript);
    score_at(reference, transcript, read_pointer, started_at, now)
}

/// Snapshot for a caller-supplied read pointer.
pub fn score_at(
    reference: &[String],
    transcript: &[String],
    read_pointer: usize,
    started_at: Option<Instant>,
    now: Instant,
) -> ScoreSnapshot {
    ScoreSnapshot {
        accuracy: accuracy(reference, transcript),
        wpm: wpm(started_at, transcript.len(), now),
        words_read: transcript.len(),
        progress_percent: progress_percent(read_pointer, reference.len()),
    }
}
