//! Live reading session: owns the transcript buffer, recomputes alignment
//! and scores as finalized fragments arrive, and drives the adaptive
//! controller. Single-threaded and synchronous throughout; every update
//! completes within a UI frame for buffers of a few hundred words.

use std::time::Instant;

use tracing::{debug, info};

use crate::engine::adaptive::{AdaptiveController, DifficultyTier, TierDecision};
use crate::engine::alignment::{self, AlignmentState};
use crate::engine::pronunciation::{self, PronunciationFeedback};
use crate::engine::reference::ReferenceSequence;
use crate::engine::scoring::{self, ScoreSnapshot};
use crate::passage::Passage;
use crate::session::result::ReadingResult;
use crate::session::transcript::TranscriptBuffer;

/// Which driver advances the highlight pointer. Live recognition derives
/// it from alignment; synthesized read-aloud playback paces it off the
/// wall clock at the tier's reading rate. Both feed the same alignment
/// and scoring calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionSource {
    Recognition,
    Playback { rate_wpm: u32 },
}

/// Everything a UI refresh needs after one update.
#[derive(Clone, Debug)]
pub struct SessionUpdate {
    pub snapshot: ScoreSnapshot,
    pub alignment: AlignmentState,
    pub decision: TierDecision,
}

pub struct ReadingSession {
    reference: ReferenceSequence,
    transcript: TranscriptBuffer,
    controller: AdaptiveController,
    source: PositionSource,
    epoch: u64,
    started_at: Option<Instant>,
    stopped: bool,
    alignment: AlignmentState,
}

impl ReadingSession {
    pub fn new(passage: &Passage, controller: AdaptiveController) -> Self {
        let reference = passage.reference().clone();
        let alignment = alignment::align(reference.tokens(), &[]);
        Self {
            reference,
            transcript: TranscriptBuffer::new(),
            controller,
            source: PositionSource::Recognition,
            epoch: 0,
            started_at: None,
            stopped: false,
            alignment,
        }
    }

    pub fn set_position_source(&mut self, source: PositionSource) {
        self.source = source;
    }

    /// Current epoch. External recognition/synthesis callbacks must carry
    /// the epoch they were issued under; anything stale is dropped instead
    /// of being applied to the wrong session state.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn tier(&self) -> DifficultyTier {
        self.controller.current_tier()
    }

    pub fn reference(&self) -> &ReferenceSequence {
        &self.reference
    }

    pub fn transcript(&self) -> &[String] {
        self.transcript.tokens()
    }

    pub fn alignment(&self) -> &AlignmentState {
        &self.alignment
    }

    /// Begin recording. The transcript starts empty and the epoch is
    /// bumped so callbacks from any previous recording are rejected.
    pub fn start(&mut self, now: Instant) {
        self.epoch += 1;
        self.transcript = TranscriptBuffer::new();
        self.alignment = alignment::align(self.reference.tokens(), &[]);
        self.started_at = Some(now);
        self.stopped = false;
        info!(
            epoch = self.epoch,
            tier = self.tier().to_key(),
            reference_len = self.reference.len(),
            "reading session started"
        );
    }

    /// Append a finalized recognition fragment and recompute everything.
    /// Returns `None` when the fragment is dropped: session not started,
    /// already stopped, or the fragment's epoch is stale.
    pub fn push_final(&mut self, fragment: &str, epoch: u64, now: Instant) -> Option<SessionUpdate> {
        if self.stopped || self.started_at.is_none() || epoch != self.epoch {
            debug!(
                fragment_epoch = epoch,
                session_epoch = self.epoch,
                stopped = self.stopped,
                "dropping stale transcript fragment"
            );
            return None;
        }

        let appended = self.transcript.push_final(fragment);
        debug!(appended, total = self.transcript.len(), "transcript grew");
        Some(self.refresh(now))
    }

    /// Timer tick from the UI. Recomputes the snapshot (wpm and any
    /// playback-paced pointer move with the clock) and re-evaluates the
    /// controller without touching the transcript.
    pub fn tick(&mut self, now: Instant) -> Option<SessionUpdate> {
        if self.stopped || self.started_at.is_none() {
            return None;
        }
        Some(self.refresh(now))
    }

    /// Advisory per-word pronunciation feedback for the current buffer.
    pub fn pronunciation(&self) -> Vec<PronunciationFeedback> {
        pronunciation::review(self.reference.tokens(), self.transcript.tokens())
    }

    /// Stop recording: synchronously halts buffer mutation and controller
    /// evaluation, persists bests, and discards the transcript. The epoch
    /// bump makes any in-flight recognition callback a no-op.
    pub fn stop(&mut self, now: Instant) -> ReadingResult {
        let snapshot = self.snapshot(now);
        let elapsed_secs = match self.started_at {
            Some(start) => now
                .checked_duration_since(start)
                .map(|e| e.as_secs_f64())
                .unwrap_or(0.0),
            None => 0.0,
        };
        let result =
            ReadingResult::from_parts(&snapshot, &self.alignment, self.tier(), elapsed_secs);

        self.controller.save_best(&snapshot);
        self.stopped = true;
        self.epoch += 1;
        self.transcript = TranscriptBuffer::new();
        info!(
            wpm = result.wpm,
            accuracy = result.accuracy,
            progress = result.progress_percent,
            "reading session stopped"
        );
        result
    }

    fn refresh(&mut self, now: Instant) -> SessionUpdate {
        self.alignment = alignment::align(self.reference.tokens(), self.transcript.tokens());
        let snapshot = self.snapshot(now);
        let decision = self.controller.evaluate(&snapshot, now);
        SessionUpdate {
            snapshot,
            alignment: self.alignment.clone(),
            decision,
        }
    }

    fn snapshot(&self, now: Instant) -> ScoreSnapshot {
        scoring::score_at(
            self.reference.tokens(),
            self.transcript.tokens(),
            self.pointer(now),
            self.started_at,
            now,
        )
    }

    fn pointer(&self, now: Instant) -> usize {
        match self.source {
            PositionSource::Recognition => self.alignment.read_pointer,
            PositionSource::Playback { rate_wpm } => {
                let Some(start) = self.started_at else {
                    return 0;
                };
                let minutes = now
                    .checked_duration_since(start)
                    .map(|e| e.as_secs_f64() / 60.0)
                    .unwrap_or(0.0);
                ((minutes * rate_wpm as f64) as usize).min(self.reference.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn session_for(text: &str) -> ReadingSession {
        let passage = Passage::from_text(DifficultyTier::Beginner, text).unwrap();
        ReadingSession::new(&passage, AdaptiveController::new(DifficultyTier::Beginner))
    }

    #[test]
    fn test_fragment_before_start_is_dropped() {
        let mut session = session_for("the cat sat on the mat");
        assert!(session.push_final("the cat", 0, Instant::now()).is_none());
    }

    #[test]
    fn test_perfect_reading_scores_full_marks() {
        let mut session = session_for("The cat sat on the mat");
        let t0 = Instant::now();
        session.start(t0);
        let epoch = session.epoch();

        session.push_final("the cat sat", epoch, t0 + Duration::from_secs(5));
        let update = session
            .push_final("on the mat", epoch, t0 + Duration::from_secs(10))
            .unwrap();

        assert_eq!(update.snapshot.accuracy, 100);
        assert_eq!(update.snapshot.progress_percent, 100);
        assert_eq!(update.alignment.errors, vec![0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_stale_epoch_fragment_is_ignored() {
        let mut session = session_for("the cat sat on the mat");
        let t0 = Instant::now();
        session.start(t0);
        let old_epoch = session.epoch();
        session.stop(t0 + Duration::from_secs(1));

        // Late recognition callback from the stopped recording.
        assert!(
            session
                .push_final("the cat", old_epoch, t0 + Duration::from_secs(2))
                .is_none()
        );

        session.start(t0 + Duration::from_secs(3));
        assert!(
            session
                .push_final("the cat", old_epoch, t0 + Duration::from_secs(4))
                .is_none(),
            "fragment from a previous epoch must not mutate the new buffer"
        );
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn test_stop_discards_transcript_and_freezes() {
        let mut session = session_for("the cat sat on the mat");
        let t0 = Instant::now();
        session.start(t0);
        let epoch = session.epoch();
        session.push_final("the cat", epoch, t0 + Duration::from_secs(2));

        let result = session.stop(t0 + Duration::from_secs(4));
        assert_eq!(result.words_read, 2);
        assert!(session.transcript().is_empty());
        assert!(session.tick(t0 + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn test_tick_updates_wpm_without_new_tokens() {
        let mut session = session_for("one two three four five six seven eight");
        let t0 = Instant::now();
        session.start(t0);
        let epoch = session.epoch();
        session.push_final("one two three four", epoch, t0 + Duration::from_secs(60));

        let early = session.tick(t0 + Duration::from_secs(60)).unwrap();
        let late = session.tick(t0 + Duration::from_secs(240)).unwrap();
        assert_eq!(early.snapshot.wpm, 4);
        assert_eq!(late.snapshot.wpm, 1);
        assert_eq!(early.snapshot.words_read, late.snapshot.words_read);
    }

    #[test]
    fn test_playback_source_paces_pointer_by_clock() {
        let mut session = session_for("one two three four five six seven eight");
        session.set_position_source(PositionSource::Playback { rate_wpm: 60 });
        let t0 = Instant::now();
        session.start(t0);

        let update = session.tick(t0 + Duration::from_secs(4)).unwrap();
        assert_eq!(update.snapshot.progress_percent, 50);

        let done = session.tick(t0 + Duration::from_secs(600)).unwrap();
        assert_eq!(done.snapshot.progress_percent, 100);
    }
}
