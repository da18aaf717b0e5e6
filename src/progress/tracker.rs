//! Daily progress tracker — today's ritual flags behind a single lock, with
//! broadcast to view-layer subscribers.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::state::{DailyProgress, Episode, RitualStep, StepCard, StepState, derive_status};
use crate::error::ProgressError;

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Holds the current episode. Every mutation is one write-lock critical
/// section, so readers only ever see whole snapshots.
pub struct DailyProgressTracker {
    episode: RwLock<Episode>,
    tx: broadcast::Sender<Episode>,
}

impl DailyProgressTracker {
    /// Create a tracker with a fresh episode.
    pub fn new() -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Arc::new(Self {
            episode: RwLock::new(Episode::new()),
            tx,
        })
    }

    /// Subscribe to episode snapshots published after every change.
    pub fn subscribe(&self) -> broadcast::Receiver<Episode> {
        self.tx.subscribe()
    }

    /// Current episode, by value.
    pub fn snapshot(&self) -> Episode {
        *self.episode.read()
    }

    /// Current progress flags, by value.
    pub fn progress(&self) -> DailyProgress {
        self.episode.read().progress
    }

    /// Derived state of one step against the current progress.
    pub fn status(&self, step: RitualStep) -> StepState {
        derive_status(step, &self.progress())
    }

    /// Home-screen cards for the current episode.
    pub fn steps(&self) -> Vec<StepCard> {
        self.snapshot().cards()
    }

    pub fn mark_checked_in(&self) {
        // Check-In has no prerequisite.
        let _ = self.complete(RitualStep::CheckIn);
    }

    pub fn mark_reflected(&self) -> Result<(), ProgressError> {
        self.complete(RitualStep::Reflect)
    }

    pub fn mark_completed_zen_quest(&self) -> Result<(), ProgressError> {
        self.complete(RitualStep::ZenQuest)
    }

    /// Mark `step` complete.
    ///
    /// Rejects the mark, leaving state untouched, while the step's
    /// prerequisite is still open. Marking an already-completed step is a
    /// no-op.
    pub fn complete(&self, step: RitualStep) -> Result<(), ProgressError> {
        let updated = {
            let mut episode = self.episode.write();

            if let Some(prerequisite) = step.prerequisite() {
                if !episode.progress.is_done(prerequisite) {
                    warn!(
                        episode_id = %episode.id,
                        step = %step,
                        prerequisite = %prerequisite,
                        "Rejected out-of-order step completion"
                    );
                    return Err(ProgressError::StepLocked { step, prerequisite });
                }
            }

            if episode.progress.is_done(step) {
                debug!(episode_id = %episode.id, step = %step, "Step already completed");
                return Ok(());
            }

            match step {
                RitualStep::CheckIn => episode.progress.has_checked_in = true,
                RitualStep::Reflect => episode.progress.has_reflected = true,
                RitualStep::ZenQuest => episode.progress.has_completed_zen_quest = true,
            }
            *episode
        };

        info!(episode_id = %updated.id, step = %step, "Ritual step completed");
        if updated.progress.is_finished() {
            info!(episode_id = %updated.id, "Episode finished");
        }

        // Ok if no view is listening
        let _ = self.tx.send(updated);
        Ok(())
    }

    /// Clear all three flags and start a new episode in one step.
    pub fn reset_daily_flow(&self) -> Episode {
        let (previous, fresh) = {
            let mut episode = self.episode.write();
            let previous = *episode;
            *episode = Episode::new();
            (previous, *episode)
        };

        info!(
            previous_episode = %previous.id,
            episode_id = %fresh.id,
            finished = previous.progress.is_finished(),
            "Daily flow reset"
        );

        let _ = self.tx.send(fresh);
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::state::StepStatus;

    fn statuses(tracker: &DailyProgressTracker) -> Vec<StepStatus> {
        RitualStep::ALL
            .iter()
            .map(|s| tracker.status(*s).status)
            .collect()
    }

    #[test]
    fn starts_fresh() {
        let tracker = DailyProgressTracker::new();
        assert_eq!(tracker.progress(), DailyProgress::default());
        assert_eq!(
            statuses(&tracker),
            vec![StepStatus::Active, StepStatus::Locked, StepStatus::Locked]
        );
    }

    #[test]
    fn check_in_unlocks_reflect() {
        let tracker = DailyProgressTracker::new();
        tracker.mark_checked_in();
        assert_eq!(
            tracker.status(RitualStep::Reflect),
            StepState {
                status: StepStatus::Active,
                disabled: false,
            }
        );
    }

    #[test]
    fn full_episode_completes_every_step() {
        let tracker = DailyProgressTracker::new();
        tracker.mark_checked_in();
        tracker.mark_reflected().unwrap();
        tracker.mark_completed_zen_quest().unwrap();

        assert_eq!(
            statuses(&tracker),
            vec![StepStatus::Completed; 3]
        );
        assert!(tracker.progress().is_finished());
    }

    #[test]
    fn marks_are_idempotent() {
        let tracker = DailyProgressTracker::new();
        tracker.mark_checked_in();
        tracker.mark_checked_in();
        tracker.mark_reflected().unwrap();
        tracker.mark_reflected().unwrap();

        let progress = tracker.progress();
        assert!(progress.has_checked_in);
        assert!(progress.has_reflected);
        assert!(!progress.has_completed_zen_quest);
    }

    #[test]
    fn out_of_order_marks_are_rejected() {
        let tracker = DailyProgressTracker::new();

        let err = tracker.mark_reflected().unwrap_err();
        assert!(matches!(
            err,
            ProgressError::StepLocked {
                step: RitualStep::Reflect,
                prerequisite: RitualStep::CheckIn,
            }
        ));

        tracker.mark_checked_in();
        let err = tracker.mark_completed_zen_quest().unwrap_err();
        assert!(matches!(
            err,
            ProgressError::StepLocked {
                step: RitualStep::ZenQuest,
                prerequisite: RitualStep::Reflect,
            }
        ));

        // Rejected marks leave state untouched.
        let progress = tracker.progress();
        assert!(progress.has_checked_in);
        assert!(!progress.has_reflected);
        assert!(!progress.has_completed_zen_quest);
    }

    #[test]
    fn reset_returns_to_active_locked_locked() {
        let tracker = DailyProgressTracker::new();
        let first = tracker.snapshot().id;
        tracker.mark_checked_in();
        tracker.mark_reflected().unwrap();

        let fresh = tracker.reset_daily_flow();
        assert_ne!(fresh.id, first);
        assert_eq!(tracker.snapshot().id, fresh.id);
        assert_eq!(
            statuses(&tracker),
            vec![StepStatus::Active, StepStatus::Locked, StepStatus::Locked]
        );
    }

    #[tokio::test]
    async fn subscribers_see_changes_and_resets() {
        let tracker = DailyProgressTracker::new();
        let mut rx = tracker.subscribe();

        tracker.mark_checked_in();
        let after_check_in = rx.recv().await.unwrap();
        assert!(after_check_in.progress.has_checked_in);

        // Idempotent mark publishes nothing; rejected mark publishes nothing.
        tracker.mark_checked_in();
        assert!(tracker.mark_completed_zen_quest().is_err());

        let fresh = tracker.reset_daily_flow();
        let after_reset = rx.recv().await.unwrap();
        assert_eq!(after_reset.id, fresh.id);
        assert_eq!(after_reset.progress, DailyProgress::default());
    }

    #[test]
    fn concurrent_readers_never_see_partial_reset() {
        let tracker = DailyProgressTracker::new();
        tracker.mark_checked_in();
        tracker.mark_reflected().unwrap();

        std::thread::scope(|scope| {
            let reader = scope.spawn(|| {
                for _ in 0..1000 {
                    let p = tracker.progress();
                    // Either both set (before reset) or both clear (after).
                    assert_eq!(p.has_checked_in, p.has_reflected, "{p:?}");
                }
            });
            tracker.reset_daily_flow();
            reader.join().unwrap();
        });
    }
}
