use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::{debug, info, warn};

use patterns_core::model::{ProblemId, ProgressRecord, ToggleOutcome};
use patterns_core::stats::completion_percentage;
use patterns_core::streak::{self, StreakStatus};
use storage::{PROGRESS_STORAGE_KEY, ProgressStorage, decode_progress, encode_progress};

use crate::Clock;

/// Single source of truth for a learner's progress.
///
/// Holds the `ProgressRecord` in memory and mirrors it to durable storage after
/// every command. Storage failures never surface to callers: a blob that cannot
/// be read becomes empty progress, and a write that fails leaves the in-memory
/// state authoritative until the next successful write.
pub struct ProgressStore {
    clock: Clock,
    storage: Arc<dyn ProgressStorage>,
    record: ProgressRecord,
    total_problems: usize,
    persisted: bool,
}

impl ProgressStore {
    /// Hydrate progress from `storage`, falling back to empty progress when the
    /// blob is absent, unreadable or malformed.
    ///
    /// `total_problems` is the catalog size and stays fixed for the session.
    #[must_use]
    pub fn open(clock: Clock, storage: Arc<dyn ProgressStorage>, total_problems: usize) -> Self {
        let record = match storage.get_item(PROGRESS_STORAGE_KEY) {
            Ok(Some(raw)) => match decode_progress(&raw) {
                Ok(record) => {
                    info!(
                        completed = record.completed_count(),
                        streak = record.streak(),
                        "restored progress"
                    );
                    record
                }
                Err(err) => {
                    warn!(error = %err, "failed to load progress; starting fresh");
                    ProgressRecord::new()
                }
            },
            Ok(None) => {
                debug!("no saved progress; starting fresh");
                ProgressRecord::new()
            }
            Err(err) => {
                warn!(error = %err, "progress storage unreadable; starting fresh");
                ProgressRecord::new()
            }
        };

        Self {
            clock,
            storage,
            record,
            total_problems,
            persisted: true,
        }
    }

    /// Mark `problem_id` completed, or open it again if it already is.
    ///
    /// Completing advances the streak for today's UTC date; reopening never
    /// changes the streak.
    pub fn toggle_completion(&mut self, problem_id: impl Into<ProblemId>) -> ToggleOutcome {
        let problem_id = problem_id.into();
        let today = self.clock.today();
        debug!(problem = %problem_id, %today, "toggle completion");

        let outcome = self.record.toggle_completion(problem_id, today);
        self.persist();
        outcome
    }

    /// Raise the unlocked hint level of `problem_id` to at least `level`.
    ///
    /// Returns the resulting level. Any level is accepted: sequencing and the
    /// per-problem maximum are presentation policy (see `catalog_progress`).
    pub fn unlock_hint(&mut self, problem_id: impl Into<ProblemId>, level: u32) -> u32 {
        let problem_id = problem_id.into();
        debug!(problem = %problem_id, level, "unlock hint");

        let unlocked = self.record.unlock_hint(problem_id, level);
        self.persist();
        unlocked
    }

    #[must_use]
    pub fn is_completed(&self, problem_id: &str) -> bool {
        self.record.is_completed(problem_id)
    }

    #[must_use]
    pub fn unlocked_level(&self, problem_id: &str) -> u32 {
        self.record.unlocked_level(problem_id)
    }

    /// Rounded share of completed problems, 0 for an empty catalog.
    #[must_use]
    pub fn completion_percentage(&self) -> u32 {
        completion_percentage(self.record.completed_count(), self.total_problems)
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.record.streak()
    }

    #[must_use]
    pub fn last_practice_date(&self) -> Option<NaiveDate> {
        self.record.last_practice_date()
    }

    #[must_use]
    pub fn streak_status(&self) -> StreakStatus {
        streak::status(self.record.last_practice_date(), self.clock.today())
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.record.completed_count()
    }

    #[must_use]
    pub fn total_problems(&self) -> usize {
        self.total_problems
    }

    #[must_use]
    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Whether the most recent write reached durable storage.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Move a fixed clock forward. No effect on the system clock.
    pub fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    fn persist(&mut self) {
        let result = encode_progress(&self.record)
            .and_then(|blob| self.storage.set_item(PROGRESS_STORAGE_KEY, &blob));
        match result {
            Ok(()) => self.persisted = true,
            Err(err) => {
                warn!(error = %err, "failed to save progress; keeping in-memory state");
                self.persisted = false;
            }
        }
    }
}
