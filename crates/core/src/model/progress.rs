use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::ids::ProblemId;
use crate::streak::{self, StreakAdvance, StreakState};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("streak {streak} is inconsistent with last practice date {last_practice_date:?}")]
    InconsistentStreak {
        streak: u32,
        last_practice_date: Option<NaiveDate>,
    },
}

/// What a completion toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The problem became completed; carries the effect on the streak.
    Completed(StreakAdvance),
    /// The problem was completed and is now open again. The streak is untouched.
    Reopened,
}

impl ToggleOutcome {
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, ToggleOutcome::Completed(_))
    }
}

/// A learner's progress: completed problems, unlocked hints and the daily streak.
///
/// Invariants:
/// - hint levels per problem never decrease
/// - `streak == 0` exactly when `last_practice_date` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressRecord {
    completed: HashSet<ProblemId>,
    unlocked_hints: HashMap<ProblemId, u32>,
    streak: StreakState,
}

impl ProgressRecord {
    /// Empty progress, as on first run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate progress from persisted storage.
    ///
    /// Zero hint levels are dropped since they are indistinguishable from
    /// "nothing unlocked".
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::InconsistentStreak` if exactly one of `streak`
    /// and `last_practice_date` claims that practice has happened.
    pub fn from_persisted(
        completed: impl IntoIterator<Item = ProblemId>,
        unlocked_hints: impl IntoIterator<Item = (ProblemId, u32)>,
        streak: u32,
        last_practice_date: Option<NaiveDate>,
    ) -> Result<Self, ProgressError> {
        if (streak == 0) != last_practice_date.is_none() {
            return Err(ProgressError::InconsistentStreak {
                streak,
                last_practice_date,
            });
        }

        Ok(Self {
            completed: completed.into_iter().collect(),
            unlocked_hints: unlocked_hints
                .into_iter()
                .filter(|(_, level)| *level > 0)
                .collect(),
            streak: StreakState {
                streak,
                last_practice_date,
            },
        })
    }

    #[must_use]
    pub fn is_completed(&self, problem_id: &str) -> bool {
        self.completed.contains(problem_id)
    }

    /// Unlocked hint level, 0 when nothing is unlocked or the id is unknown.
    #[must_use]
    pub fn unlocked_level(&self, problem_id: &str) -> u32 {
        self.unlocked_hints.get(problem_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn completed(&self) -> &HashSet<ProblemId> {
        &self.completed
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn unlocked_hints(&self) -> &HashMap<ProblemId, u32> {
        &self.unlocked_hints
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak.streak
    }

    #[must_use]
    pub fn last_practice_date(&self) -> Option<NaiveDate> {
        self.streak.last_practice_date
    }

    /// Flip completion of `problem_id`. Completing advances the streak for
    /// `today`; reopening never touches it.
    pub fn toggle_completion(&mut self, problem_id: ProblemId, today: NaiveDate) -> ToggleOutcome {
        if self.completed.remove(&problem_id) {
            return ToggleOutcome::Reopened;
        }

        self.completed.insert(problem_id);
        let (next, advance) = streak::advance(self.streak, today);
        self.streak = next;
        ToggleOutcome::Completed(advance)
    }

    /// Raise the unlocked hint level to at least `level` and return the
    /// resulting level. Lower or equal requests leave it unchanged.
    pub fn unlock_hint(&mut self, problem_id: ProblemId, level: u32) -> u32 {
        if level == 0 {
            return self.unlocked_level(problem_id.as_str());
        }
        let current = self.unlocked_hints.entry(problem_id).or_insert(0);
        *current = (*current).max(level);
        *current
    }
}
