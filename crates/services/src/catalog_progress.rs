use tracing::debug;

use patterns_core::model::{Catalog, Hint, Pattern, PatternDifficulty, PatternId, Problem};
use patterns_core::stats::completion_percentage;
use patterns_core::streak::StreakStatus;

use crate::error::HintError;
use crate::progress_store::ProgressStore;

/// Solved/total for one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternProgress {
    pub pattern_id: PatternId,
    pub solved: usize,
    pub total: usize,
    pub percent: u32,
}

impl PatternProgress {
    #[must_use]
    pub fn for_pattern(pattern: &Pattern, progress: &ProgressStore) -> Self {
        let solved = pattern
            .problems
            .iter()
            .filter(|problem| progress.is_completed(problem.id.as_str()))
            .count();
        let total = pattern.problems.len();
        Self {
            pattern_id: pattern.id.clone(),
            solved,
            total,
            percent: completion_percentage(solved, total),
        }
    }

    /// Every problem of a non-empty pattern is completed.
    #[must_use]
    pub fn is_mastered(&self) -> bool {
        self.total > 0 && self.solved == self.total
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
    pub streak: u32,
    pub streak_status: StreakStatus,
}

impl DashboardSummary {
    #[must_use]
    pub fn from_store(progress: &ProgressStore) -> Self {
        Self {
            completed: progress.completed_count(),
            total: progress.total_problems(),
            percent: progress.completion_percentage(),
            streak: progress.streak(),
            streak_status: progress.streak_status(),
        }
    }
}

/// Patterns of one difficulty tier with their progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultySection {
    pub difficulty: PatternDifficulty,
    pub patterns: Vec<PatternProgress>,
}

/// Group the catalog by tier (Beginner, Intermediate, Advanced). Empty tiers
/// are kept so the layout stays stable.
#[must_use]
pub fn difficulty_sections(catalog: &Catalog, progress: &ProgressStore) -> Vec<DifficultySection> {
    PatternDifficulty::ALL
        .iter()
        .map(|&difficulty| DifficultySection {
            difficulty,
            patterns: catalog
                .patterns_with_difficulty(difficulty)
                .map(|pattern| PatternProgress::for_pattern(pattern, progress))
                .collect(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintState {
    Unlocked,
    /// The one hint that may be unlocked next.
    Next,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintView<'a> {
    pub hint: &'a Hint,
    pub state: HintState,
}

/// State of each hint of `problem` given the learner's unlocked level.
#[must_use]
pub fn hint_states<'a>(problem: &'a Problem, progress: &ProgressStore) -> Vec<HintView<'a>> {
    let current = progress.unlocked_level(problem.id.as_str());
    problem
        .hints
        .iter()
        .map(|hint| {
            let state = if hint.level <= current {
                HintState::Unlocked
            } else if hint.level == current + 1 {
                HintState::Next
            } else {
                HintState::Locked
            };
            HintView { hint, state }
        })
        .collect()
}

/// Unlock exactly one more hint of a catalog problem.
///
/// # Errors
///
/// Returns `HintError::UnknownProblem` if the catalog has no such problem and
/// `HintError::AllUnlocked` if every hint is already visible.
pub fn unlock_next_hint(
    catalog: &Catalog,
    progress: &mut ProgressStore,
    problem_id: &str,
) -> Result<u32, HintError> {
    let (_, problem) = catalog
        .problem(problem_id)
        .ok_or_else(|| HintError::UnknownProblem(problem_id.to_owned()))?;

    let current = progress.unlocked_level(problem_id);
    let max = problem.max_hint_level();
    if current >= max {
        return Err(HintError::AllUnlocked {
            problem: problem_id.to_owned(),
            max,
        });
    }

    debug!(problem = problem_id, next = current + 1, max, "unlock next hint");
    Ok(progress.unlock_hint(problem.id.clone(), current + 1))
}

/// Unlock hints of a catalog problem up to `level`, never past its last hint.
/// Lower levels leave the current one in place.
///
/// # Errors
///
/// Returns `HintError::UnknownProblem` if the catalog has no such problem and
/// `HintError::LevelOutOfRange` if `level` exceeds the problem's hint count.
pub fn unlock_hint_to(
    catalog: &Catalog,
    progress: &mut ProgressStore,
    problem_id: &str,
    level: u32,
) -> Result<u32, HintError> {
    let (_, problem) = catalog
        .problem(problem_id)
        .ok_or_else(|| HintError::UnknownProblem(problem_id.to_owned()))?;

    let max = problem.max_hint_level();
    if level > max {
        return Err(HintError::LevelOutOfRange {
            problem: problem_id.to_owned(),
            level,
            max,
        });
    }

    Ok(progress.unlock_hint(problem.id.clone(), level))
}
