use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{PatternId, ProblemId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("pattern id cannot be empty")]
    EmptyPatternId,

    #[error("problem id cannot be empty (pattern {pattern})")]
    EmptyProblemId { pattern: PatternId },

    #[error("duplicate pattern id: {0}")]
    DuplicatePattern(PatternId),

    #[error("duplicate problem id: {0}")]
    DuplicateProblem(ProblemId),

    #[error("hints of problem {problem} must be numbered 1..=n in order (found level {found} at position {position})")]
    HintLevels {
        problem: ProblemId,
        position: usize,
        found: u32,
    },
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty of a single practice problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Difficulty tier of a whole pattern, used to group the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PatternDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl PatternDifficulty {
    /// All tiers in dashboard order.
    pub const ALL: [PatternDifficulty; 3] = [
        PatternDifficulty::Beginner,
        PatternDifficulty::Intermediate,
        PatternDifficulty::Advanced,
    ];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

impl fmt::Display for PatternDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatternDifficulty::Beginner => "Beginner",
            PatternDifficulty::Intermediate => "Intermediate",
            PatternDifficulty::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

//
// ─── CONTENT RECORDS ───────────────────────────────────────────────────────────
//

/// One step of progressive scaffolding for a problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub level: u32,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub leetcode_url: Option<String>,
    #[serde(default)]
    pub hints: Vec<Hint>,
}

impl Problem {
    /// Highest hint level defined for this problem (0 when it has no hints).
    #[must_use]
    pub fn max_hint_level(&self) -> u32 {
        self.hints.last().map_or(0, |hint| hint.level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub id: PatternId,
    pub title: String,
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    pub difficulty: PatternDifficulty,
    #[serde(default)]
    pub code_example: String,
    pub problems: Vec<Problem>,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub common_pitfalls: Vec<String>,
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable, ordered collection of patterns.
///
/// The problem count is computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    patterns: Vec<Pattern>,
    total_problems: usize,
}

impl Catalog {
    /// Validate and freeze a list of patterns.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for empty or duplicate ids, or hints that are not
    /// numbered `1..=n` in order.
    pub fn new(patterns: Vec<Pattern>) -> Result<Self, CatalogError> {
        let mut pattern_ids = HashSet::new();
        let mut problem_ids = HashSet::new();

        for pattern in &patterns {
            if pattern.id.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyPatternId);
            }
            if !pattern_ids.insert(pattern.id.clone()) {
                return Err(CatalogError::DuplicatePattern(pattern.id.clone()));
            }
            for problem in &pattern.problems {
                if problem.id.as_str().trim().is_empty() {
                    return Err(CatalogError::EmptyProblemId {
                        pattern: pattern.id.clone(),
                    });
                }
                if !problem_ids.insert(problem.id.clone()) {
                    return Err(CatalogError::DuplicateProblem(problem.id.clone()));
                }
                validate_hint_levels(problem)?;
            }
        }

        Ok(Self {
            total_problems: problem_ids.len(),
            patterns,
        })
    }

    /// Catalog without any patterns.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            total_problems: 0,
        }
    }

    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    #[must_use]
    pub fn total_problems(&self) -> usize {
        self.total_problems
    }

    #[must_use]
    pub fn pattern(&self, id: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.id.as_str() == id)
    }

    /// Look up a problem together with the pattern that owns it.
    #[must_use]
    pub fn problem(&self, id: &str) -> Option<(&Pattern, &Problem)> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .problems
                .iter()
                .find(|problem| problem.id.as_str() == id)
                .map(|problem| (pattern, problem))
        })
    }

    /// Highest hint level of a problem, 0 for unknown ids.
    #[must_use]
    pub fn max_hint_level(&self, problem_id: &str) -> u32 {
        self.problem(problem_id)
            .map_or(0, |(_, problem)| problem.max_hint_level())
    }

    /// Patterns of one tier, in catalog order.
    pub fn patterns_with_difficulty(
        &self,
        difficulty: PatternDifficulty,
    ) -> impl Iterator<Item = &Pattern> {
        self.patterns
            .iter()
            .filter(move |p| p.difficulty == difficulty)
    }
}

fn validate_hint_levels(problem: &Problem) -> Result<(), CatalogError> {
    for (idx, hint) in problem.hints.iter().enumerate() {
        let expected = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        if hint.level != expected {
            return Err(CatalogError::HintLevels {
                problem: problem.id.clone(),
                position: idx,
                found: hint.level,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(level: u32) -> Hint {
        Hint {
            level,
            title: format!("Hint {level}"),
            content: "content".to_string(),
        }
    }

    fn problem(id: &str, hints: u32) -> Problem {
        Problem {
            id: ProblemId::new(id),
            title: id.to_uppercase(),
            difficulty: Difficulty::Easy,
            leetcode_url: None,
            hints: (1..=hints).map(hint).collect(),
        }
    }

    fn pattern(id: &str, difficulty: PatternDifficulty, problems: Vec<Problem>) -> Pattern {
        Pattern {
            id: PatternId::new(id),
            title: id.to_string(),
            short_description: String::new(),
            full_description: String::new(),
            difficulty,
            code_example: String::new(),
            problems,
            key_insights: Vec::new(),
            common_pitfalls: Vec::new(),
        }
    }

    #[test]
    fn counts_problems_across_patterns() {
        let catalog = Catalog::new(vec![
            pattern(
                "two-pointers",
                PatternDifficulty::Beginner,
                vec![problem("tp-1", 3), problem("tp-2", 3)],
            ),
            pattern(
                "subsets",
                PatternDifficulty::Intermediate,
                vec![problem("sub-1", 2)],
            ),
        ])
        .unwrap();

        assert_eq!(catalog.total_problems(), 3);
        assert_eq!(catalog.max_hint_level("sub-1"), 2);
        assert_eq!(catalog.max_hint_level("unknown"), 0);
        let (owner, found) = catalog.problem("tp-2").unwrap();
        assert_eq!(owner.id.as_str(), "two-pointers");
        assert_eq!(found.title, "TP-2");
    }

    #[test]
    fn rejects_duplicate_problem_ids_across_patterns() {
        let err = Catalog::new(vec![
            pattern("a", PatternDifficulty::Beginner, vec![problem("p-1", 1)]),
            pattern("b", PatternDifficulty::Beginner, vec![problem("p-1", 1)]),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateProblem(ProblemId::new("p-1")));
    }

    #[test]
    fn rejects_duplicate_pattern_ids() {
        let err = Catalog::new(vec![
            pattern("a", PatternDifficulty::Beginner, vec![]),
            pattern("a", PatternDifficulty::Advanced, vec![]),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicatePattern(PatternId::new("a")));
    }

    #[test]
    fn rejects_gapped_hint_levels() {
        let mut gapped = problem("p-1", 0);
        gapped.hints = vec![hint(1), hint(3)];
        let err = Catalog::new(vec![pattern("a", PatternDifficulty::Beginner, vec![gapped])])
            .unwrap_err();
        assert!(matches!(err, CatalogError::HintLevels { position: 1, found: 3, .. }));
    }

    #[test]
    fn rejects_blank_problem_id() {
        let err = Catalog::new(vec![pattern(
            "a",
            PatternDifficulty::Beginner,
            vec![problem("  ", 1)],
        )])
        .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyProblemId { .. }));
    }

    #[test]
    fn filters_by_difficulty_in_catalog_order() {
        let catalog = Catalog::new(vec![
            pattern("a", PatternDifficulty::Advanced, vec![]),
            pattern("b", PatternDifficulty::Beginner, vec![]),
            pattern("c", PatternDifficulty::Advanced, vec![]),
        ])
        .unwrap();
        let ids: Vec<&str> = catalog
            .patterns_with_difficulty(PatternDifficulty::Advanced)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn deserializes_camel_case_pattern() {
        let json = r#"{
            "id": "sliding-window",
            "title": "Sliding Window",
            "shortDescription": "Contiguous subarrays.",
            "difficulty": "Beginner",
            "keyInsights": ["Expand then shrink"],
            "problems": [{
                "id": "sw-1",
                "title": "Max Sum Subarray of Size K",
                "difficulty": "Easy",
                "leetcodeUrl": "https://leetcode.com/problems/maximum-average-subarray-i/",
                "hints": [{"level": 1, "title": "Mental Model", "content": "Reuse the sum."}]
            }]
        }"#;
        let parsed: Pattern = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.problems[0].max_hint_level(), 1);
        assert_eq!(parsed.key_insights.len(), 1);
        assert!(parsed.common_pitfalls.is_empty());
    }
}
