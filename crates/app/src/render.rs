use patterns_core::model::{Pattern, ProblemId, ToggleOutcome};
use patterns_core::streak::{StreakAdvance, StreakStatus};
use services::{AppServices, DashboardSummary, DifficultySection, HintState, PatternProgress};

pub fn status(summary: &DashboardSummary) -> String {
    let streak_note = match summary.streak_status {
        StreakStatus::Inactive => "complete a problem to start a streak",
        StreakStatus::PracticedToday => "practiced today",
        StreakStatus::AtRisk => "complete a problem today to keep it",
        StreakStatus::Lapsed => "your next completion starts a new streak",
    };
    format!(
        "Completed {}/{} problems ({}%)\n{} day streak ({streak_note})\n",
        summary.completed, summary.total, summary.percent, summary.streak
    )
}

pub fn sections(sections: &[DifficultySection], app: &AppServices) -> String {
    let catalog = app.catalog();
    let mut lines = Vec::new();
    for section in sections {
        lines.push(format!("{} Patterns", section.difficulty));
        if section.patterns.is_empty() {
            lines.push("  (none)".to_string());
        }
        for progress in &section.patterns {
            let title = catalog
                .pattern(progress.pattern_id.as_str())
                .map_or("", |p| p.title.as_str());
            lines.push(format!(
                "  {mark} {title} [{id}] {solved}/{total}",
                mark = if progress.is_mastered() { "*" } else { " " },
                id = progress.pattern_id,
                solved = progress.solved,
                total = progress.total,
            ));
        }
    }
    join_lines(lines)
}

pub fn pattern(pattern: &Pattern, progress: &PatternProgress, app: &AppServices) -> String {
    let mut lines = vec![
        format!("{} ({})", pattern.title, pattern.difficulty),
        pattern.short_description.clone(),
        format!("Mastery: {}%", progress.percent),
    ];
    lines.extend(pattern.key_insights.iter().map(|insight| format!("  + {insight}")));
    lines.extend(pattern.common_pitfalls.iter().map(|pitfall| format!("  ! {pitfall}")));

    for problem in &pattern.problems {
        let done = app.progress().is_completed(problem.id.as_str());
        lines.push(format!(
            "\n[{}] {} ({}) [{}]",
            if done { "x" } else { " " },
            problem.title,
            problem.difficulty,
            problem.id
        ));
        if let Some(url) = &problem.leetcode_url {
            lines.push(format!("    {url}"));
        }
        for view in app.hint_states(problem) {
            let hint = view.hint;
            lines.push(match view.state {
                HintState::Unlocked => {
                    format!("    Hint {} - {}: {}", hint.level, hint.title, hint.content)
                }
                HintState::Next => format!(
                    "    Hint {} - {} (unlock with `hint {}`)",
                    hint.level, hint.title, problem.id
                ),
                HintState::Locked => format!("    Hint {} - locked", hint.level),
            });
        }
    }
    join_lines(lines)
}

fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn toggled(problem: &ProblemId, outcome: ToggleOutcome, streak: u32) -> String {
    match outcome {
        ToggleOutcome::Reopened => format!("{problem} marked as not done\n"),
        ToggleOutcome::Completed(advance) => {
            let note = match advance {
                StreakAdvance::Unchanged => "already counted today",
                StreakAdvance::Extended => "streak extended",
                StreakAdvance::Restarted => "streak started",
            };
            format!("{problem} completed ({note}, {streak} day streak)\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mentions_streak_state() {
        let text = status(&DashboardSummary {
            completed: 1,
            total: 4,
            percent: 25,
            streak: 3,
            streak_status: StreakStatus::AtRisk,
        });
        assert!(text.starts_with("Completed 1/4 problems (25%)"));
        assert!(text.contains("3 day streak (complete a problem today to keep it)"));
    }

    #[test]
    fn lines_end_with_newlines() {
        assert_eq!(join_lines(Vec::new()), "");
        assert_eq!(
            join_lines(vec!["a".to_string(), "\nb".to_string()]),
            "a\n\nb\n"
        );
    }

    #[test]
    fn toggled_reports_direction() {
        let id = ProblemId::new("sw-1");
        assert_eq!(
            toggled(&id, ToggleOutcome::Reopened, 2),
            "sw-1 marked as not done\n"
        );
        assert_eq!(
            toggled(&id, ToggleOutcome::Completed(StreakAdvance::Extended), 2),
            "sw-1 completed (streak extended, 2 day streak)\n"
        );
    }
}
