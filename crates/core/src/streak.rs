//! Daily practice streak arithmetic.
//!
//! All functions here are pure: "today" is always passed in, so callers decide
//! which clock and which day boundary apply.

use chrono::NaiveDate;

/// Streak counter together with the last day it advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakState {
    pub streak: u32,
    pub last_practice_date: Option<NaiveDate>,
}

/// Result of a completion event on the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakAdvance {
    /// Already practiced today.
    Unchanged,
    /// Practiced yesterday; streak grew by one.
    Extended,
    /// First practice ever, or a gap of more than one day.
    Restarted,
}

/// Apply one completion event that happened on `today`.
///
/// At most one advance per calendar day. A last-practice date that is neither
/// today nor yesterday (including one in the future) restarts the streak at 1.
#[must_use]
pub fn advance(state: StreakState, today: NaiveDate) -> (StreakState, StreakAdvance) {
    let outcome = match state.last_practice_date {
        Some(last) if last == today => return (state, StreakAdvance::Unchanged),
        Some(last) if Some(last) == today.pred_opt() => StreakAdvance::Extended,
        _ => StreakAdvance::Restarted,
    };

    let streak = match outcome {
        StreakAdvance::Extended => state.streak.saturating_add(1),
        _ => 1,
    };

    (
        StreakState {
            streak,
            last_practice_date: Some(today),
        },
        outcome,
    )
}

/// How the stored streak relates to today, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakStatus {
    Inactive,
    PracticedToday,
    /// Last practice was yesterday: completing a problem today extends it.
    AtRisk,
    /// The next completion will restart the streak at 1.
    Lapsed,
}

#[must_use]
pub fn status(last_practice_date: Option<NaiveDate>, today: NaiveDate) -> StreakStatus {
    match last_practice_date {
        None => StreakStatus::Inactive,
        Some(last) if last == today => StreakStatus::PracticedToday,
        Some(last) if Some(last) == today.pred_opt() => StreakStatus::AtRisk,
        Some(_) => StreakStatus::Lapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    #[test]
    fn first_completion_starts_at_one() {
        let (next, outcome) = advance(StreakState::default(), day(1));
        assert_eq!(outcome, StreakAdvance::Restarted);
        assert_eq!(next.streak, 1);
        assert_eq!(next.last_practice_date, Some(day(1)));
    }

    #[test]
    fn same_day_is_noop() {
        let state = StreakState {
            streak: 4,
            last_practice_date: Some(day(10)),
        };
        let (next, outcome) = advance(state, day(10));
        assert_eq!(outcome, StreakAdvance::Unchanged);
        assert_eq!(next, state);
    }

    #[test]
    fn consecutive_day_extends() {
        let state = StreakState {
            streak: 4,
            last_practice_date: Some(day(10)),
        };
        let (next, outcome) = advance(state, day(11));
        assert_eq!(outcome, StreakAdvance::Extended);
        assert_eq!(next.streak, 5);
        assert_eq!(next.last_practice_date, Some(day(11)));
    }

    #[test]
    fn gap_restarts() {
        let state = StreakState {
            streak: 9,
            last_practice_date: Some(day(10)),
        };
        let (next, outcome) = advance(state, day(13));
        assert_eq!(outcome, StreakAdvance::Restarted);
        assert_eq!(next.streak, 1);
    }

    #[test]
    fn extends_across_month_boundary() {
        let state = StreakState {
            streak: 2,
            last_practice_date: Some(day(29)),
        };
        let march_first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let (next, outcome) = advance(state, march_first);
        assert_eq!(outcome, StreakAdvance::Extended);
        assert_eq!(next.streak, 3);
    }

    #[test]
    fn future_last_date_restarts() {
        let state = StreakState {
            streak: 3,
            last_practice_date: Some(day(20)),
        };
        let (next, outcome) = advance(state, day(5));
        assert_eq!(outcome, StreakAdvance::Restarted);
        assert_eq!(next.streak, 1);
        assert_eq!(next.last_practice_date, Some(day(5)));
    }

    #[test]
    fn status_reflects_gap() {
        assert_eq!(status(None, day(5)), StreakStatus::Inactive);
        assert_eq!(status(Some(day(5)), day(5)), StreakStatus::PracticedToday);
        assert_eq!(status(Some(day(4)), day(5)), StreakStatus::AtRisk);
        assert_eq!(status(Some(day(2)), day(5)), StreakStatus::Lapsed);
    }
}
