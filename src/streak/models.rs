use serde::{Deserialize, Serialize};

use crate::clock::DayKey;

/// Persisted streak keys, plus the legacy v1 schema folded in on first load.
pub mod keys {
    pub const DAILY: &str = "streak.daily";
    pub const CORRECT: &str = "streak.correct";
    pub const CORRECT_BEST: &str = "streak.correctBest";
    pub const LAST_PLAYED_DAY: &str = "streak.lastPlayedDay";
    pub const LAST_CORRECT_DAY: &str = "streak.lastCorrectDay";
    pub const LAST_ANSWERED_DAY: &str = "streak.lastAnsweredDay";
    pub const LAST_RESULT_CORRECT: &str = "streak.lastResultCorrect";
    pub const MIGRATED_V2: &str = "streak.migratedV2";

    pub const LEGACY_COUNT: &str = "legacy.streakCount";
    pub const LEGACY_LAST_PLAY: &str = "legacy.lastPlayDate";
}

/// The one state gate in the tracker, made explicit: either nothing has been
/// scored today, or today's result is locked in. Same-day re-reads see the
/// locked-in result without re-scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DailyOutcome {
    NotAnsweredToday,
    AnsweredToday { correct: bool },
}

/// Per-user streak record.
///
/// Invariants maintained by the tracker: `best_correct_streak >=
/// correct_streak`, counters never negative, at most one scoring transition
/// per calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakState {
    /// Consecutive calendar days with at least one answer.
    pub daily_streak: u32,
    /// Consecutive days answered correctly; any wrong answer resets it.
    pub correct_streak: u32,
    pub best_correct_streak: u32,
    pub last_played_day: Option<DayKey>,
    /// Advances on every scored answer, wrong ones included, so the next
    /// day's gap check measures from the most recent attempt.
    pub last_correct_day: Option<DayKey>,
    pub last_answered_day: Option<DayKey>,
    pub last_result_correct: Option<bool>,
}

impl StreakState {
    /// Today's gate, derived from the answered-day marker.
    pub fn daily_outcome(&self, today: DayKey) -> DailyOutcome {
        if self.last_answered_day == Some(today) {
            DailyOutcome::AnsweredToday {
                correct: self.last_result_correct.unwrap_or(false),
            }
        } else {
            DailyOutcome::NotAnsweredToday
        }
    }
}
