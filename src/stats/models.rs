use serde::{Deserialize, Serialize};

/// Persisted counter keys. Achievements reference these by name through
/// their `progress_key`, so the set of strings here is the schema shared by
/// the aggregator and the achievement catalog.
pub mod counters {
    pub const TOTAL_TRIVIA_ANSWERED: &str = "stats.totalTriviaAnswered";
    pub const TOTAL_TRIVIA_CORRECT: &str = "stats.totalTriviaCorrect";
    pub const DISCOVER_CARDS_VIEWED: &str = "stats.discoverCardsViewed";
    pub const APP_LAUNCH_COUNT: &str = "stats.appLaunchCount";
    pub const QUOTES_FAVORITED: &str = "stats.quotesFavorited";
    pub const QUOTES_SHARED: &str = "stats.quotesShared";
    pub const WATCHLIST_COUNT: &str = "stats.watchlistCount";
    /// Max semantics: highest endless-mode round reached, not a running total.
    pub const BEST_ENDLESS_ROUND: &str = "stats.bestEndlessRound";
    /// Max semantics: high-water mark mirrored in by the streak tracker.
    pub const BEST_DAILY_STREAK: &str = "stats.bestDailyStreak";
    /// Max semantics: high-water mark mirrored in by the streak tracker.
    pub const BEST_CORRECT_STREAK: &str = "stats.bestCorrectStreak";
    pub const ACHIEVEMENTS_UNLOCKED: &str = "stats.achievementsUnlocked";
}

/// Launch timestamp keys, kept beside the counters but holding timestamps.
pub mod timestamps {
    pub const FIRST_LAUNCH_DATE: &str = "stats.firstLaunchDate";
    pub const LAST_LAUNCH_DATE: &str = "stats.lastLaunchDate";
}

/// Read-only view of the lifetime counters for the host's stats screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_trivia_answered: i64,
    pub total_trivia_correct: i64,
    pub discover_cards_viewed: i64,
    pub app_launch_count: i64,
    pub quotes_favorited: i64,
    pub quotes_shared: i64,
    pub watchlist_count: i64,
    pub best_endless_round: i64,
    pub best_daily_streak: i64,
    pub best_correct_streak: i64,
    pub achievements_unlocked: i64,
    /// Rounded integer percent, 0 when nothing answered yet.
    pub trivia_accuracy: u32,
    /// Inclusive day-span between first and last launch. A coarse
    /// approximation of distinct active days, not a true unique-day count.
    pub unique_days_used: i64,
}
