//! Hand-authored achievement catalog.
//!
//! Fixed at startup and read-only afterwards. Every entry with a progress
//! key names a counter from `stats::models::counters`; entries without one
//! are manually gated (the host unlocks them from its own signals, e.g. a
//! completed subscription purchase).

use crate::stats::models::counters;

use super::models::{AchievementDefinition, Category, Rarity};

pub fn default_catalog() -> Vec<AchievementDefinition> {
    use Category::*;
    use Rarity::*;

    let def = AchievementDefinition::new;

    vec![
        // Streaks: daily participation
        def(
            "streak_3",
            "Warming Up",
            "Play 3 days in a row",
            Streaks,
            Common,
            3,
            Some(counters::BEST_DAILY_STREAK),
        ),
        def(
            "streak_7",
            "One Full Week",
            "Play 7 days in a row",
            Streaks,
            Uncommon,
            7,
            Some(counters::BEST_DAILY_STREAK),
        ),
        def(
            "streak_14",
            "Fortnight Regular",
            "Play 14 days in a row",
            Streaks,
            Rare,
            14,
            Some(counters::BEST_DAILY_STREAK),
        ),
        def(
            "streak_30",
            "Month of Movies",
            "Play 30 days in a row",
            Streaks,
            Epic,
            30,
            Some(counters::BEST_DAILY_STREAK),
        ),
        def(
            "streak_100",
            "Century Club",
            "Play 100 days in a row",
            Streaks,
            Legendary,
            100,
            Some(counters::BEST_DAILY_STREAK),
        ),
        // Streaks: consecutive correct answers
        def(
            "sharp_3",
            "On a Roll",
            "Answer correctly 3 days running",
            Streaks,
            Common,
            3,
            Some(counters::BEST_CORRECT_STREAK),
        ),
        def(
            "sharp_5",
            "Sharp Shooter",
            "Answer correctly 5 days running",
            Streaks,
            Uncommon,
            5,
            Some(counters::BEST_CORRECT_STREAK),
        ),
        def(
            "sharp_10",
            "Unstoppable",
            "Answer correctly 10 days running",
            Streaks,
            Rare,
            10,
            Some(counters::BEST_CORRECT_STREAK),
        ),
        def(
            "sharp_25",
            "Flawless Month",
            "Answer correctly 25 days running",
            Streaks,
            Epic,
            25,
            Some(counters::BEST_CORRECT_STREAK),
        ),
        // Trivia: volume
        def(
            "first_answer",
            "Opening Scene",
            "Answer your first trivia question",
            Trivia,
            Common,
            1,
            Some(counters::TOTAL_TRIVIA_ANSWERED),
        ),
        def(
            "answers_10",
            "Getting Hooked",
            "Answer 10 trivia questions",
            Trivia,
            Common,
            10,
            Some(counters::TOTAL_TRIVIA_ANSWERED),
        ),
        def(
            "answers_50",
            "Quiz Regular",
            "Answer 50 trivia questions",
            Trivia,
            Uncommon,
            50,
            Some(counters::TOTAL_TRIVIA_ANSWERED),
        ),
        def(
            "answers_250",
            "Trivia Veteran",
            "Answer 250 trivia questions",
            Trivia,
            Rare,
            250,
            Some(counters::TOTAL_TRIVIA_ANSWERED),
        ),
        def(
            "answers_1000",
            "Walking Encyclopedia",
            "Answer 1000 trivia questions",
            Trivia,
            Epic,
            1000,
            Some(counters::TOTAL_TRIVIA_ANSWERED),
        ),
        // Trivia: correctness
        def(
            "first_correct",
            "Critic's Pick",
            "Get your first answer right",
            Trivia,
            Common,
            1,
            Some(counters::TOTAL_TRIVIA_CORRECT),
        ),
        def(
            "correct_25",
            "Film Buff",
            "Get 25 answers right",
            Trivia,
            Uncommon,
            25,
            Some(counters::TOTAL_TRIVIA_CORRECT),
        ),
        def(
            "correct_100",
            "Cinephile",
            "Get 100 answers right",
            Trivia,
            Rare,
            100,
            Some(counters::TOTAL_TRIVIA_CORRECT),
        ),
        def(
            "correct_500",
            "Walking IMDb",
            "Get 500 answers right",
            Trivia,
            Epic,
            500,
            Some(counters::TOTAL_TRIVIA_CORRECT),
        ),
        // Trivia: endless mode
        def(
            "endless_10",
            "Marathon Runner",
            "Reach round 10 in endless mode",
            Trivia,
            Uncommon,
            10,
            Some(counters::BEST_ENDLESS_ROUND),
        ),
        def(
            "endless_25",
            "Iron Will",
            "Reach round 25 in endless mode",
            Trivia,
            Rare,
            25,
            Some(counters::BEST_ENDLESS_ROUND),
        ),
        def(
            "endless_50",
            "Director's Cut",
            "Reach round 50 in endless mode",
            Trivia,
            Epic,
            50,
            Some(counters::BEST_ENDLESS_ROUND),
        ),
        // Discovery
        def(
            "first_discover",
            "Window Shopper",
            "View your first discovery card",
            Discovery,
            Common,
            1,
            Some(counters::DISCOVER_CARDS_VIEWED),
        ),
        def(
            "discover_50",
            "Browsing the Aisles",
            "View 50 discovery cards",
            Discovery,
            Uncommon,
            50,
            Some(counters::DISCOVER_CARDS_VIEWED),
        ),
        def(
            "discover_500",
            "Deep Catalog",
            "View 500 discovery cards",
            Discovery,
            Rare,
            500,
            Some(counters::DISCOVER_CARDS_VIEWED),
        ),
        def(
            "watchlist_5",
            "Queue Builder",
            "Add 5 movies to your watchlist",
            Discovery,
            Uncommon,
            5,
            Some(counters::WATCHLIST_COUNT),
        ),
        def(
            "watchlist_25",
            "Endless Queue",
            "Add 25 movies to your watchlist",
            Discovery,
            Rare,
            25,
            Some(counters::WATCHLIST_COUNT),
        ),
        def(
            "first_favorite",
            "Quotable",
            "Favorite your first quote",
            Discovery,
            Common,
            1,
            Some(counters::QUOTES_FAVORITED),
        ),
        def(
            "favorites_25",
            "Commonplace Book",
            "Favorite 25 quotes",
            Discovery,
            Uncommon,
            25,
            Some(counters::QUOTES_FAVORITED),
        ),
        def(
            "favorites_100",
            "Curator",
            "Favorite 100 quotes",
            Discovery,
            Rare,
            100,
            Some(counters::QUOTES_FAVORITED),
        ),
        // Dedication
        def(
            "launches_10",
            "Regular Visitor",
            "Open the app 10 times",
            Dedication,
            Common,
            10,
            Some(counters::APP_LAUNCH_COUNT),
        ),
        def(
            "launches_100",
            "Daily Ritual",
            "Open the app 100 times",
            Dedication,
            Uncommon,
            100,
            Some(counters::APP_LAUNCH_COUNT),
        ),
        def(
            "launches_365",
            "A Year Together",
            "Open the app 365 times",
            Dedication,
            Rare,
            365,
            Some(counters::APP_LAUNCH_COUNT),
        ),
        def(
            "collector_5",
            "Shelf Starter",
            "Unlock 5 achievements",
            Dedication,
            Uncommon,
            5,
            Some(counters::ACHIEVEMENTS_UNLOCKED),
        ),
        def(
            "collector_15",
            "Trophy Case",
            "Unlock 15 achievements",
            Dedication,
            Rare,
            15,
            Some(counters::ACHIEVEMENTS_UNLOCKED),
        ),
        def(
            "collector_30",
            "Completionist",
            "Unlock 30 achievements",
            Dedication,
            Epic,
            30,
            Some(counters::ACHIEVEMENTS_UNLOCKED),
        ),
        // Social
        def(
            "first_share",
            "Word of Mouth",
            "Share your first quote",
            Social,
            Common,
            1,
            Some(counters::QUOTES_SHARED),
        ),
        def(
            "shares_10",
            "Hype Machine",
            "Share 10 quotes",
            Social,
            Uncommon,
            10,
            Some(counters::QUOTES_SHARED),
        ),
        def(
            "shares_50",
            "Publicist",
            "Share 50 quotes",
            Social,
            Rare,
            50,
            Some(counters::QUOTES_SHARED),
        ),
        // Elite
        def(
            "subscriber",
            "Front Row Seat",
            "Become a premium subscriber",
            Elite,
            Epic,
            1,
            None,
        )
        .premium(),
        def(
            "founding_member",
            "Founding Member",
            "Subscribed during the launch window",
            Elite,
            Legendary,
            1,
            None,
        )
        .premium()
        .secret(),
        def(
            "night_owl",
            "Midnight Screening",
            "Play a quiz after midnight",
            Elite,
            Rare,
            1,
            None,
        )
        .secret(),
        def(
            "perfect_week",
            "Perfect Week",
            "A full week of correct answers",
            Elite,
            Epic,
            7,
            Some(counters::BEST_CORRECT_STREAK),
        )
        .secret(),
    ]
}
