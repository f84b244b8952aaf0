use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, instrument};

use crate::achievements::AchievementEngine;
use crate::shared::CoreError;
use crate::store::PrefsStore;

use super::models::{counters, timestamps, StatsSnapshot};

/// Lifetime counter aggregator.
///
/// Every mutation goes through here, persists immediately, and then runs the
/// achievement engine's post-mutation hook for the touched counter, so the
/// catalog is the single source of truth for which counters matter.
pub struct StatsAggregator {
    store: Arc<dyn PrefsStore>,
    achievements: Arc<AchievementEngine>,
    write_lock: AsyncMutex<()>,
}

impl StatsAggregator {
    pub fn new(store: Arc<dyn PrefsStore>, achievements: Arc<AchievementEngine>) -> Self {
        Self {
            store,
            achievements,
            write_lock: AsyncMutex::new(()),
        }
    }

    /// Current value of a counter, repaired to zero when missing or
    /// corrupted.
    pub async fn counter(&self, key: &str) -> Result<i64, CoreError> {
        Ok(self.store.get_int(key).await?.unwrap_or(0).max(0))
    }

    #[instrument(skip(self))]
    pub async fn track_trivia_question_answered(&self, correct: bool) -> Result<(), CoreError> {
        self.increment(counters::TOTAL_TRIVIA_ANSWERED).await?;
        if correct {
            self.increment(counters::TOTAL_TRIVIA_CORRECT).await?;
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn track_discover_card_viewed(&self) -> Result<(), CoreError> {
        self.increment(counters::DISCOVER_CARDS_VIEWED).await
    }

    #[instrument(skip(self))]
    pub async fn track_quote_favorited(&self) -> Result<(), CoreError> {
        self.increment(counters::QUOTES_FAVORITED).await
    }

    #[instrument(skip(self))]
    pub async fn track_quote_shared(&self) -> Result<(), CoreError> {
        self.increment(counters::QUOTES_SHARED).await
    }

    #[instrument(skip(self))]
    pub async fn track_watchlist_added(&self) -> Result<(), CoreError> {
        self.increment(counters::WATCHLIST_COUNT).await
    }

    /// Records a launch: bumps the launch counter and maintains the
    /// first/last launch timestamps.
    #[instrument(skip(self))]
    pub async fn track_app_launched(&self) -> Result<(), CoreError> {
        {
            let _guard = self.write_lock.lock().await;
            let now = Utc::now();
            if self
                .store
                .get_timestamp(timestamps::FIRST_LAUNCH_DATE)
                .await?
                .is_none()
            {
                self.store
                    .set_timestamp(timestamps::FIRST_LAUNCH_DATE, now)
                    .await?;
            }
            self.store
                .set_timestamp(timestamps::LAST_LAUNCH_DATE, now)
                .await?;
        }
        self.increment(counters::APP_LAUNCH_COUNT).await
    }

    /// Max-semantics update for the endless-mode best round.
    #[instrument(skip(self))]
    pub async fn record_endless_round(&self, round: i64) -> Result<(), CoreError> {
        self.record_best(counters::BEST_ENDLESS_ROUND, round).await
    }

    /// Raises a high-water-mark counter to `value` if it is a new maximum,
    /// then runs the achievement hook. Lower values are ignored.
    pub async fn record_best(&self, key: &str, value: i64) -> Result<(), CoreError> {
        let changed = {
            let _guard = self.write_lock.lock().await;
            let current = self.counter(key).await?;
            if value > current {
                self.store.set_int(key, value).await?;
                debug!(key, value, "Recorded new best");
                true
            } else {
                false
            }
        };
        if changed {
            self.achievements.evaluate_counter(key).await?;
        }
        Ok(())
    }

    /// Derived read: rounded percent of answered questions that were
    /// correct, 0 before any answer.
    pub async fn trivia_accuracy(&self) -> Result<u32, CoreError> {
        let total = self.counter(counters::TOTAL_TRIVIA_ANSWERED).await?;
        if total == 0 {
            return Ok(0);
        }
        let correct = self.counter(counters::TOTAL_TRIVIA_CORRECT).await?;
        Ok((correct as f64 / total as f64 * 100.0).round() as u32)
    }

    /// Derived read: inclusive day-span between first and last launch.
    /// A coarse approximation of distinct active days, not a true count.
    pub async fn unique_days_used(&self) -> Result<i64, CoreError> {
        let first = self
            .store
            .get_timestamp(timestamps::FIRST_LAUNCH_DATE)
            .await?;
        let last = self
            .store
            .get_timestamp(timestamps::LAST_LAUNCH_DATE)
            .await?;
        match (first, last) {
            (Some(first), Some(last)) if last >= first => {
                Ok((last.date_naive() - first.date_naive()).num_days() + 1)
            }
            _ => Ok(0),
        }
    }

    /// Read-only view for the host's stats screen.
    pub async fn snapshot(&self) -> Result<StatsSnapshot, CoreError> {
        Ok(StatsSnapshot {
            total_trivia_answered: self.counter(counters::TOTAL_TRIVIA_ANSWERED).await?,
            total_trivia_correct: self.counter(counters::TOTAL_TRIVIA_CORRECT).await?,
            discover_cards_viewed: self.counter(counters::DISCOVER_CARDS_VIEWED).await?,
            app_launch_count: self.counter(counters::APP_LAUNCH_COUNT).await?,
            quotes_favorited: self.counter(counters::QUOTES_FAVORITED).await?,
            quotes_shared: self.counter(counters::QUOTES_SHARED).await?,
            watchlist_count: self.counter(counters::WATCHLIST_COUNT).await?,
            best_endless_round: self.counter(counters::BEST_ENDLESS_ROUND).await?,
            best_daily_streak: self.counter(counters::BEST_DAILY_STREAK).await?,
            best_correct_streak: self.counter(counters::BEST_CORRECT_STREAK).await?,
            achievements_unlocked: self.counter(counters::ACHIEVEMENTS_UNLOCKED).await?,
            trivia_accuracy: self.trivia_accuracy().await?,
            unique_days_used: self.unique_days_used().await?,
        })
    }

    /// Full reset: clears every counter and both launch timestamps. Unlock
    /// records are one-way and survive, so the lifetime unlock counter is
    /// re-seeded from them afterwards.
    #[instrument(skip(self))]
    pub async fn reset_all(&self) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        for key in self.store.keys_with_prefix("stats.").await? {
            self.store.remove(&key).await?;
        }

        let mut unlocked = 0i64;
        for def in self.achievements.catalog() {
            if self.achievements.is_unlocked(&def.id).await? {
                unlocked += 1;
            }
        }
        if unlocked > 0 {
            self.store
                .set_int(counters::ACHIEVEMENTS_UNLOCKED, unlocked)
                .await?;
        }
        Ok(())
    }

    async fn increment(&self, key: &str) -> Result<(), CoreError> {
        {
            let _guard = self.write_lock.lock().await;
            let next = self.counter(key).await? + 1;
            self.store.set_int(key, next).await?;
            debug!(key, value = next, "Counter incremented");
        }
        self.achievements.evaluate_counter(key).await?;
        Ok(())
    }
}
