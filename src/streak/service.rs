use std::sync::Arc;

use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, info, instrument};

use crate::clock::{Clock, DayKey};
use crate::event::{EventBus, ProgressEvent};
use crate::shared::CoreError;
use crate::stats::{counters, StatsAggregator};
use crate::store::PrefsStore;

use super::models::{keys, DailyOutcome, StreakState};

/// Streak tracker: applies at most one scoring transition per calendar day.
///
/// Day continuation rules:
/// - daily streak: increments when the last play was yesterday, otherwise
///   resets to 1 (first play ever, or a gap of two-plus days).
/// - correct streak: increments when yesterday was answered correctly,
///   resets to 1 on a correct answer after a gap, resets to 0 on any wrong
///   answer. The last-correct-day marker advances even on a wrong answer,
///   so the following day's correct answer is judged against a one-day gap
///   rather than a stale date.
pub struct StreakTracker {
    store: Arc<dyn PrefsStore>,
    clock: Arc<dyn Clock>,
    stats: Arc<StatsAggregator>,
    event_bus: EventBus,
    write_lock: AsyncMutex<()>,
    cached_day: RwLock<DayKey>,
}

impl StreakTracker {
    pub fn new(
        store: Arc<dyn PrefsStore>,
        clock: Arc<dyn Clock>,
        stats: Arc<StatsAggregator>,
        event_bus: EventBus,
    ) -> Self {
        let today = clock.today();
        Self {
            store,
            clock,
            stats,
            event_bus,
            write_lock: AsyncMutex::new(()),
            cached_day: RwLock::new(today),
        }
    }

    /// Registers today's quiz answer and returns the updated state.
    ///
    /// Idempotent per calendar day: only the first call of a day changes
    /// anything; later calls return the locked-in state unchanged.
    #[instrument(skip(self))]
    pub async fn register_answer(&self, correct: bool) -> Result<StreakState, CoreError> {
        let _guard = self.write_lock.lock().await;

        let today = self.clock.today();
        let mut state = self.load_state().await?;

        if state.last_answered_day == Some(today) {
            debug!(%today, "Answer already registered today; no-op");
            return Ok(state);
        }

        let yesterday = today.yesterday();

        if state.last_played_day != Some(today) {
            state.daily_streak = if state.last_played_day == Some(yesterday) {
                state.daily_streak + 1
            } else {
                1
            };
        }

        if correct {
            state.correct_streak = if state.last_correct_day == Some(yesterday) {
                state.correct_streak + 1
            } else {
                1
            };
        } else {
            state.correct_streak = 0;
        }
        // Marker moves on wrong answers too; see the type-level note.
        state.last_correct_day = Some(today);

        let previous_best = state.best_correct_streak;
        state.best_correct_streak = state.best_correct_streak.max(state.correct_streak);

        state.last_played_day = Some(today);
        state.last_answered_day = Some(today);
        state.last_result_correct = Some(correct);

        self.persist_state(&state).await?;
        info!(
            daily = state.daily_streak,
            correct_streak = state.correct_streak,
            "Registered daily answer"
        );

        if state.correct_streak > previous_best {
            self.event_bus.emit(ProgressEvent::NewStreakRecord {
                new_streak_value: state.correct_streak,
            });
        }

        self.stats.track_trivia_question_answered(correct).await?;
        self.stats
            .record_best(counters::BEST_DAILY_STREAK, state.daily_streak as i64)
            .await?;
        self.stats
            .record_best(
                counters::BEST_CORRECT_STREAK,
                state.best_correct_streak as i64,
            )
            .await?;

        Ok(state)
    }

    /// Current state, repaired from storage.
    pub async fn state(&self) -> Result<StreakState, CoreError> {
        self.load_state().await
    }

    pub async fn is_quiz_completed_today(&self) -> Result<bool, CoreError> {
        let state = self.load_state().await?;
        Ok(state.last_answered_day == Some(self.clock.today()))
    }

    /// Today's gate as a tagged variant.
    pub async fn daily_outcome(&self) -> Result<DailyOutcome, CoreError> {
        let state = self.load_state().await?;
        Ok(state.daily_outcome(self.clock.today()))
    }

    /// Read-side day-rollover check, called on every launch/foreground.
    /// Returns whether the calendar day changed since the last check. Never
    /// touches the streak counters; the derived reads simply start reporting
    /// against the new day.
    pub async fn refresh_if_new_day(&self) -> bool {
        let today = self.clock.today();
        {
            let cached = self.cached_day.read().await;
            if *cached == today {
                return false;
            }
        }
        let mut cached = self.cached_day.write().await;
        if *cached == today {
            return false;
        }
        debug!(from = %*cached, to = %today, "Day rolled over");
        *cached = today;
        true
    }

    /// Clears all streak state. Companion to the stats full reset.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        for key in self.store.keys_with_prefix("streak.").await? {
            self.store.remove(&key).await?;
        }
        // Keep the migration tombstone so legacy keys are not re-imported.
        self.store.set_bool(keys::MIGRATED_V2, true).await?;
        Ok(())
    }

    /// Loads and repairs the persisted record: negative counters clamp to
    /// zero, unparseable day keys read as "no prior day", and the best
    /// marker is raised to cover the current streak.
    async fn load_state(&self) -> Result<StreakState, CoreError> {
        self.migrate_legacy_schema().await?;

        let daily_streak = self.load_counter(keys::DAILY).await?;
        let correct_streak = self.load_counter(keys::CORRECT).await?;
        let best_correct_streak = self.load_counter(keys::CORRECT_BEST).await?.max(correct_streak);

        Ok(StreakState {
            daily_streak,
            correct_streak,
            best_correct_streak,
            last_played_day: self.load_day(keys::LAST_PLAYED_DAY).await?,
            last_correct_day: self.load_day(keys::LAST_CORRECT_DAY).await?,
            last_answered_day: self.load_day(keys::LAST_ANSWERED_DAY).await?,
            last_result_correct: self.store.get_bool(keys::LAST_RESULT_CORRECT).await?,
        })
    }

    async fn persist_state(&self, state: &StreakState) -> Result<(), CoreError> {
        self.store
            .set_int(keys::DAILY, state.daily_streak as i64)
            .await?;
        self.store
            .set_int(keys::CORRECT, state.correct_streak as i64)
            .await?;
        self.store
            .set_int(keys::CORRECT_BEST, state.best_correct_streak as i64)
            .await?;
        self.save_day(keys::LAST_PLAYED_DAY, state.last_played_day)
            .await?;
        self.save_day(keys::LAST_CORRECT_DAY, state.last_correct_day)
            .await?;
        self.save_day(keys::LAST_ANSWERED_DAY, state.last_answered_day)
            .await?;
        if let Some(correct) = state.last_result_correct {
            self.store.set_bool(keys::LAST_RESULT_CORRECT, correct).await?;
        }
        Ok(())
    }

    /// One-time import of the v1 single-counter schema. Runs at most once;
    /// the tombstone flag is written even when there was nothing to import.
    async fn migrate_legacy_schema(&self) -> Result<(), CoreError> {
        if self.store.get_bool(keys::MIGRATED_V2).await?.unwrap_or(false) {
            return Ok(());
        }

        if let Some(legacy_count) = self.store.get_int(keys::LEGACY_COUNT).await? {
            let daily = legacy_count.max(0);
            self.store.set_int(keys::DAILY, daily).await?;
            if let Some(last_play) = self.store.get_text(keys::LEGACY_LAST_PLAY).await? {
                if let Ok(day) = last_play.parse::<DayKey>() {
                    self.save_day(keys::LAST_PLAYED_DAY, Some(day)).await?;
                }
            }
            self.store.remove(keys::LEGACY_COUNT).await?;
            self.store.remove(keys::LEGACY_LAST_PLAY).await?;
            info!(daily, "Migrated legacy streak schema");
        }

        self.store.set_bool(keys::MIGRATED_V2, true).await?;
        Ok(())
    }

    async fn load_counter(&self, key: &str) -> Result<u32, CoreError> {
        Ok(self.store.get_int(key).await?.unwrap_or(0).clamp(0, u32::MAX as i64) as u32)
    }

    async fn load_day(&self, key: &str) -> Result<Option<DayKey>, CoreError> {
        Ok(self
            .store
            .get_text(key)
            .await?
            .and_then(|s| s.parse().ok()))
    }

    async fn save_day(&self, key: &str, day: Option<DayKey>) -> Result<(), CoreError> {
        if let Some(day) = day {
            self.store.set_text(key, &day.to_string()).await?;
        }
        Ok(())
    }
}
