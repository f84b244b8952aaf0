use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument};

use crate::event::{EventBus, ProgressEvent};
use crate::shared::{CoreError, XpLedger};
use crate::stats::models::counters;
use crate::store::PrefsStore;

use super::catalog::default_catalog;
use super::models::{AchievementDefinition, Category, UnlockRecord};

fn unlock_key(id: &str) -> String {
    format!("achievement.unlocked.{id}")
}

fn unlocked_at_key(id: &str) -> String {
    format!("achievement.unlockedAt.{id}")
}

/// Progress / achievement engine.
///
/// Owns the read-only catalog and the persisted unlock records. Unlocking is
/// one-way and idempotent: the first transition awards XP, bumps the
/// lifetime unlock counter, and emits an event; everything after is a no-op.
///
/// Evaluation is centralized: the stats aggregator calls
/// [`AchievementEngine::evaluate_counter`] after every counter mutation, so
/// no call site has to remember which achievements care about which counter.
pub struct AchievementEngine {
    catalog: Vec<AchievementDefinition>,
    by_id: HashMap<String, usize>,
    store: Arc<dyn PrefsStore>,
    ledger: Arc<dyn XpLedger>,
    event_bus: EventBus,
    write_lock: AsyncMutex<()>,
}

impl AchievementEngine {
    pub fn new(store: Arc<dyn PrefsStore>, ledger: Arc<dyn XpLedger>, event_bus: EventBus) -> Self {
        Self::with_catalog(default_catalog(), store, ledger, event_bus)
    }

    pub fn with_catalog(
        catalog: Vec<AchievementDefinition>,
        store: Arc<dyn PrefsStore>,
        ledger: Arc<dyn XpLedger>,
        event_bus: EventBus,
    ) -> Self {
        let by_id = catalog
            .iter()
            .enumerate()
            .map(|(index, def)| (def.id.clone(), index))
            .collect();
        Self {
            catalog,
            by_id,
            store,
            ledger,
            event_bus,
            write_lock: AsyncMutex::new(()),
        }
    }

    /// Catalog lookup by stable id.
    pub fn definition(&self, id: &str) -> Option<&AchievementDefinition> {
        self.by_id.get(id).map(|&index| &self.catalog[index])
    }

    pub fn catalog(&self) -> &[AchievementDefinition] {
        &self.catalog
    }

    pub fn achievements_in_category(&self, category: Category) -> Vec<&AchievementDefinition> {
        self.catalog
            .iter()
            .filter(|d| d.category == category)
            .collect()
    }

    /// Fraction of the requirement reached, clamped to `[0, 1]`.
    /// Manually gated achievements (no progress key) always report 0.
    pub async fn progress(&self, def: &AchievementDefinition) -> Result<f32, CoreError> {
        let Some(key) = &def.progress_key else {
            return Ok(0.0);
        };
        let current = self.counter_value(key).await?;
        if def.requirement <= 0 {
            return Ok(1.0);
        }
        Ok((current as f32 / def.requirement as f32).min(1.0))
    }

    pub async fn is_unlocked(&self, id: &str) -> Result<bool, CoreError> {
        Ok(self
            .store
            .get_bool(&unlock_key(id))
            .await?
            .unwrap_or(false))
    }

    pub async fn unlock_record(&self, id: &str) -> Result<UnlockRecord, CoreError> {
        Ok(UnlockRecord {
            unlocked: self.is_unlocked(id).await?,
            unlocked_at: self.store.get_timestamp(&unlocked_at_key(id)).await?,
        })
    }

    /// Unlocks an achievement by id. Idempotent: returns `true` only when
    /// this call performed the transition. Unknown ids are ignored.
    #[instrument(skip(self))]
    pub async fn unlock(&self, id: &str) -> Result<bool, CoreError> {
        let _guard = self.write_lock.lock().await;

        let Some(def) = self.definition(id) else {
            debug!(id, "Unlock requested for unknown achievement");
            return Ok(false);
        };
        if self.is_unlocked(id).await? {
            return Ok(false);
        }

        let def = def.clone();
        self.apply_unlock(&def).await?;
        // The unlock counter moved, so meta-achievements may now qualify.
        self.run_unlock_pass(counters::ACHIEVEMENTS_UNLOCKED).await?;
        Ok(true)
    }

    /// Post-mutation hook: re-evaluates every achievement whose progress key
    /// names the mutated counter, unlocking any that now qualify. Returns the
    /// ids unlocked by this pass, including meta-achievements reached through
    /// the unlock counter.
    pub async fn evaluate_counter(&self, counter_key: &str) -> Result<Vec<String>, CoreError> {
        let _guard = self.write_lock.lock().await;
        self.run_unlock_pass(counter_key).await
    }

    /// Listing for the achievements screen: everything already unlocked.
    pub async fn unlocked_achievements(&self) -> Result<Vec<&AchievementDefinition>, CoreError> {
        let mut unlocked = Vec::new();
        for def in &self.catalog {
            if self.is_unlocked(&def.id).await? {
                unlocked.push(def);
            }
        }
        Ok(unlocked)
    }

    /// Listing for the achievements screen: still-locked entries, with
    /// secret achievements withheld to preserve the surprise.
    pub async fn locked_achievements(&self) -> Result<Vec<&AchievementDefinition>, CoreError> {
        let mut locked = Vec::new();
        for def in &self.catalog {
            if !def.is_secret && !self.is_unlocked(&def.id).await? {
                locked.push(def);
            }
        }
        Ok(locked)
    }

    /// Sum of XP rewards over unlocked achievements.
    pub async fn total_xp_from_achievements(&self) -> Result<u32, CoreError> {
        let mut total = 0;
        for def in &self.catalog {
            if self.is_unlocked(&def.id).await? {
                total += def.xp_reward;
            }
        }
        Ok(total)
    }

    /// Rounded completion percent. Secret-but-locked achievements are left
    /// out of the denominator so hidden content cannot cap the visible
    /// percentage below 100.
    pub async fn completion_percentage(&self) -> Result<u32, CoreError> {
        let mut unlocked = 0u32;
        let mut visible = 0u32;
        for def in &self.catalog {
            let is_unlocked = self.is_unlocked(&def.id).await?;
            if is_unlocked {
                unlocked += 1;
            }
            if is_unlocked || !def.is_secret {
                visible += 1;
            }
        }
        if visible == 0 {
            return Ok(0);
        }
        Ok((unlocked as f64 / visible as f64 * 100.0).round() as u32)
    }

    async fn counter_value(&self, key: &str) -> Result<i64, CoreError> {
        // Negative values mean corrupted storage; clamp instead of failing.
        Ok(self.store.get_int(key).await?.unwrap_or(0).max(0))
    }

    /// Worklist pass: unlock everything reachable from the given counter,
    /// chasing unlock-counter bumps until nothing new qualifies. Every
    /// unlock re-queues the unlock counter, so back-to-back meta thresholds
    /// fire in the same pass; terminates because a key is only re-queued on
    /// a fresh unlock and the catalog is finite.
    async fn run_unlock_pass(&self, initial_key: &str) -> Result<Vec<String>, CoreError> {
        let mut worklist = vec![initial_key.to_string()];
        let mut newly_unlocked = Vec::new();

        while let Some(key) = worklist.pop() {
            let current = self.counter_value(&key).await?;
            let candidates: Vec<AchievementDefinition> = self
                .catalog
                .iter()
                .filter(|d| d.progress_key.as_deref() == Some(key.as_str()))
                .filter(|d| current >= d.requirement)
                .cloned()
                .collect();

            for def in candidates {
                if self.is_unlocked(&def.id).await? {
                    continue;
                }
                self.apply_unlock(&def).await?;
                newly_unlocked.push(def.id.clone());
                worklist.push(counters::ACHIEVEMENTS_UNLOCKED.to_string());
            }
        }

        Ok(newly_unlocked)
    }

    /// The single locked-to-unlocked transition. Caller holds the write lock
    /// and has verified the achievement is still locked.
    async fn apply_unlock(&self, def: &AchievementDefinition) -> Result<(), CoreError> {
        self.store.set_bool(&unlock_key(&def.id), true).await?;
        self.store
            .set_timestamp(&unlocked_at_key(&def.id), Utc::now())
            .await?;

        let unlocked_count = self.counter_value(counters::ACHIEVEMENTS_UNLOCKED).await? + 1;
        self.store
            .set_int(counters::ACHIEVEMENTS_UNLOCKED, unlocked_count)
            .await?;

        self.ledger
            .add_xp(def.xp_reward, &format!("achievement:{}", def.id))
            .await;

        info!(id = %def.id, xp = def.xp_reward, "Achievement unlocked");
        self.event_bus.emit(ProgressEvent::AchievementUnlocked {
            id: def.id.clone(),
            xp_reward: def.xp_reward,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::models::Rarity;
    use crate::shared::test_utils::RecordingXpLedger;
    use crate::store::InMemoryPrefsStore;

    fn small_catalog() -> Vec<AchievementDefinition> {
        vec![
            AchievementDefinition::new(
                "first_answer",
                "Opening Scene",
                "Answer your first trivia question",
                Category::Trivia,
                Rarity::Common,
                1,
                Some(counters::TOTAL_TRIVIA_ANSWERED),
            ),
            AchievementDefinition::new(
                "answers_10",
                "Getting Hooked",
                "Answer 10 trivia questions",
                Category::Trivia,
                Rarity::Common,
                10,
                Some(counters::TOTAL_TRIVIA_ANSWERED),
            ),
            AchievementDefinition::new(
                "collector_2",
                "Shelf Starter",
                "Unlock 2 achievements",
                Category::Dedication,
                Rarity::Uncommon,
                2,
                Some(counters::ACHIEVEMENTS_UNLOCKED),
            ),
            AchievementDefinition::new(
                "hidden_gem",
                "Hidden Gem",
                "A secret goal",
                Category::Elite,
                Rarity::Rare,
                1,
                None,
            )
            .secret(),
        ]
    }

    struct Fixture {
        store: Arc<InMemoryPrefsStore>,
        ledger: Arc<RecordingXpLedger>,
        engine: AchievementEngine,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryPrefsStore::new());
        let ledger = Arc::new(RecordingXpLedger::new());
        let engine = AchievementEngine::with_catalog(
            small_catalog(),
            store.clone(),
            ledger.clone(),
            EventBus::new(),
        );
        Fixture {
            store,
            ledger,
            engine,
        }
    }

    #[tokio::test]
    async fn unlock_is_idempotent_and_awards_xp_once() {
        let fx = fixture();

        assert!(fx.engine.unlock("first_answer").await.unwrap());
        let record = fx.engine.unlock_record("first_answer").await.unwrap();
        assert!(record.unlocked);
        let first_timestamp = record.unlocked_at.unwrap();

        assert!(!fx.engine.unlock("first_answer").await.unwrap());
        let record_again = fx.engine.unlock_record("first_answer").await.unwrap();
        assert_eq!(record_again.unlocked_at.unwrap(), first_timestamp);

        let awards = fx.ledger.entries().await;
        assert_eq!(awards.len(), 1);
        assert_eq!(awards[0], (50, "achievement:first_answer".to_string()));
    }

    #[tokio::test]
    async fn unknown_id_is_ignored() {
        let fx = fixture();
        assert!(!fx.engine.unlock("does_not_exist").await.unwrap());
        assert!(fx.ledger.entries().await.is_empty());
    }

    #[tokio::test]
    async fn evaluate_counter_unlocks_satisfied_achievements() {
        let fx = fixture();
        fx.store
            .set_int(counters::TOTAL_TRIVIA_ANSWERED, 10)
            .await
            .unwrap();

        let mut unlocked = fx
            .engine
            .evaluate_counter(counters::TOTAL_TRIVIA_ANSWERED)
            .await
            .unwrap();
        unlocked.sort();

        // Both trivia milestones fire, and the second unlock pushes the
        // lifetime counter to 2, chaining into the meta-achievement.
        assert_eq!(unlocked, vec!["answers_10", "collector_2", "first_answer"]);
        assert!(fx.engine.is_unlocked("collector_2").await.unwrap());
        assert_eq!(
            fx.store
                .get_int(counters::ACHIEVEMENTS_UNLOCKED)
                .await
                .unwrap(),
            Some(3)
        );
    }

    #[tokio::test]
    async fn adjacent_meta_thresholds_unlock_in_one_pass() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let ledger = Arc::new(RecordingXpLedger::new());
        let catalog = vec![
            AchievementDefinition::new(
                "starter",
                "Starter",
                "A manually gated goal",
                Category::Elite,
                Rarity::Common,
                1,
                None,
            ),
            AchievementDefinition::new(
                "meta_1",
                "Meta One",
                "Unlock 1 achievement",
                Category::Dedication,
                Rarity::Common,
                1,
                Some(counters::ACHIEVEMENTS_UNLOCKED),
            ),
            AchievementDefinition::new(
                "meta_2",
                "Meta Two",
                "Unlock 2 achievements",
                Category::Dedication,
                Rarity::Uncommon,
                2,
                Some(counters::ACHIEVEMENTS_UNLOCKED),
            ),
        ];
        let engine =
            AchievementEngine::with_catalog(catalog, store.clone(), ledger, EventBus::new());

        engine.unlock("starter").await.unwrap();

        // starter pushes the counter to 1, meta_1 to 2, and meta_2 must
        // follow within the same pass rather than waiting for a later
        // unrelated mutation.
        assert!(engine.is_unlocked("meta_1").await.unwrap());
        assert!(engine.is_unlocked("meta_2").await.unwrap());
        assert_eq!(
            store
                .get_int(counters::ACHIEVEMENTS_UNLOCKED)
                .await
                .unwrap(),
            Some(3)
        );
    }

    #[tokio::test]
    async fn evaluate_counter_below_threshold_unlocks_nothing() {
        let fx = fixture();
        fx.store
            .set_int(counters::TOTAL_TRIVIA_ANSWERED, 0)
            .await
            .unwrap();

        let unlocked = fx
            .engine
            .evaluate_counter(counters::TOTAL_TRIVIA_ANSWERED)
            .await
            .unwrap();
        assert!(unlocked.is_empty());
    }

    #[tokio::test]
    async fn progress_is_clamped_and_zero_for_manual() {
        let fx = fixture();
        fx.store
            .set_int(counters::TOTAL_TRIVIA_ANSWERED, 25)
            .await
            .unwrap();

        let answers_10 = fx.engine.definition("answers_10").unwrap();
        assert_eq!(fx.engine.progress(answers_10).await.unwrap(), 1.0);

        let hidden = fx.engine.definition("hidden_gem").unwrap();
        assert_eq!(fx.engine.progress(hidden).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn progress_reports_partial_fraction() {
        let fx = fixture();
        fx.store
            .set_int(counters::TOTAL_TRIVIA_ANSWERED, 5)
            .await
            .unwrap();

        let answers_10 = fx.engine.definition("answers_10").unwrap();
        let progress = fx.engine.progress(answers_10).await.unwrap();
        assert!((progress - 0.5).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn secret_achievements_hidden_from_locked_listing() {
        let fx = fixture();

        let locked = fx.engine.locked_achievements().await.unwrap();
        assert!(locked.iter().all(|d| d.id != "hidden_gem"));

        fx.engine.unlock("hidden_gem").await.unwrap();
        let unlocked = fx.engine.unlocked_achievements().await.unwrap();
        assert!(unlocked.iter().any(|d| d.id == "hidden_gem"));
    }

    #[tokio::test]
    async fn completion_excludes_locked_secrets_from_denominator() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let ledger = Arc::new(RecordingXpLedger::new());
        let catalog = vec![
            AchievementDefinition::new(
                "visible",
                "Visible",
                "A normal goal",
                Category::Trivia,
                Rarity::Common,
                1,
                None,
            ),
            AchievementDefinition::new(
                "hidden",
                "Hidden",
                "A secret goal",
                Category::Elite,
                Rarity::Rare,
                1,
                None,
            )
            .secret(),
        ];
        let engine = AchievementEngine::with_catalog(catalog, store, ledger, EventBus::new());

        engine.unlock("visible").await.unwrap();
        assert_eq!(engine.completion_percentage().await.unwrap(), 100);

        engine.unlock("hidden").await.unwrap();
        assert_eq!(engine.completion_percentage().await.unwrap(), 100);
    }

    #[tokio::test]
    async fn total_xp_sums_unlocked_rewards() {
        let fx = fixture();
        fx.engine.unlock("first_answer").await.unwrap();
        fx.engine.unlock("hidden_gem").await.unwrap();

        // common (50) + rare (200); the chained collector_2 meta-unlock
        // adds its uncommon reward (100) as well.
        assert_eq!(fx.engine.total_xp_from_achievements().await.unwrap(), 350);
    }

    #[tokio::test]
    async fn unlock_emits_event_on_bus() {
        let store = Arc::new(InMemoryPrefsStore::new());
        let ledger = Arc::new(RecordingXpLedger::new());
        let bus = EventBus::new();
        let engine =
            AchievementEngine::with_catalog(small_catalog(), store, ledger, bus.clone());
        let mut receiver = bus.subscribe();

        engine.unlock("first_answer").await.unwrap();

        let event = receiver.recv().await.unwrap();
        assert_eq!(
            event,
            ProgressEvent::AchievementUnlocked {
                id: "first_answer".to_string(),
                xp_reward: 50,
            }
        );
    }
}
