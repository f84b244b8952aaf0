use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::achievements::AchievementEngine;
use crate::clock::Clock;
use crate::event::EventBus;
use crate::stats::StatsAggregator;
use crate::store::{PrefsStore, StoreError};
use crate::streak::StreakTracker;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Reward collaborator. XP-to-level mapping is a presentation concern, so
/// the engine only reports awards outward through this contract.
#[async_trait]
pub trait XpLedger: Send + Sync {
    async fn add_xp(&self, amount: u32, reason: &str);
}

/// Shared application core containing all dependencies
///
/// The host constructs this once with its store, clock, and XP ledger
/// handles; there is no ambient global state, so tests swap in an in-memory
/// store and a fixed clock.
#[derive(Clone)]
pub struct AppCore {
    pub store: Arc<dyn PrefsStore>,
    pub clock: Arc<dyn Clock>,
    pub event_bus: EventBus,
    pub achievements: Arc<AchievementEngine>,
    pub stats: Arc<StatsAggregator>,
    pub streaks: Arc<StreakTracker>,
}

impl AppCore {
    pub fn new(
        store: Arc<dyn PrefsStore>,
        clock: Arc<dyn Clock>,
        ledger: Arc<dyn XpLedger>,
    ) -> Self {
        let event_bus = EventBus::new();
        let achievements = Arc::new(AchievementEngine::new(
            store.clone(),
            ledger,
            event_bus.clone(),
        ));
        let stats = Arc::new(StatsAggregator::new(store.clone(), achievements.clone()));
        let streaks = Arc::new(StreakTracker::new(
            store.clone(),
            clock.clone(),
            stats.clone(),
            event_bus.clone(),
        ));
        Self {
            store,
            clock,
            event_bus,
            achievements,
            stats,
            streaks,
        }
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use tokio::sync::Mutex;

    /// Ledger that discards awards - for tests that don't care about XP
    pub struct NullXpLedger;

    #[async_trait]
    impl XpLedger for NullXpLedger {
        async fn add_xp(&self, _amount: u32, _reason: &str) {}
    }

    /// Ledger that records every award for assertion
    #[derive(Default)]
    pub struct RecordingXpLedger {
        entries: Mutex<Vec<(u32, String)>>,
    }

    impl RecordingXpLedger {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn entries(&self) -> Vec<(u32, String)> {
            self.entries.lock().await.clone()
        }

        pub async fn total(&self) -> u32 {
            self.entries.lock().await.iter().map(|(xp, _)| xp).sum()
        }
    }

    #[async_trait]
    impl XpLedger for RecordingXpLedger {
        async fn add_xp(&self, amount: u32, reason: &str) {
            let mut entries = self.entries.lock().await;
            entries.push((amount, reason.to_string()));
        }
    }
}
