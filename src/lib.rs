// Library crate for the daily streak and progress-tracking engine
// This file exposes the public API for integration tests and the host app

pub mod achievements;
pub mod clock;
pub mod event;
pub mod shared;
pub mod stats;
pub mod store;
pub mod streak;

// Re-export commonly used types for easier access in tests
pub use achievements::{AchievementDefinition, AchievementEngine, Category, Rarity, UnlockRecord};
pub use clock::{Clock, DayKey, FixedClock, SystemClock};
pub use event::{EventBus, ProgressEvent};
pub use shared::{AppCore, CoreError, XpLedger};
pub use stats::{StatsAggregator, StatsSnapshot};
pub use store::{InMemoryPrefsStore, PrefsStore};
pub use streak::{DailyOutcome, StreakState, StreakTracker};
