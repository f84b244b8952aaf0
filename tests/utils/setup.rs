use std::sync::{Arc, Once};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reeltrivia::{AppCore, DayKey, FixedClock, InMemoryPrefsStore};

use super::mocks::RecordingXpLedger;

static TRACING: Once = Once::new();

/// Initialize tracing once per test binary so `RUST_LOG` controls the
/// engine's debug output during test runs.
fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "reeltrivia=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// Fully wired engine over an in-memory store, a pinned clock, and a
/// recording XP ledger.
pub struct TestCore {
    pub core: AppCore,
    pub store: Arc<InMemoryPrefsStore>,
    pub clock: Arc<FixedClock>,
    pub ledger: Arc<RecordingXpLedger>,
}

impl TestCore {
    pub fn new(start_day: &str) -> Self {
        init_tracing();
        let store = Arc::new(InMemoryPrefsStore::new());
        let clock = Arc::new(FixedClock::new(day(start_day)));
        let ledger = Arc::new(RecordingXpLedger::new());
        let core = AppCore::new(store.clone(), clock.clone(), ledger.clone());
        Self {
            core,
            store,
            clock,
            ledger,
        }
    }
}

pub fn day(s: &str) -> DayKey {
    s.parse().expect("valid day key")
}
