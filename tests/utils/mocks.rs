use async_trait::async_trait;
use tokio::sync::Mutex;

use reeltrivia::XpLedger;

/// Ledger that records every XP award so tests can assert on amounts and
/// reasons.
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
