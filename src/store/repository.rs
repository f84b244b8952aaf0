use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{PrefValue, StoreError};

/// Abstract namespaced key-value store.
///
/// Keys are dotted strings (`"streak.daily"`, `"stats.totalTriviaAnswered"`,
/// `"achievement.unlocked.<id>"`). Reads of a key holding a different value
/// type report `None`; the services treat that as corrupted storage and
/// repair with a safe default rather than failing.
#[async_trait]
pub trait PrefsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<PrefValue>, StoreError>;
    async fn set(&self, key: &str, value: PrefValue) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    // Typed convenience accessors shared by every backend.

    async fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.get(key).await?.and_then(|v| v.as_int()))
    }

    async fn set_int(&self, key: &str, value: i64) -> Result<(), StoreError> {
        self.set(key, PrefValue::Int(value)).await
    }

    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(self.get(key).await?.and_then(|v| v.as_bool()))
    }

    async fn set_bool(&self, key: &str, value: bool) -> Result<(), StoreError> {
        self.set(key, PrefValue::Bool(value)).await
    }

    async fn get_text(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .get(key)
            .await?
            .and_then(|v| v.as_text().map(str::to_string)))
    }

    async fn set_text(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set(key, PrefValue::Text(value.to_string())).await
    }

    async fn get_timestamp(&self, key: &str) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.get(key).await?.and_then(|v| v.as_timestamp()))
    }

    async fn set_timestamp(&self, key: &str, value: DateTime<Utc>) -> Result<(), StoreError> {
        self.set(key, PrefValue::Timestamp(value)).await
    }
}

/// In-memory store used by tests and single-process hosts.
#[derive(Debug, Default)]
pub struct InMemoryPrefsStore {
    values: Arc<RwLock<HashMap<String, PrefValue>>>,
}

impl InMemoryPrefsStore {
    pub fn new() -> Self {
        Self {
            values: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Serializes the full key space, the handoff primitive for moving
    /// state between processes (e.g. app and widget extension).
    pub async fn snapshot(&self) -> Result<String, StoreError> {
        let values = self.values.read().await;
        serde_json::to_string(&*values).map_err(|e| StoreError::Snapshot(e.to_string()))
    }

    /// Replaces the store contents with a previously exported snapshot.
    pub async fn restore(&self, snapshot: &str) -> Result<(), StoreError> {
        let parsed: HashMap<String, PrefValue> =
            serde_json::from_str(snapshot).map_err(|e| StoreError::Snapshot(e.to_string()))?;
        let mut values = self.values.write().await;
        *values = parsed;
        Ok(())
    }
}

#[async_trait]
impl PrefsStore for InMemoryPrefsStore {
    async fn get(&self, key: &str) -> Result<Option<PrefValue>, StoreError> {
        let values = self.values.read().await;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: PrefValue) -> Result<(), StoreError> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().await;
        values.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let values = self.values.read().await;
        Ok(values
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_reads_typed_values() {
        let store = InMemoryPrefsStore::new();

        store.set_int("stats.totalTriviaAnswered", 7).await.unwrap();
        store.set_bool("streak.migratedV2", true).await.unwrap();
        store.set_text("streak.lastPlayedDay", "2026-04-01").await.unwrap();

        assert_eq!(
            store.get_int("stats.totalTriviaAnswered").await.unwrap(),
            Some(7)
        );
        assert_eq!(store.get_bool("streak.migratedV2").await.unwrap(), Some(true));
        assert_eq!(
            store.get_text("streak.lastPlayedDay").await.unwrap(),
            Some("2026-04-01".to_string())
        );
        assert_eq!(store.get_int("stats.missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn mismatched_type_reads_as_none() {
        let store = InMemoryPrefsStore::new();
        store.set_text("streak.daily", "oops").await.unwrap();

        assert_eq!(store.get_int("streak.daily").await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_and_prefix_listing() {
        let store = InMemoryPrefsStore::new();
        store.set_int("stats.a", 1).await.unwrap();
        store.set_int("stats.b", 2).await.unwrap();
        store.set_int("streak.daily", 3).await.unwrap();

        let mut keys = store.keys_with_prefix("stats.").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["stats.a".to_string(), "stats.b".to_string()]);

        store.remove("stats.a").await.unwrap();
        assert_eq!(store.get_int("stats.a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn snapshot_round_trips_full_key_space() {
        let store = InMemoryPrefsStore::new();
        store.set_int("stats.appLaunchCount", 12).await.unwrap();
        store
            .set_timestamp("stats.firstLaunchDate", chrono::Utc::now())
            .await
            .unwrap();

        let snapshot = store.snapshot().await.unwrap();

        let restored = InMemoryPrefsStore::new();
        restored.restore(&snapshot).await.unwrap();
        assert_eq!(
            restored.get_int("stats.appLaunchCount").await.unwrap(),
            Some(12)
        );
        assert!(restored
            .get_timestamp("stats.firstLaunchDate")
            .await
            .unwrap()
            .is_some());
    }
}
