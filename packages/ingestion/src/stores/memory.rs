//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreResult;
use crate::traits::store::{JobStore, UpsertOutcome};
use crate::types::JobRecord;

/// In-memory store keyed by external id.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart. The upsert is a single map insert under
/// the write lock, so the one-row-per-external-id invariant holds even
/// under concurrent runs.
pub struct MemoryJobStore {
    records: RwLock<HashMap<String, JobRecord>>,
}

impl Default for MemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryJobStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Clear all stored records.
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }

    /// Number of stored records (sync convenience for tests).
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn get(&self, external_id: &str) -> StoreResult<Option<JobRecord>> {
        Ok(self.records.read().unwrap().get(external_id).cloned())
    }

    async fn upsert(&self, record: &JobRecord) -> StoreResult<UpsertOutcome> {
        let previous = self
            .records
            .write()
            .unwrap()
            .insert(record.external_id.clone(), record.clone());

        Ok(match previous {
            Some(_) => UpsertOutcome::Replaced,
            None => UpsertOutcome::Inserted,
        })
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.records.read().unwrap().len())
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<JobRecord>> {
        let mut records: Vec<JobRecord> = self.records.read().unwrap().values().cloned().collect();
        records.sort_by(|a, b| b.scraped_at.cmp(&a.scraped_at));
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(id: &str, title: &str) -> JobRecord {
        JobRecord::new(id, title, "Acme", "San Jose, CA", "https://acme.example")
    }

    #[tokio::test]
    async fn test_upsert_tags_insert_then_replace() {
        let store = MemoryJobStore::new();

        let outcome = store.upsert(&record("a", "Engineer")).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let outcome = store.upsert(&record("a", "Senior Engineer")).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Replaced);

        assert_eq!(store.count().await.unwrap(), 1);
        let stored = store.get("a").await.unwrap().unwrap();
        assert_eq!(stored.title, "Senior Engineer");
    }

    #[tokio::test]
    async fn test_replace_is_full_overwrite() {
        let store = MemoryJobStore::new();

        let rich = record("a", "Engineer").with_description("long description here");
        store.upsert(&rich).await.unwrap();

        // A sparser record fully replaces the richer one.
        let sparse = record("a", "Engineer");
        store.upsert(&sparse).await.unwrap();

        let stored = store.get("a").await.unwrap().unwrap();
        assert_eq!(stored.full_description, None);
        assert_eq!(stored.description_snippet, "");
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() {
        let store = MemoryJobStore::new();
        let now = Utc::now();

        store
            .upsert(&record("old", "Old").with_scraped_at(now - Duration::hours(2)))
            .await
            .unwrap();
        store
            .upsert(&record("new", "New").with_scraped_at(now))
            .await
            .unwrap();
        store
            .upsert(&record("mid", "Mid").with_scraped_at(now - Duration::hours(1)))
            .await
            .unwrap();

        let recent = store.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].external_id, "new");
        assert_eq!(recent[1].external_id, "mid");
    }
}
