//! Storage trait for job records.
//!
//! One logical collection of [`JobRecord`]s, indexed uniquely by
//! `external_id`. The write primitive is an atomic conditional upsert:
//! implementations must guarantee that concurrent upserts of the same
//! external id can never produce two rows.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::JobRecord;

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The external id was previously unseen.
    Inserted,
    /// An existing row was fully replaced.
    Replaced,
}

/// Persistence for job records.
///
/// # Implementations
///
/// - `MemoryJobStore` - in-memory map for testing and development
/// - `SqliteJobStore` - file-based SQLite (cargo feature `sqlite`)
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Look up a record by external id.
    async fn get(&self, external_id: &str) -> StoreResult<Option<JobRecord>>;

    /// Insert the record, or fully replace the existing row with the
    /// same external id. All fields are overwritten; merging, if any,
    /// happens in the dedup engine before the write.
    async fn upsert(&self, record: &JobRecord) -> StoreResult<UpsertOutcome>;

    /// Number of distinct external ids in the store.
    async fn count(&self) -> StoreResult<usize>;

    /// Most recently scraped records, newest first (browsing surface).
    async fn recent(&self, limit: usize) -> StoreResult<Vec<JobRecord>>;
}
