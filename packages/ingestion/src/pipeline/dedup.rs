//! Dedup/upsert engine - at most one stored row per external id.
//!
//! The engine decides what the write looks like (replace vs merge) and
//! maps per-record failures to outcomes instead of errors, so one bad
//! record never aborts a run.

use tracing::debug;

use crate::traits::store::{JobStore, UpsertOutcome};
use crate::types::{IngestOutcome, JobRecord};

/// What happens when an external id is seen again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Full-record overwrite: a later ingestion with fewer populated
    /// fields replaces previously richer data. This is the provider
    /// pipeline's historical behavior.
    #[default]
    Replace,

    /// Incoming record wins, but unpopulated incoming fields (empty
    /// strings, `None`, an empty skill list) keep the stored values.
    /// Performs a read before the atomic write; within a sequential
    /// run that read-then-write pair is race-free.
    FillMissing,
}

/// Persists records with at-most-one row per external id.
pub struct DedupEngine<'a, S: JobStore> {
    store: &'a S,
    policy: MergePolicy,
}

impl<'a, S: JobStore> DedupEngine<'a, S> {
    /// Create an engine with the default replace policy.
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            policy: MergePolicy::default(),
        }
    }

    /// Set the merge policy.
    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Push one record through: skip, insert, update, or fail - never
    /// raise.
    pub async fn ingest(&self, record: JobRecord) -> IngestOutcome {
        if !record.has_external_id() {
            debug!(title = %record.title, "skipping record without external id");
            return IngestOutcome::Skipped {
                reason: "record has no external id".to_string(),
            };
        }

        let to_write = match self.policy {
            MergePolicy::Replace => record,
            MergePolicy::FillMissing => match self.store.get(&record.external_id).await {
                Ok(Some(existing)) => fill_missing(record, existing),
                Ok(None) => record,
                Err(e) => {
                    return IngestOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            },
        };

        match self.store.upsert(&to_write).await {
            Ok(UpsertOutcome::Inserted) => IngestOutcome::Inserted,
            Ok(UpsertOutcome::Replaced) => IngestOutcome::Updated,
            Err(e) => IngestOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// Merge for [`MergePolicy::FillMissing`]: incoming fields win unless
/// unpopulated. `scraped_at` is always the incoming ingestion time.
fn fill_missing(incoming: JobRecord, existing: JobRecord) -> JobRecord {
    fn pick(incoming: String, existing: String) -> String {
        if incoming.is_empty() {
            existing
        } else {
            incoming
        }
    }

    JobRecord {
        external_id: incoming.external_id,
        title: pick(incoming.title, existing.title),
        company: pick(incoming.company, existing.company),
        location: pick(incoming.location, existing.location),
        url: pick(incoming.url, existing.url),
        description_snippet: pick(incoming.description_snippet, existing.description_snippet),
        full_description: incoming.full_description.or(existing.full_description),
        required_skills: if incoming.required_skills.is_empty() {
            existing.required_skills
        } else {
            incoming.required_skills
        },
        posted_at: incoming.posted_at.or(existing.posted_at),
        scraped_at: incoming.scraped_at,
        source: pick(incoming.source, existing.source),
        search_keyword: pick(incoming.search_keyword, existing.search_keyword),
        search_location: pick(incoming.search_location, existing.search_location),
        salary_min: incoming.salary_min.or(existing.salary_min),
        salary_max: incoming.salary_max.or(existing.salary_max),
        salary_currency: incoming.salary_currency.or(existing.salary_currency),
        employment_type: incoming.employment_type.or(existing.employment_type),
    }
}
