//! Provider trait for external job-search APIs.
//!
//! A provider issues one paged search request and translates the
//! response into normalized [`JobRecord`]s. Errors are tagged rather
//! than collapsed into an empty result, so callers can tell "no
//! matches" apart from "provider unreachable".

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::types::{JobRecord, QueryCombination};

/// A source of job postings.
///
/// # Implementations
///
/// - `JSearchProvider` - the JSearch REST API
/// - `MockProvider` - canned responses for testing
#[async_trait]
pub trait JobProvider: Send + Sync {
    /// Fetch one page of postings for a (keyword, location) combination.
    ///
    /// Returns the fully materialized records for that page. An empty
    /// vec means the provider genuinely had no matches; failures come
    /// back as [`ProviderError`](crate::error::ProviderError) instead.
    ///
    /// No retries happen at this layer.
    async fn search(
        &self,
        combination: &QueryCombination,
        page: u32,
    ) -> ProviderResult<Vec<JobRecord>>;

    /// Fetch the first page for a combination.
    async fn search_first(&self, combination: &QueryCombination) -> ProviderResult<Vec<JobRecord>> {
        self.search(combination, 1).await
    }

    /// Get the provider name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
