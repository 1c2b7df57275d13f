//! Mock provider for testing.
//!
//! Canned per-combination results plus call tracking, so tests can
//! assert both what the pipeline stored and the exact order of
//! provider calls the planner produced.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{ProviderError, ProviderResult};
use crate::traits::provider::JobProvider;
use crate::types::{JobRecord, QueryCombination};

/// Mock provider with canned responses.
///
/// # Example
///
/// ```rust,ignore
/// let combo = QueryCombination::new("Software Engineer Intern", "Silicon Valley, CA");
/// let provider = MockProvider::new()
///     .with_results(combo.clone(), vec![record_a, record_b]);
///
/// let records = provider.search(&combo, 1).await.unwrap();
/// ```
#[derive(Default)]
pub struct MockProvider {
    /// Canned records indexed by combination
    results: Arc<RwLock<HashMap<QueryCombination, Vec<JobRecord>>>>,
    /// Combinations that answer with a status error instead
    errors: Arc<RwLock<HashMap<QueryCombination, String>>>,
    /// Track (combination, page) for verification
    calls: Arc<RwLock<Vec<(QueryCombination, u32)>>>,
}

impl MockProvider {
    /// Create a new empty mock provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add canned records for a combination (builder pattern).
    pub fn with_results(self, combination: QueryCombination, records: Vec<JobRecord>) -> Self {
        self.results.write().unwrap().insert(combination, records);
        self
    }

    /// Make a combination answer with a non-OK status error.
    pub fn with_status_error(self, combination: QueryCombination, message: &str) -> Self {
        self.errors
            .write()
            .unwrap()
            .insert(combination, message.to_string());
        self
    }

    /// Replace the canned records for a combination after construction.
    pub fn set_results(&self, combination: QueryCombination, records: Vec<JobRecord>) {
        self.results.write().unwrap().insert(combination, records);
    }

    /// Get the number of search calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Get the (combination, page) pairs in call order.
    pub fn calls(&self) -> Vec<(QueryCombination, u32)> {
        self.calls.read().unwrap().clone()
    }

    /// Get just the combinations, in call order.
    pub fn called_combinations(&self) -> Vec<QueryCombination> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .map(|(combination, _)| combination.clone())
            .collect()
    }

    /// Clear recorded calls.
    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            results: Arc::clone(&self.results),
            errors: Arc::clone(&self.errors),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl JobProvider for MockProvider {
    async fn search(
        &self,
        combination: &QueryCombination,
        page: u32,
    ) -> ProviderResult<Vec<JobRecord>> {
        self.calls
            .write()
            .unwrap()
            .push((combination.clone(), page));

        if let Some(message) = self.errors.read().unwrap().get(combination) {
            return Err(ProviderError::Status {
                message: message.clone(),
            });
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .get(combination)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo() -> QueryCombination {
        QueryCombination::new("Software Engineer Intern", "Silicon Valley, CA")
    }

    fn record(id: &str) -> JobRecord {
        JobRecord::new(id, "Engineer", "Acme", "San Jose, CA", "https://acme.example")
    }

    #[tokio::test]
    async fn test_canned_results() {
        let provider =
            MockProvider::new().with_results(combo(), vec![record("a"), record("b")]);

        let records = provider.search(&combo(), 1).await.unwrap();
        assert_eq!(records.len(), 2);

        let unknown = QueryCombination::new("Data Science Intern", "Austin, TX");
        let records = provider.search(&unknown, 1).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_error_injection() {
        let provider = MockProvider::new().with_status_error(combo(), "quota exceeded");

        let err = provider.search(&combo(), 1).await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { .. }));
    }

    #[tokio::test]
    async fn test_call_tracking() {
        let provider = MockProvider::new();
        provider.search(&combo(), 1).await.unwrap();
        provider.search(&combo(), 2).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.calls()[1], (combo(), 2));
    }
}
