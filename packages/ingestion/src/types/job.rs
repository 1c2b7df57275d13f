//! Job posting records as stored by the pipeline.
//!
//! A `JobRecord` is the normalized shape a provider response is translated
//! into before it reaches the dedup engine. The `external_id` is the
//! provider-assigned identifier and the sole deduplication key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of characters kept in the description snippet.
pub const SNIPPET_CHARS: usize = 200;

/// One job posting as ingested from a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Provider-assigned identifier; unique key for deduplication.
    /// Immutable once set.
    pub external_id: String,

    /// Job title; empty string if the provider omits it.
    pub title: String,

    /// Employer name; empty string if the provider omits it.
    pub company: String,

    /// Joined "{city}, {state}" location, segments may be empty.
    pub location: String,

    /// Canonical application link.
    pub url: String,

    /// Truncated preview derived at ingestion time. Not re-derivable
    /// when `full_description` is absent.
    pub description_snippet: String,

    /// Complete posting text when the provider supplies one.
    pub full_description: Option<String>,

    /// Provider-reported skill tags, in provider order.
    pub required_skills: Vec<String>,

    /// Provider's self-reported posting timestamp, stored verbatim.
    /// Provider date formats are inconsistent, so this is never parsed.
    pub posted_at: Option<String>,

    /// Ingestion wall-clock time. Always server-assigned.
    pub scraped_at: DateTime<Utc>,

    /// Provider/publisher name, used for attribution.
    pub source: String,

    /// The search keyword that produced this record (analytics, not identity).
    pub search_keyword: String,

    /// The search location that produced this record (analytics, not identity).
    pub search_location: String,

    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_currency: Option<String>,
    pub employment_type: Option<String>,
}

impl JobRecord {
    /// Create a new record with the identity and descriptive fields.
    ///
    /// `scraped_at` is assigned from the wall clock; everything optional
    /// starts empty and is filled via the `with_*` builders.
    pub fn new(
        external_id: impl Into<String>,
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            title: title.into(),
            company: company.into(),
            location: location.into(),
            url: url.into(),
            description_snippet: String::new(),
            full_description: None,
            required_skills: Vec::new(),
            posted_at: None,
            scraped_at: Utc::now(),
            source: String::new(),
            search_keyword: String::new(),
            search_location: String::new(),
            salary_min: None,
            salary_max: None,
            salary_currency: None,
            employment_type: None,
        }
    }

    /// Set the full description and derive the snippet from it.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description_snippet = derive_snippet(&description);
        self.full_description = Some(description);
        self
    }

    /// Set the provider-reported skill tags.
    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.required_skills = skills;
        self
    }

    /// Set the verbatim provider posting timestamp.
    pub fn with_posted_at(mut self, posted_at: impl Into<String>) -> Self {
        self.posted_at = Some(posted_at.into());
        self
    }

    /// Set the publisher/source name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Record the query parameters that produced this record.
    pub fn with_search(
        mut self,
        keyword: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        self.search_keyword = keyword.into();
        self.search_location = location.into();
        self
    }

    /// Set compensation metadata.
    pub fn with_salary(
        mut self,
        min: Option<f64>,
        max: Option<f64>,
        currency: Option<String>,
    ) -> Self {
        self.salary_min = min;
        self.salary_max = max;
        self.salary_currency = currency;
        self
    }

    /// Set the employment type.
    pub fn with_employment_type(mut self, employment_type: impl Into<String>) -> Self {
        self.employment_type = Some(employment_type.into());
        self
    }

    /// Override the scraped timestamp (tests).
    pub fn with_scraped_at(mut self, scraped_at: DateTime<Utc>) -> Self {
        self.scraped_at = scraped_at;
        self
    }

    /// Whether the record carries the key the dedup engine needs.
    pub fn has_external_id(&self) -> bool {
        !self.external_id.trim().is_empty()
    }
}

/// Derive the stored snippet from a full description.
///
/// First `SNIPPET_CHARS` characters plus a literal `"..."` whenever a
/// description exists; the empty string when it doesn't. Counts
/// characters, not bytes, so multi-byte text never splits a codepoint.
pub fn derive_snippet(description: &str) -> String {
    if description.is_empty() {
        return String::new();
    }
    let mut snippet: String = description.chars().take(SNIPPET_CHARS).collect();
    snippet.push_str("...");
    snippet
}

/// Join provider city/state fields into the stored location.
///
/// Segments are trimmed individually but the join is not normalized
/// further: a missing city yields `", CA"`, a missing state
/// `"San Jose, "`.
pub fn join_location(city: &str, state: &str) -> String {
    format!("{}, {}", city.trim(), state.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_long_description() {
        let description = "x".repeat(450);
        let snippet = derive_snippet(&description);
        assert_eq!(snippet.len(), SNIPPET_CHARS + 3);
        assert!(snippet.ends_with("..."));
        assert_eq!(&snippet[..SNIPPET_CHARS], &description[..SNIPPET_CHARS]);
    }

    #[test]
    fn test_snippet_short_description_still_marked() {
        let snippet = derive_snippet("Great role");
        assert_eq!(snippet, "Great role...");
    }

    #[test]
    fn test_snippet_absent_description() {
        assert_eq!(derive_snippet(""), "");
    }

    #[test]
    fn test_snippet_counts_chars_not_bytes() {
        let description = "ü".repeat(300);
        let snippet = derive_snippet(&description);
        assert_eq!(snippet.chars().count(), SNIPPET_CHARS + 3);
    }

    #[test]
    fn test_join_location() {
        assert_eq!(join_location("San Jose", "CA"), "San Jose, CA");
        assert_eq!(join_location("", "CA"), ", CA");
        assert_eq!(join_location("San Jose", ""), "San Jose, ");
        assert_eq!(join_location(" San Jose ", " CA "), "San Jose, CA");
    }

    #[test]
    fn test_record_builder() {
        let record = JobRecord::new("job-1", "Engineer", "Acme", "San Jose, CA", "https://acme.example/1")
            .with_description("Build things")
            .with_skills(vec!["Rust".to_string()])
            .with_posted_at("2 days ago")
            .with_source("Acme Careers")
            .with_search("Software Engineer Intern", "Silicon Valley, CA");

        assert_eq!(record.description_snippet, "Build things...");
        assert_eq!(record.full_description.as_deref(), Some("Build things"));
        assert_eq!(record.required_skills, vec!["Rust"]);
        assert_eq!(record.posted_at.as_deref(), Some("2 days ago"));
        assert_eq!(record.search_keyword, "Software Engineer Intern");
        assert!(record.has_external_id());
    }

    #[test]
    fn test_missing_external_id_detected() {
        let record = JobRecord::new("  ", "Engineer", "Acme", "", "");
        assert!(!record.has_external_id());
    }
}
