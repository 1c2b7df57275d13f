//! JSearch provider client.
//!
//! Issues one paged search per call against the JSearch REST API and
//! translates provider fields into [`JobRecord`]s. The request shape:
//! free-text `query` formatted as `"{keyword} in {location}"`, a
//! string-encoded page index, one page of results per call, a
//! posted-within-last-week recency filter, and an optional country
//! filter. Auth is the RapidAPI key/host header pair.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::security::SecretString;
use crate::traits::provider::JobProvider;
use crate::types::{job::join_location, JobRecord, QueryCombination};

const DEFAULT_HOST: &str = "jsearch.p.rapidapi.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the JSearch client.
///
/// The API key is required and has no fallback; load it from the
/// environment at startup and fail fast when it is absent.
#[derive(Debug, Clone)]
pub struct JSearchConfig {
    /// RapidAPI key (secret).
    pub api_key: SecretString,

    /// RapidAPI host header value.
    pub host: String,

    /// Base URL for requests. Overridable for tests.
    pub base_url: String,

    /// Country filter passed on priority-tier searches.
    pub country: Option<String>,

    /// Per-call request timeout.
    pub timeout: Duration,
}

impl JSearchConfig {
    /// Create a config with the given API key and defaults for the rest.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            host: DEFAULT_HOST.to_string(),
            base_url: format!("https://{}", DEFAULT_HOST),
            country: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the country filter.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// JSearch-backed job provider.
pub struct JSearchProvider {
    client: reqwest::Client,
    config: JSearchConfig,
}

impl JSearchProvider {
    /// Create a new provider from a config.
    pub fn new(config: JSearchConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }
}

#[async_trait]
impl JobProvider for JSearchProvider {
    async fn search(
        &self,
        combination: &QueryCombination,
        page: u32,
    ) -> ProviderResult<Vec<JobRecord>> {
        let query = combination.query_string();
        let page_param = page.to_string();
        debug!(query = %query, page, "JSearch request starting");

        let mut request = self
            .client
            .get(format!("{}/search", self.config.base_url))
            .header("X-RapidAPI-Key", self.config.api_key.expose())
            .header("X-RapidAPI-Host", &self.config.host)
            .query(&[
                ("query", query.as_str()),
                ("page", page_param.as_str()),
                ("num_pages", "1"),
                ("date_posted", "week"),
            ]);

        if let Some(country) = &self.config.country {
            request = request.query(&[("country", country.as_str())]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Http(Box::new(e))
            }
        })?;

        let http_status = response.status();
        if !http_status.is_success() {
            return Err(ProviderError::Status {
                message: format!("HTTP {}", http_status),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(Box::new(e)))?;

        parse_response(body, combination)
    }

    fn name(&self) -> &str {
        "jsearch"
    }
}

// Wire types for the JSearch response

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<WireError>,
    #[serde(default)]
    data: Option<Vec<WireJob>>,
}

#[derive(Debug, Default, Deserialize)]
struct WireError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireJob {
    #[serde(default)]
    job_id: Option<String>,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default)]
    employer_name: Option<String>,
    #[serde(default)]
    job_city: Option<String>,
    #[serde(default)]
    job_state: Option<String>,
    #[serde(default)]
    job_apply_link: Option<String>,
    #[serde(default)]
    job_description: Option<String>,
    #[serde(default)]
    job_required_skills: Option<Vec<String>>,
    #[serde(default)]
    job_posted_at_datetime_utc: Option<String>,
    #[serde(default)]
    job_publisher: Option<String>,
    #[serde(default)]
    job_min_salary: Option<f64>,
    #[serde(default)]
    job_max_salary: Option<f64>,
    #[serde(default)]
    job_salary_currency: Option<String>,
    #[serde(default)]
    job_employment_type: Option<String>,
}

/// Turn a decoded response body into records, or a tagged status error.
fn parse_response(
    body: SearchResponse,
    combination: &QueryCombination,
) -> ProviderResult<Vec<JobRecord>> {
    if body.status.as_deref() != Some("OK") {
        let message = body
            .error
            .and_then(|e| e.message)
            .unwrap_or_else(|| "provider returned a non-OK status".to_string());
        return Err(ProviderError::Status { message });
    }

    Ok(body
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|wire| translate(wire, combination))
        .collect())
}

/// Translate one provider job into the internal record shape.
///
/// Missing descriptive fields degrade to empty strings; `posted_at` is
/// carried verbatim; `scraped_at` is assigned here, never taken from
/// the provider.
fn translate(wire: WireJob, combination: &QueryCombination) -> JobRecord {
    let location = join_location(
        wire.job_city.as_deref().unwrap_or(""),
        wire.job_state.as_deref().unwrap_or(""),
    );

    let mut record = JobRecord::new(
        wire.job_id.unwrap_or_default(),
        wire.job_title.unwrap_or_default(),
        wire.employer_name.unwrap_or_default(),
        location,
        wire.job_apply_link.unwrap_or_default(),
    )
    .with_search(&combination.keyword, &combination.location)
    .with_salary(
        wire.job_min_salary,
        wire.job_max_salary,
        wire.job_salary_currency,
    );

    if let Some(description) = wire.job_description.filter(|d| !d.is_empty()) {
        record = record.with_description(description);
    }
    if let Some(skills) = wire.job_required_skills {
        record = record.with_skills(skills);
    }
    if let Some(posted_at) = wire.job_posted_at_datetime_utc {
        record = record.with_posted_at(posted_at);
    }
    if let Some(publisher) = wire.job_publisher {
        record = record.with_source(publisher);
    }
    if let Some(employment_type) = wire.job_employment_type {
        record = record.with_employment_type(employment_type);
    }

    record
}
