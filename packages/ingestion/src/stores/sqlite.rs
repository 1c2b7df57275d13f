//! SQLite storage implementation.
//!
//! A file-based backend using SQLite. Good for:
//! - Local development
//! - Single-server deployments
//! - Testing with persistent data
//!
//! The upsert runs its existence check and conditional write inside one
//! transaction, so the inserted/updated tag and the write are atomic
//! with respect to concurrent runs.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::{JobStore, UpsertOutcome};
use crate::types::JobRecord;

/// SQLite-based job store.
pub struct SqliteJobStore {
    pool: SqlitePool,
}

impl SqliteJobStore {
    /// Create a new SQLite store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite:talentsync.db?mode=rwc` - Create if not exists
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string().into()))?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory SQLite store (for testing).
    pub async fn in_memory() -> StoreResult<Self> {
        Self::new("sqlite::memory:").await
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                external_id TEXT PRIMARY KEY,
                title TEXT NOT NULL DEFAULT '',
                company TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT '',
                url TEXT NOT NULL DEFAULT '',
                description_snippet TEXT NOT NULL DEFAULT '',
                full_description TEXT,
                required_skills TEXT NOT NULL DEFAULT '[]',
                posted_at TEXT,
                scraped_at TEXT NOT NULL,
                source TEXT NOT NULL DEFAULT '',
                search_keyword TEXT NOT NULL DEFAULT '',
                search_location TEXT NOT NULL DEFAULT '',
                salary_min REAL,
                salary_max REAL,
                salary_currency TEXT,
                employment_type TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_jobs_scraped_at ON jobs(scraped_at);
            CREATE INDEX IF NOT EXISTS idx_jobs_search_keyword ON jobs(search_keyword);
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string().into()))?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// Row type for sqlx queries
#[derive(Debug, FromRow)]
struct JobRow {
    external_id: String,
    title: String,
    company: String,
    location: String,
    url: String,
    description_snippet: String,
    full_description: Option<String>,
    required_skills: String,
    posted_at: Option<String>,
    scraped_at: String,
    source: String,
    search_keyword: String,
    search_location: String,
    salary_min: Option<f64>,
    salary_max: Option<f64>,
    salary_currency: Option<String>,
    employment_type: Option<String>,
}

impl JobRow {
    fn into_record(self) -> StoreResult<JobRecord> {
        let scraped_at = chrono::DateTime::parse_from_rfc3339(&self.scraped_at)
            .map_err(|e| StoreError::Corrupt {
                external_id: self.external_id.clone(),
                reason: format!("invalid scraped_at: {}", e),
            })?
            .with_timezone(&chrono::Utc);

        let required_skills: Vec<String> =
            serde_json::from_str(&self.required_skills).map_err(|e| StoreError::Corrupt {
                external_id: self.external_id.clone(),
                reason: format!("invalid skills JSON: {}", e),
            })?;

        Ok(JobRecord {
            external_id: self.external_id,
            title: self.title,
            company: self.company,
            location: self.location,
            url: self.url,
            description_snippet: self.description_snippet,
            full_description: self.full_description,
            required_skills,
            posted_at: self.posted_at,
            scraped_at,
            source: self.source,
            search_keyword: self.search_keyword,
            search_location: self.search_location,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            salary_currency: self.salary_currency,
            employment_type: self.employment_type,
        })
    }
}

const SELECT_COLUMNS: &str = "external_id, title, company, location, url, \
     description_snippet, full_description, required_skills, posted_at, \
     scraped_at, source, search_keyword, search_location, salary_min, \
     salary_max, salary_currency, employment_type";

#[async_trait]
impl JobStore for SqliteJobStore {
    async fn get(&self, external_id: &str) -> StoreResult<Option<JobRecord>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs WHERE external_id = ?",
            SELECT_COLUMNS
        ))
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string().into()))?;

        match row {
            Some(r) => Ok(Some(r.into_record()?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, record: &JobRecord) -> StoreResult<UpsertOutcome> {
        let required_skills = serde_json::to_string(&record.required_skills)
            .map_err(|e| StoreError::Query(e.to_string().into()))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::Connection(e.to_string().into()))?;

        let existed: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM jobs WHERE external_id = ?)")
                .bind(&record.external_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| StoreError::Query(e.to_string().into()))?;

        sqlx::query(
            r#"
            INSERT INTO jobs (
                external_id, title, company, location, url,
                description_snippet, full_description, required_skills,
                posted_at, scraped_at, source, search_keyword,
                search_location, salary_min, salary_max, salary_currency,
                employment_type
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(external_id) DO UPDATE SET
                title = excluded.title,
                company = excluded.company,
                location = excluded.location,
                url = excluded.url,
                description_snippet = excluded.description_snippet,
                full_description = excluded.full_description,
                required_skills = excluded.required_skills,
                posted_at = excluded.posted_at,
                scraped_at = excluded.scraped_at,
                source = excluded.source,
                search_keyword = excluded.search_keyword,
                search_location = excluded.search_location,
                salary_min = excluded.salary_min,
                salary_max = excluded.salary_max,
                salary_currency = excluded.salary_currency,
                employment_type = excluded.employment_type
            "#,
        )
        .bind(&record.external_id)
        .bind(&record.title)
        .bind(&record.company)
        .bind(&record.location)
        .bind(&record.url)
        .bind(&record.description_snippet)
        .bind(&record.full_description)
        .bind(&required_skills)
        .bind(&record.posted_at)
        .bind(record.scraped_at.to_rfc3339())
        .bind(&record.source)
        .bind(&record.search_keyword)
        .bind(&record.search_location)
        .bind(record.salary_min)
        .bind(record.salary_max)
        .bind(&record.salary_currency)
        .bind(&record.employment_type)
        .execute(&mut *tx)
        .await
        .map_err(|e| StoreError::Query(e.to_string().into()))?;

        tx.commit()
            .await
            .map_err(|e| StoreError::Query(e.to_string().into()))?;

        Ok(if existed {
            UpsertOutcome::Replaced
        } else {
            UpsertOutcome::Inserted
        })
    }

    async fn count(&self) -> StoreResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string().into()))?;

        Ok(count as usize)
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<JobRecord>> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs ORDER BY scraped_at DESC LIMIT ?",
            SELECT_COLUMNS
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string().into()))?;

        rows.into_iter().map(|r| r.into_record()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str) -> JobRecord {
        JobRecord::new(id, title, "Acme", "San Jose, CA", "https://acme.example")
            .with_description("A role doing roles")
            .with_skills(vec!["Rust".to_string()])
    }

    #[tokio::test]
    async fn test_upsert_round_trip() {
        let store = SqliteJobStore::in_memory().await.unwrap();

        let outcome = store.upsert(&record("a", "Engineer")).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let stored = store.get("a").await.unwrap().unwrap();
        assert_eq!(stored.title, "Engineer");
        assert_eq!(stored.required_skills, vec!["Rust"]);
        assert_eq!(stored.description_snippet, "A role doing roles...");
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_row() {
        let store = SqliteJobStore::in_memory().await.unwrap();

        store.upsert(&record("a", "Engineer")).await.unwrap();
        let sparse = JobRecord::new("a", "Engineer II", "", "", "");
        let outcome = store.upsert(&sparse).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Replaced);

        let stored = store.get("a").await.unwrap().unwrap();
        assert_eq!(stored.title, "Engineer II");
        assert_eq!(stored.full_description, None);
        assert!(stored.required_skills.is_empty());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = SqliteJobStore::in_memory().await.unwrap();
        assert!(store.get("nope").await.unwrap().is_none());
    }
}
