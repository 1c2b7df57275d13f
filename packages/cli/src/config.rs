use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// CLI configuration loaded from environment variables.
///
/// The provider API key has no fallback: a missing credential is a
/// startup error, never a silent default.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub country: Option<String>,
    pub database_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            api_key: env::var("JSEARCH_API_KEY").context("JSEARCH_API_KEY must be set")?,
            country: env::var("JSEARCH_COUNTRY").ok(),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:talentsync.db?mode=rwc".to_string()),
        })
    }
}
