//! Job-Posting Ingestion Library
//!
//! Fetches job postings from an external search provider, normalizes
//! them, and upserts them into a store keyed by the provider's external
//! id - at most one row per posting, however many runs re-see it.
//!
//! # Design
//!
//! - One run is strictly sequential; fixed-interval pacing between
//!   provider calls keeps the external API's rate limit happy
//! - Provider and store sit behind traits, so tests run against canned
//!   responses and an in-memory map
//! - Failures degrade: a bad provider call or a rejected record is
//!   counted in the run summary, never fatal to the run
//!
//! # Usage
//!
//! ```rust,ignore
//! use ingestion::{
//!     default_planner, ingest_smart, JSearchConfig, JSearchProvider,
//!     MemoryJobStore, RunConfig,
//! };
//!
//! let provider = JSearchProvider::new(JSearchConfig::new(api_key));
//! let store = MemoryJobStore::new();
//! let planner = default_planner();
//!
//! let summary = ingest_smart(&planner, &RunConfig::new(), &provider, &store).await;
//! println!("inserted {} updated {}", summary.inserted, summary.updated);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (JobProvider, JobStore)
//! - [`types`] - Records, combinations, outcomes
//! - [`pipeline`] - Planner, pacing, dedup engine, run orchestration
//! - [`providers`] - Provider implementations (JSearch, mock)
//! - [`stores`] - Storage implementations (memory, SQLite)
//! - [`security`] - Credential handling

pub mod error;
pub mod pipeline;
pub mod providers;
pub mod security;
pub mod stores;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ProviderError, StoreError};
pub use traits::{JobProvider, JobStore, UpsertOutcome};
pub use types::{
    derive_snippet, join_location, IngestOutcome, JobRecord, QueryCombination, RunSummary,
};

// Re-export pipeline components
pub use pipeline::{
    default_planner, ingest_exhaustive, ingest_smart, ingest_smart_with_rng, DedupEngine,
    MergePolicy, Pacer, QueryPlanner, RunConfig, DEFAULT_SAMPLE_LIMIT, PRIORITY_PACE,
    SUPPLEMENTARY_PACE,
};

// Re-export providers
pub use providers::{JSearchConfig, JSearchProvider, MockProvider};

// Re-export stores
pub use stores::MemoryJobStore;

#[cfg(feature = "sqlite")]
pub use stores::SqliteJobStore;

// Re-export security utilities
pub use security::SecretString;
