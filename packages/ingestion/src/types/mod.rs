//! Core data types for the ingestion pipeline.

pub mod job;
pub mod outcome;
pub mod query;

pub use job::{derive_snippet, join_location, JobRecord, SNIPPET_CHARS};
pub use outcome::{IngestOutcome, RunSummary};
pub use query::QueryCombination;
