//! Typed errors for the ingestion library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Provider and store
//! failures are separate types because the pipeline treats them
//! differently: a provider failure loses one search call, a store
//! failure loses one record. Neither escapes a run - the orchestrator
//! absorbs both into the run summary.

use thiserror::Error;

/// Errors surfaced by a job provider.
///
/// These are tagged so callers can distinguish "legitimately no matches"
/// (an `Ok` with an empty vec) from "provider unreachable" and apply
/// different handling to each.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure (connection refused, DNS, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Provider answered but reported a non-OK status
    #[error("provider status not OK: {message}")]
    Status { message: String },

    /// Response body could not be decoded
    #[error("malformed provider response: {0}")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request exceeded the per-call timeout
    #[error("provider request timed out")]
    Timeout,
}

/// Errors surfaced by a job store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach the storage backend
    #[error("connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A read or write failed
    #[error("query error: {0}")]
    Query(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Stored data could not be decoded into a record
    #[error("corrupt record for {external_id}: {reason}")]
    Corrupt { external_id: String, reason: String },
}

/// Result type alias for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
