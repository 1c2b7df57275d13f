//! Ingestion pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Query planning (exhaustive cross product, or priority + sample)
//! - Pacing between outbound provider calls
//! - Dedup/upsert of each normalized record
//! - Run-level aggregation into a summary

pub mod dedup;
pub mod pacing;
pub mod planner;
pub mod run;

pub use dedup::{DedupEngine, MergePolicy};
pub use pacing::{Pacer, PRIORITY_PACE, SUPPLEMENTARY_PACE};
pub use planner::{default_planner, QueryPlanner, DEFAULT_SAMPLE_LIMIT};
pub use run::{ingest_exhaustive, ingest_smart, ingest_smart_with_rng, RunConfig};
