//! Run orchestration - ties planner, pacing, provider, and engine
//! together.
//!
//! One run is a single logical thread of control: combinations are
//! visited strictly in plan order, with the pacer's delay as the only
//! suspension point between provider calls. A run always completes -
//! provider failures are counted, record failures are tagged, and
//! nothing escalates past the summary. Cancellation is honored at the
//! pacing suspension point and yields a partial summary rather than an
//! error.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::pipeline::dedup::{DedupEngine, MergePolicy};
use crate::pipeline::pacing::{Pacer, PRIORITY_PACE, SUPPLEMENTARY_PACE};
use crate::pipeline::planner::QueryPlanner;
use crate::traits::{JobProvider, JobStore};
use crate::types::{IngestOutcome, QueryCombination, RunSummary};

/// Configuration for a single ingestion run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Result page fetched per combination.
    pub page: u32,

    /// What a repeated external id does to the stored row.
    pub policy: MergePolicy,

    /// Gap before supplementary and exhaustive calls.
    pub supplementary_pace: Duration,

    /// Gap before priority calls.
    pub priority_pace: Duration,

    /// Checked at each suspension point; cancelling stops the run
    /// after the current combination.
    pub cancel: CancellationToken,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            page: 1,
            policy: MergePolicy::default(),
            supplementary_pace: SUPPLEMENTARY_PACE,
            priority_pace: PRIORITY_PACE,
            cancel: CancellationToken::new(),
        }
    }
}

impl RunConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the merge policy.
    pub fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override both pacing intervals (tests use zero).
    pub fn with_pacing(mut self, supplementary: Duration, priority: Duration) -> Self {
        self.supplementary_pace = supplementary;
        self.priority_pace = priority;
        self
    }

    /// Attach a cancellation token.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Pacing tier of one planned combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Priority,
    Supplementary,
}

/// Visit the full keyword x location cross product.
pub async fn ingest_exhaustive<P, S>(
    planner: &QueryPlanner,
    config: &RunConfig,
    provider: &P,
    store: &S,
) -> RunSummary
where
    P: JobProvider,
    S: JobStore,
{
    let plan = planner
        .exhaustive()
        .into_iter()
        .map(|combination| (combination, Tier::Supplementary))
        .collect();

    run(plan, config, provider, store).await
}

/// Visit the priority combinations, then a random sample of the rest.
pub async fn ingest_smart<P, S>(
    planner: &QueryPlanner,
    config: &RunConfig,
    provider: &P,
    store: &S,
) -> RunSummary
where
    P: JobProvider,
    S: JobStore,
{
    let mut rng = fastrand::Rng::new();
    ingest_smart_with_rng(planner, config, provider, store, &mut rng).await
}

/// [`ingest_smart`] with a caller-supplied RNG, for reproducible plans.
pub async fn ingest_smart_with_rng<P, S>(
    planner: &QueryPlanner,
    config: &RunConfig,
    provider: &P,
    store: &S,
    rng: &mut fastrand::Rng,
) -> RunSummary
where
    P: JobProvider,
    S: JobStore,
{
    let priority_count = planner.priority().len();
    let plan = planner
        .priority_with_sample(rng)
        .into_iter()
        .enumerate()
        .map(|(index, combination)| {
            let tier = if index < priority_count {
                Tier::Priority
            } else {
                Tier::Supplementary
            };
            (combination, tier)
        })
        .collect();

    run(plan, config, provider, store).await
}

async fn run<P, S>(
    plan: Vec<(QueryCombination, Tier)>,
    config: &RunConfig,
    provider: &P,
    store: &S,
) -> RunSummary
where
    P: JobProvider,
    S: JobStore,
{
    let engine = DedupEngine::new(store).with_policy(config.policy);
    let pacer = Pacer::new();

    let mut summary = RunSummary::new();
    summary.combinations_planned = plan.len();

    info!(
        provider = provider.name(),
        combinations = plan.len(),
        "ingestion run starting"
    );

    for (combination, tier) in plan {
        let interval = match tier {
            Tier::Priority => config.priority_pace,
            Tier::Supplementary => config.supplementary_pace,
        };

        tokio::select! {
            biased;
            _ = config.cancel.cancelled() => {
                summary.cancelled = true;
                info!(
                    visited = summary.combinations_visited,
                    planned = summary.combinations_planned,
                    "run cancelled, returning partial summary"
                );
                break;
            }
            _ = pacer.wait(interval) => {}
        }

        match provider.search(&combination, config.page).await {
            Ok(records) => {
                debug!(
                    combination = %combination,
                    records = records.len(),
                    "provider returned records"
                );
                for record in records {
                    let outcome = engine.ingest(record).await;
                    if let IngestOutcome::Failed { reason } = &outcome {
                        warn!(combination = %combination, reason = %reason, "record not persisted");
                    }
                    summary.record(&outcome);
                }
            }
            Err(e) => {
                warn!(combination = %combination, error = %e, "provider call failed");
                summary.provider_errors += 1;
            }
        }

        summary.combinations_visited += 1;
    }

    info!(
        inserted = summary.inserted,
        updated = summary.updated,
        skipped = summary.skipped,
        failed = summary.failed,
        provider_errors = summary.provider_errors,
        "ingestion run complete"
    );

    summary
}
