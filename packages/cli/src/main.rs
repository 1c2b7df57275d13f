//! TalentSync ingestion CLI
//!
//! Triggers ingestion runs against the JSearch provider and a local
//! SQLite store. Ctrl-C cancels the run at the next pacing point and
//! still prints the partial summary.

use anyhow::Result;
use clap::{Parser, Subcommand};
use ingestion::{
    default_planner, ingest_exhaustive, ingest_smart, JSearchConfig, JSearchProvider, JobStore,
    MergePolicy, RunConfig, RunSummary, SqliteJobStore,
};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "talentsync")]
#[command(about = "TalentSync job-ingestion CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the full keyword x location cross product
    IngestAll {
        /// Merge into existing rows instead of fully replacing them
        #[arg(long)]
        merge: bool,
    },

    /// Ingest the priority searches plus a random sample of the rest
    SmartIngest {
        /// Merge into existing rows instead of fully replacing them
        #[arg(long)]
        merge: bool,
    },

    /// Show the store's record count and most recent postings
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let store = SqliteJobStore::new(&config.database_url).await?;

    match cli.command {
        Commands::IngestAll { merge } => {
            let provider = build_provider(&config);
            let run_config = run_config(merge);
            let summary =
                ingest_exhaustive(&default_planner(), &run_config, &provider, &store).await;
            print_summary(&summary);
        }
        Commands::SmartIngest { merge } => {
            let provider = build_provider(&config);
            let run_config = run_config(merge);
            let summary = ingest_smart(&default_planner(), &run_config, &provider, &store).await;
            print_summary(&summary);
        }
        Commands::Status => {
            let count = store.count().await?;
            println!("stored postings: {}", count);
            for record in store.recent(10).await? {
                println!(
                    "  {} | {} | {} | scraped {}",
                    record.external_id, record.title, record.company, record.scraped_at
                );
            }
        }
    }

    Ok(())
}

fn build_provider(config: &Config) -> JSearchProvider {
    let mut provider_config = JSearchConfig::new(config.api_key.clone());
    if let Some(country) = &config.country {
        provider_config = provider_config.with_country(country);
    }
    JSearchProvider::new(provider_config)
}

/// Run config with Ctrl-C wired to cancellation.
fn run_config(merge: bool) -> RunConfig {
    let cancel = CancellationToken::new();

    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, stopping after the current combination");
            signal_token.cancel();
        }
    });

    let policy = if merge {
        MergePolicy::FillMissing
    } else {
        MergePolicy::Replace
    };

    RunConfig::new().with_policy(policy).with_cancel(cancel)
}

fn print_summary(summary: &RunSummary) {
    println!(
        "run complete: {} inserted, {} updated, {} skipped, {} failed, {} provider errors ({}/{} combinations{})",
        summary.inserted,
        summary.updated,
        summary.skipped,
        summary.failed,
        summary.provider_errors,
        summary.combinations_visited,
        summary.combinations_planned,
        if summary.cancelled { ", cancelled" } else { "" },
    );
}
