//! MatchStats - Main Entry Point
//!
//! Prints recent match statistics for a League of Legends player as JSON.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use match_stats::config::load_config;
use match_stats::{
    FetchOrchestrator, ReferenceKind, RiotGateway, StatsReport, StatsRequest, TokenBucketLimiter,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Summoner name to look up
    summoner: String,

    /// Queue ids to include (repeat or comma-separate, e.g. 420,430)
    #[arg(short, long = "queue", value_delimiter = ',')]
    queues: Vec<String>,

    /// Number of recent matches to fetch
    #[arg(short = 'n', long, default_value_t = 5, allow_negative_numbers = true)]
    count: i64,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Resolve champion and queue names
    #[arg(long)]
    names: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    report: &'a StatsReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    champions: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    queues: Option<HashMap<String, String>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();
    let config = load_config(Some(&args.config))?;

    // Initialize logging
    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting MatchStats");
    info!("Configuration file: {}", args.config);

    let gateway = RiotGateway::with_timeout(
        &config.riot,
        Duration::from_secs(config.settings.request_timeout_seconds),
    )?;
    let limiter = Arc::new(TokenBucketLimiter::from_config(&config.limiter)?);
    let orchestrator = FetchOrchestrator::from_config(Arc::new(gateway), limiter, &config.fetch)?;

    let request = StatsRequest::new(args.summoner.clone(), args.count).with_queues(args.queues.clone());

    let report = tokio::select! {
        report = orchestrator.get_stats(&request) => report?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal, abandoning fetch");
            return Ok(());
        }
    };

    let (champions, queues) = if args.names {
        let champion_keys: Vec<String> = report
            .stats()
            .map(|s| s.subject_entity_id.to_string())
            .collect();
        let champions = orchestrator
            .resolve_names(ReferenceKind::Champion, champion_keys)
            .await;
        let queue_keys: Vec<String> = report
            .stats()
            .filter_map(|s| s.queue)
            .map(|q| q.to_string())
            .chain(args.queues.iter().map(|q| q.trim().to_string()))
            .collect();
        let queues = orchestrator
            .resolve_names(ReferenceKind::Queue, queue_keys)
            .await;
        (Some(champions), Some(queues))
    } else {
        (None, None)
    };

    let output = Output {
        report: &report,
        champions,
        queues,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    info!(
        "Done: {} of {} matches succeeded",
        report.succeeded(),
        report.len()
    );
    Ok(())
}
