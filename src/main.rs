//! landscape-health command line
//!
//! Polls component health endpoints of a landscape once (`check`),
//! continuously (`watch`), or serves results over HTTP (`serve`).

#![allow(missing_docs)]

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use landscape_health::core::projection::{
    HealthRow, SortColumn, SortDirection, SortState, materialize_rows, sort_rows,
};
use landscape_health::utils::logging::init_logging;
use landscape_health::utils::{format_age, format_duration};
use landscape_health::{
    Config, HealthPoller, HealthStatus, HttpHealthTransport, HttpServer, Landscape,
    PollDispatcher, PollOptions, PollSnapshot, ResultCache,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "landscape-health", version, about = "Component health monitoring across landscapes")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "LANDSCAPE_HEALTH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Poll a landscape once and print the result table
    Check {
        #[arg(short, long)]
        landscape: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Sort column: name, team, status, response_time, last_checked
        #[arg(long)]
        sort: Option<SortColumn>,
        #[arg(long)]
        desc: bool,
        /// Omit "not supported" rows for ineligible components
        #[arg(long)]
        hide_unsupported: bool,
    },
    /// Poll a landscape repeatedly and print a summary line per cycle
    Watch {
        #[arg(short, long)]
        landscape: String,
        /// Seconds between refreshes (defaults to engine.auto_refresh_secs, then 60)
        #[arg(short, long)]
        interval: Option<u64>,
    },
    /// Serve the HTTP API
    Serve,
    /// List configured landscapes
    Landscapes,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())
        .await
        .context("failed to load configuration")?;
    init_logging(&config.logging)?;
    debug!("Configuration loaded");

    match cli.command {
        Command::Check {
            landscape,
            json,
            sort,
            desc,
            hide_unsupported,
        } => {
            let sort = match sort {
                Some(column) => {
                    let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
                    SortState::by_column(column, direction)
                }
                None => SortState::default(),
            };
            check(&config, &landscape, json, sort, !hide_unsupported).await
        }
        Command::Watch {
            landscape,
            interval,
        } => {
            let period = interval
                .map(Duration::from_secs)
                .or_else(|| config.engine.auto_refresh())
                .unwrap_or(Duration::from_secs(60));
            watch(&config, &landscape, period).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve => {
            HttpServer::new(&config)?.start().await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Landscapes => {
            for landscape in &config.registry.landscapes {
                let marker = if landscape.is_central { " (central)" } else { "" };
                println!("{:<16} {:<20} {}{}", landscape.id, landscape.name, landscape.route, marker);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_poller(config: &Config) -> Result<HealthPoller> {
    let transport = Arc::new(HttpHealthTransport::new(&config.transport)?);
    let cache = Arc::new(ResultCache::new(config.engine.cache_config())?);
    Ok(HealthPoller::new(PollDispatcher::new(transport), cache))
}

fn find_landscape<'a>(config: &'a Config, id: &str) -> Result<&'a Landscape> {
    match config.registry.landscape(id) {
        Some(landscape) => Ok(landscape),
        None => bail!("unknown landscape {:?}", id),
    }
}

/// Exits non-zero when any component is DOWN or ERROR
async fn check(
    config: &Config,
    landscape_id: &str,
    json: bool,
    sort: SortState,
    include_unsupported: bool,
) -> Result<ExitCode> {
    let landscape = find_landscape(config, landscape_id)?;
    let poller = build_poller(config)?;
    let registry = &config.registry;

    let snapshot = poller
        .poll(&registry.components, landscape, &PollOptions::for_registry(registry))
        .await?;

    let mut rows = materialize_rows(
        &registry.components,
        &snapshot.results,
        landscape,
        registry.has_central_landscape(),
        &registry.team_names(),
        include_unsupported,
    );
    sort_rows(&mut rows, &sort);

    let summary = snapshot.summary();
    if json {
        let body = serde_json::json!({
            "landscape": landscape,
            "summary": summary,
            "results": rows,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print_table(&rows);
        print_summary(landscape, &snapshot);
    }

    Ok(if summary.down + summary.error > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

async fn watch(config: &Config, landscape_id: &str, period: Duration) -> Result<()> {
    let landscape = find_landscape(config, landscape_id)?;
    let poller = Arc::new(build_poller(config)?);
    let registry = &config.registry;
    let mut updates = poller.subscribe();

    let first = poller
        .poll(&registry.components, landscape, &PollOptions::for_registry(registry))
        .await?;
    print_summary(landscape, &first);
    updates.borrow_and_update();

    info!("Watching {} every {:?}", landscape.id, period);
    let refresher = poller.spawn_auto_refresh(period);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if !snapshot.is_fetching {
                    print_summary(landscape, &snapshot);
                }
            }
        }
    }

    poller.shutdown();
    refresher.await.context("auto-refresh task failed")?;
    Ok(())
}

fn print_table(rows: &[HealthRow]) {
    let now = chrono::Utc::now();
    println!(
        "{:<28} {:<16} {:<16} {:>8} {:>10}  {}",
        "COMPONENT", "TEAM", "STATUS", "TIME", "CHECKED", "ERROR"
    );
    for row in rows {
        let result = &row.result;
        println!(
            "{:<28} {:<16} {:<16} {:>8} {:>10}  {}",
            result.component_name,
            row.team.as_deref().unwrap_or("-"),
            result.status.label(),
            result.response_time.map(format_duration).unwrap_or_else(|| "-".to_string()),
            result
                .last_checked
                .map(|ts| format_age(ts, now))
                .unwrap_or_else(|| "-".to_string()),
            result.error.as_deref().unwrap_or(""),
        );
    }
}

fn print_summary(landscape: &Landscape, snapshot: &PollSnapshot) {
    let summary = snapshot.summary();
    let loading = snapshot
        .results
        .iter()
        .filter(|r| r.status == HealthStatus::Loading)
        .count();
    println!(
        "{}: {} total, {} up, {} down, {} unknown, {} error, avg {}{}{}",
        landscape.name,
        summary.total,
        summary.up,
        summary.down,
        summary.unknown,
        summary.error,
        format_duration(summary.avg_response_time),
        if loading > 0 { format!(", {} loading", loading) } else { String::new() },
        snapshot
            .error
            .as_deref()
            .map(|e| format!(" (last poll failed: {})", e))
            .unwrap_or_default(),
    );
}
