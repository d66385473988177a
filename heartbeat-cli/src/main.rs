//! dbt Heartbeat
//!
//! Polls a dbt Cloud job run until it finishes, prints progress to the
//! terminal and raises a desktop notification with the outcome.

mod config;
mod notifier;
mod poller;
mod presenter;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use heartbeat_client::DbtCloudClient;
use heartbeat_core::domain::JobRun;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use notifier::DesktopNotifier;

#[derive(Parser)]
#[command(name = "dbt-heartbeat")]
#[command(about = "Poll a dbt Cloud job run and get notified when it finishes", long_about = None)]
struct Cli {
    /// The ID of the dbt Cloud job run
    run_id: u64,

    /// Logging level
    #[arg(long, value_enum, ignore_case = true, default_value = "INFO")]
    log_level: LogLevel,

    /// Seconds between two polls
    #[arg(
        long,
        default_value_t = config::DEFAULT_POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    poll_interval: u64,

    /// Skip the desktop notification
    #[arg(long)]
    no_notify: bool,
}

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Equivalent `tracing` level name; critical folds into error
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level);

    match dotenvy::dotenv() {
        Ok(path) => debug!("Environment variables loaded from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }

    let config = match Config::from_env() {
        Ok(config) => config.with_poll_interval(Duration::from_secs(cli.poll_interval)),
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e.to_string().red());
            std::process::exit(1);
        }
    };
    config.validate()?;
    debug!("Using configuration: {:?}", config);

    let http_client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .context("Failed to build HTTP client")?;
    let client = DbtCloudClient::with_client(
        config.base_url.clone(),
        config.account_id.clone(),
        config.api_key.clone(),
        http_client,
    );

    let final_run = poller::poll_run(&client, cli.run_id, config.poll_interval)
        .await
        .with_context(|| format!("Failed to poll job run {}", cli.run_id))?;

    let job_name = poller::resolve_job_name(&client, &final_run).await;
    debug!("Job details - Name: {}, Run ID: {}", job_name, final_run.run_id());

    presenter::print_summary(&final_run, &job_name);

    info!("Job completed with final status: {}", final_run.status());
    presenter::print_completion(&final_run);

    if cli.no_notify {
        info!("Desktop notification disabled");
    } else {
        send_notification(final_run, job_name).await;
    }

    Ok(())
}

/// Initialize logging
///
/// `RUST_LOG` takes precedence; otherwise the workspace crates log at the
/// level given on the command line.
fn init_tracing(level: LogLevel) {
    let level = level.as_filter();
    let default_filter = format!(
        "dbt_heartbeat={level},heartbeat_client={level},heartbeat_core={level},warn"
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Deliver the completion notification on a blocking worker
///
/// Platform backends block and may panic; neither reaches the caller.
async fn send_notification(run: JobRun, job_name: String) {
    info!("Attempting to send system notification...");

    let delivery = tokio::task::spawn_blocking(move || {
        notifier::notify_completion(&DesktopNotifier, &run, &job_name)
    })
    .await;

    if let Err(e) = delivery {
        error!("Notification task failed: {}", e);
    }
}
