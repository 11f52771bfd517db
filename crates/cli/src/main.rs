//! # Memefeed
//!
//! Entry point: loads configuration, restores persisted state, starts the
//! upstream stream, the background jobs and the HTTP API, and shuts them all
//! down on Ctrl-C.

mod bootstrap;
mod di;
mod server;

use chrono::Utc;
use clap::Parser;
use di::{Repositories, Services, UseCases};
use memefeed_domain::CliOverrides;
use memefeed_jobs::{CapacitySweepJob, IngestionJob, JobRunner, TallySweepJob};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "memefeed")]
#[command(version)]
#[command(about = "Filtered, bounded and moderated meme feed")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Web server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// SQLite database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Upstream stream URL; enables the stream
    #[arg(long)]
    stream_url: Option<String>,

    /// Run without the upstream stream
    #[arg(long)]
    no_stream: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind_address: self.bind.clone(),
            web_port: self.web_port,
            database_path: self.database.clone(),
            log_level: self.log_level.clone(),
            stream_url: self.stream_url.clone(),
            disable_stream: self.no_stream,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        web_port = config.server.web_port,
        bind = %config.server.bind_address,
        categories = config.store.categories.len(),
        stream_enabled = config.stream.enabled,
        "Configuration loaded"
    );

    let pool = bootstrap::init_database(&config.database).await?;
    let repos = Repositories::new(pool);
    let services = Services::new(&config, &repos)?;
    let use_cases = UseCases::new(&config, &repos, &services);

    let restored = use_cases.restore_state.execute().await?;
    info!(
        items = restored.items,
        records = restored.records,
        moderators = restored.moderators,
        "Persisted state restored"
    );

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_ctrl_c(shutdown.clone()));

    let mut runner = JobRunner::new()
        .with_capacity_sweep(
            CapacitySweepJob::new(use_cases.capacity_sweep.clone())
                .with_interval(config.jobs.capacity_sweep_interval_secs)
                .with_cancellation(shutdown.clone()),
        )
        .with_tally_sweep(
            TallySweepJob::new(use_cases.tally_sweep.clone())
                .with_interval(config.jobs.tally_sweep_interval_secs)
                .with_cancellation(shutdown.clone()),
        );

    let mut stream_handle = None;
    if config.stream.enabled {
        let (sender, receiver) = mpsc::channel(config.stream.channel_capacity);
        stream_handle = Some(server::start_stream(&config.stream, sender, shutdown.clone())?);
        runner = runner.with_ingestion(
            IngestionJob::new(use_cases.ingest_record.clone(), receiver)
                .with_cancellation(shutdown.clone()),
        );
    } else {
        warn!("Upstream stream disabled; only uploads will add items");
    }

    let job_handles = runner.start().await;

    let state = use_cases.app_state(&config);
    let served = server::start_web_server(&config.server, state, shutdown.clone()).await;
    if let Err(e) = &served {
        error!(error = %e, "Web server failed");
    }
    shutdown.cancel();

    if let Some(handle) = stream_handle {
        if let Err(e) = handle.await {
            error!(error = %e, "Stream client task failed");
        }
    }
    for handle in job_handles {
        if let Err(e) = handle.await {
            error!(error = %e, "Background job task failed");
        }
    }

    // Persist the blocklist and the latest tallies before exiting.
    let report = use_cases.tally_sweep.execute(Utc::now()).await;
    info!(
        credited = report.credited,
        failures = report.failures,
        "Final tally sweep completed"
    );

    info!("Shutdown complete");
    served
}

async fn wait_for_ctrl_c(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}
