//! zone-sync entry point
//!
//! Reads `{subdomain}.txt` record files and creates the records that are missing from the
//! Cloudflare zone. Logs go to stderr; the process exit status reflects the run (see
//! [`cli::exit_status`]).

mod cli;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zone_sync_core::{FsSourceRepository, ServiceContext, SyncReport, SyncService};
use zone_sync_provider::create_provider;

use cli::{Cli, EXIT_FATAL};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing to stderr; `log` records from the library crates are bridged in
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();

    match run(&cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<u8> {
    let sync_config = cli.sync_config().context("invalid zone configuration")?;
    let provider =
        create_provider(cli.provider_config()).context("failed to initialize DNS provider")?;
    let source_repository = Arc::new(FsSourceRepository::new(&cli.records_dir));

    tracing::info!(
        "Records dir: {}, zone apex: {}",
        source_repository.root().display(),
        sync_config.zone_apex
    );

    let ctx = Arc::new(ServiceContext::new(provider, source_repository, sync_config));
    let report = SyncService::new(ctx)
        .run()
        .await
        .context("sync aborted")?;

    if let Some(path) = &cli.report {
        write_report(path, &report).await?;
    }

    let code = cli::exit_status(&report, cli.allow_failures);
    if report.has_failures() {
        if cli.allow_failures {
            tracing::warn!("Run finished with failures (ignored by --allow-failures)");
        } else {
            tracing::error!("Run finished with failures: {}", report.summary());
        }
    }
    Ok(code)
}

async fn write_report(path: &Path, report: &SyncReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize run report")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("failed to write run report to {}", path.display()))?;
    tracing::info!("Run report written to {}", path.display());
    Ok(())
}
