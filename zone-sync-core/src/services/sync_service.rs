//! One-shot synchronization of all record sources

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::parser;
use crate::services::{Reconciler, ServiceContext};
use crate::types::{FileFailure, SyncReport};

/// Walks every record source in order and reconciles its intents.
pub struct SyncService {
    ctx: Arc<ServiceContext>,
    reconciler: Reconciler,
}

impl SyncService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let reconciler = Reconciler::new(ctx.provider.clone(), ctx.config.dry_run);
        Self { ctx, reconciler }
    }

    /// Run once over all sources.
    ///
    /// Only failure to enumerate sources is returned as an error. Everything else lands in
    /// the report.
    pub async fn run(&self) -> CoreResult<SyncReport> {
        let config = &self.ctx.config;
        let mut report = SyncReport::new(&config.zone_apex, config.dry_run);

        let subdomains = self.ctx.source_repository.list_subdomains().await?;
        report.sources = subdomains.len();
        log::info!(
            "Syncing {} record source(s) into {} via {}{}",
            subdomains.len(),
            config.zone_apex,
            self.ctx.provider.id(),
            if config.dry_run { " (dry run)" } else { "" }
        );

        for subdomain in &subdomains {
            self.sync_source(subdomain, &mut report).await?;
        }

        report.finish();
        log::info!("Sync finished: {}", report.summary());
        Ok(report)
    }

    /// Errors are recorded in the report; only fatal ones are returned.
    async fn sync_source(&self, subdomain: &str, report: &mut SyncReport) -> CoreResult<()> {
        let raw_text = match self.ctx.source_repository.read(subdomain).await {
            Ok(text) => text,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                let detail = match e {
                    CoreError::SourceRead { detail, .. } => detail,
                    other => other.to_string(),
                };
                log::error!("[{subdomain}] {detail}");
                report.failed_files.push(FileFailure::Read {
                    subdomain: subdomain.to_string(),
                    detail,
                });
                return Ok(());
            }
        };

        if raw_text.trim().is_empty() {
            log::debug!("[{subdomain}] empty source, nothing to do");
            return Ok(());
        }

        let parsed = match parser::parse(subdomain, &raw_text, &self.ctx.config.zone_apex) {
            Ok(parsed) => parsed,
            Err(error) => {
                log::warn!("[{subdomain}] skipping source: {error}");
                report.failed_files.push(FileFailure::Parse {
                    subdomain: subdomain.to_string(),
                    error,
                });
                return Ok(());
            }
        };

        log::info!(
            "Processing {subdomain}: {} record(s), {} rejected line(s)",
            parsed.intents.len(),
            parsed.rejected.len()
        );
        for rejection in &parsed.rejected {
            log::warn!(
                "[{}:{}] rejected \"{}\": {}",
                rejection.subdomain,
                rejection.line,
                rejection.text,
                rejection.error
            );
        }
        report.rejected_lines.extend(parsed.rejected);

        for intent in &parsed.intents {
            let outcome = self.reconciler.reconcile(intent).await;
            report.record(intent, outcome);
        }
        Ok(())
    }
}
