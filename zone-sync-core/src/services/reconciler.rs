//! Applies record intents against the provider

use std::sync::Arc;

use zone_sync_provider::{CreateRecordRequest, ProviderClient, ProviderError, TTL_AUTOMATIC};

use crate::types::{FailureReason, Outcome, RecordIntent};

/// Check-then-create for one intent at a time.
///
/// The existence check and the create are not atomic; a record created by someone else in
/// between is not detected (single writer assumed).
pub struct Reconciler {
    provider: Arc<dyn ProviderClient>,
    dry_run: bool,
}

impl Reconciler {
    #[must_use]
    pub fn new(provider: Arc<dyn ProviderClient>, dry_run: bool) -> Self {
        Self { provider, dry_run }
    }

    /// Reconcile one intent. Never returns early for the caller: every error becomes
    /// [`Outcome::Failed`].
    pub async fn reconcile(&self, intent: &RecordIntent) -> Outcome {
        log::debug!(
            "[{}:{}] Checking {} {}",
            intent.subdomain,
            intent.line,
            intent.fqdn,
            intent.record_type()
        );

        let existing = match self
            .provider
            .find_records(&intent.fqdn, intent.record_type())
            .await
        {
            Ok(records) => records,
            Err(e) => {
                log_failure(intent, "existence check failed", &e);
                return Outcome::Failed {
                    reason: FailureReason::ExistenceCheck(e),
                };
            }
        };

        if !existing.is_empty() {
            log::info!(
                "Skipping {intent}: {} matching record(s) already exist",
                existing.len()
            );
            return Outcome::Skipped { existing };
        }

        if self.dry_run {
            log::info!("[dry-run] Would create {intent}");
            return Outcome::Planned;
        }

        let request = Self::create_request(intent);
        match self.provider.create_record(&request).await {
            Ok(record) => {
                log::info!("Created {intent} (id {})", record.id);
                Outcome::Created {
                    record_id: record.id,
                }
            }
            Err(e) => {
                log_failure(intent, "create failed", &e);
                Outcome::Failed {
                    reason: FailureReason::from_create_error(e),
                }
            }
        }
    }

    /// 固定策略：TTL 自动，不走代理
    fn create_request(intent: &RecordIntent) -> CreateRecordRequest {
        CreateRecordRequest {
            name: intent.fqdn.clone(),
            ttl: TTL_AUTOMATIC,
            data: intent.data.clone(),
            proxied: false,
        }
    }
}

fn log_failure(intent: &RecordIntent, stage: &str, err: &ProviderError) {
    if err.is_expected() {
        log::warn!("[{}:{}] {stage} for {intent}: {err}", intent.subdomain, intent.line);
    } else {
        log::error!("[{}:{}] {stage} for {intent}: {err}", intent.subdomain, intent.line);
    }
}
