//! Reconciliation outcomes and the per-run report

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use zone_sync_provider::{DnsRecordType, ProviderError, ProviderRecord};

use crate::error::ParseError;
use crate::types::{LineRejection, RecordIntent};

/// Why an intent could not be applied.
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "stage", content = "error", rename_all = "camelCase")]
pub enum FailureReason {
    /// The existence lookup failed; no create was attempted.
    #[error("existence check failed: {0}")]
    ExistenceCheck(ProviderError),

    /// The provider answered the create with `success: false`.
    #[error("provider rejected create: {0}")]
    Rejected(ProviderError),

    /// The create never got a provider verdict (network, timeout, rate limit, bad response).
    #[error("transport error on create: {0}")]
    Transport(ProviderError),
}

impl FailureReason {
    /// Classify an error returned by the create call.
    pub fn from_create_error(err: ProviderError) -> Self {
        if err.is_transport() {
            Self::Transport(err)
        } else {
            Self::Rejected(err)
        }
    }
}

/// Result of reconciling one intent.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Outcome {
    /// A new record was created.
    #[serde(rename_all = "camelCase")]
    Created { record_id: String },
    /// One or more records with the same name and type already exist.
    Skipped { existing: Vec<ProviderRecord> },
    /// Dry run: nothing exists yet, create was not issued.
    Planned,
    Failed { reason: FailureReason },
}

impl Outcome {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Skipped { .. } => "skipped",
            Self::Planned => "planned",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Outcome of one intent together with where it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentReport {
    pub subdomain: String,
    pub line: usize,
    pub fqdn: String,
    pub record_type: DnsRecordType,
    pub outcome: Outcome,
}

impl IntentReport {
    pub fn new(intent: &RecordIntent, outcome: Outcome) -> Self {
        Self {
            subdomain: intent.subdomain.clone(),
            line: intent.line,
            fqdn: intent.fqdn.clone(),
            record_type: intent.record_type(),
            outcome,
        }
    }
}

/// A record source skipped as a whole.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FileFailure {
    /// The file could not be read.
    #[serde(rename_all = "camelCase")]
    Read { subdomain: String, detail: String },
    /// The file name is not usable as a subdomain.
    #[serde(rename_all = "camelCase")]
    Parse { subdomain: String, error: ParseError },
}

impl FileFailure {
    pub fn subdomain(&self) -> &str {
        match self {
            Self::Read { subdomain, .. } | Self::Parse { subdomain, .. } => subdomain,
        }
    }
}

impl std::fmt::Display for FileFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { subdomain, detail } => write!(f, "{subdomain}: read failed: {detail}"),
            Self::Parse { subdomain, error } => write!(f, "{subdomain}: {error}"),
        }
    }
}

/// Aggregate of one sync run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub zone_apex: String,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Number of record sources enumerated.
    pub sources: usize,
    pub intents: Vec<IntentReport>,
    pub rejected_lines: Vec<LineRejection>,
    pub failed_files: Vec<FileFailure>,
}

impl SyncReport {
    pub fn new(zone_apex: impl Into<String>, dry_run: bool) -> Self {
        Self {
            zone_apex: zone_apex.into(),
            dry_run,
            started_at: Utc::now(),
            finished_at: None,
            sources: 0,
            intents: Vec::new(),
            rejected_lines: Vec::new(),
            failed_files: Vec::new(),
        }
    }

    pub fn record(&mut self, intent: &RecordIntent, outcome: Outcome) {
        self.intents.push(IntentReport::new(intent, outcome));
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.intents.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Created { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Planned))
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failed)
    }

    /// Any failed intent, rejected line or skipped file.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed() > 0 || !self.rejected_lines.is_empty() || !self.failed_files.is_empty()
    }

    /// One-line summary for the end of a run.
    pub fn summary(&self) -> String {
        format!(
            "{} source(s), {} intent(s): {} created, {} skipped, {} planned, {} failed; {} rejected line(s), {} failed file(s)",
            self.sources,
            self.intents.len(),
            self.created(),
            self.skipped(),
            self.planned(),
            self.failed(),
            self.rejected_lines.len(),
            self.failed_files.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zone_sync_provider::RecordData;

    fn intent(line: usize) -> RecordIntent {
        RecordIntent {
            subdomain: "blog".to_string(),
            line,
            fqdn: "blog.is-cod.in".to_string(),
            data: RecordData::A {
                address: "192.0.2.1".to_string(),
            },
        }
    }

    fn timeout() -> ProviderError {
        ProviderError::Timeout {
            provider: "cloudflare".to_string(),
            detail: "request timed out".to_string(),
        }
    }

    #[test]
    fn create_errors_split_by_transport() {
        assert!(matches!(
            FailureReason::from_create_error(timeout()),
            FailureReason::Transport(_)
        ));
        let rejected = FailureReason::from_create_error(ProviderError::InvalidParameter {
            provider: "cloudflare".to_string(),
            param: "content".to_string(),
            detail: "bad address".to_string(),
        });
        assert!(matches!(rejected, FailureReason::Rejected(_)));
    }

    #[test]
    fn counters_and_failures() {
        let mut report = SyncReport::new("is-cod.in", false);
        report.record(
            &intent(1),
            Outcome::Created {
                record_id: "r1".to_string(),
            },
        );
        report.record(&intent(2), Outcome::Skipped { existing: vec![] });
        assert!(!report.has_failures());

        report.record(
            &intent(3),
            Outcome::Failed {
                reason: FailureReason::ExistenceCheck(timeout()),
            },
        );
        assert_eq!(report.created(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.has_failures());
        assert!(report.summary().contains("1 created, 1 skipped, 0 planned, 1 failed"));
    }

    #[test]
    fn file_failure_alone_counts_as_failure() {
        let mut report = SyncReport::new("is-cod.in", false);
        report.failed_files.push(FileFailure::Parse {
            subdomain: String::new(),
            error: ParseError::EmptySubdomain,
        });
        assert!(report.has_failures());
    }

    #[test]
    fn report_serializes_outcome_status() {
        let mut report = SyncReport::new("is-cod.in", true);
        report.record(&intent(1), Outcome::Planned);
        let json = serde_json::to_value(&report);
        assert!(json.is_ok(), "serialize failed: {json:?}");
        let Ok(json) = json else {
            return;
        };
        assert_eq!(json["dryRun"], true);
        assert_eq!(json["intents"][0]["outcome"]["status"], "planned");
        assert_eq!(json["intents"][0]["recordType"], "A");
    }
}
