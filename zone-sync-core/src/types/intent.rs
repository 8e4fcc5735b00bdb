//! Record intents produced by the parser

use serde::Serialize;
use zone_sync_provider::{DnsRecordType, RecordData};

use crate::error::ValidationError;

/// One desired DNS record, not yet confirmed to exist remotely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordIntent {
    /// Subdomain the record belongs to (file stem).
    pub subdomain: String,
    /// 1-based line number in the source file.
    pub line: usize,
    /// `{subdomain}.{zone_apex}`
    pub fqdn: String,
    /// Type-specific record data.
    pub data: RecordData,
}

impl RecordIntent {
    pub fn record_type(&self) -> DnsRecordType {
        self.data.record_type()
    }

    /// Record content as sent to the provider.
    pub fn value(&self) -> &str {
        self.data.content()
    }

    /// MX priority, `None` for all other types.
    pub fn priority(&self) -> Option<u16> {
        self.data.priority()
    }
}

impl std::fmt::Display for RecordIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.fqdn, self.record_type(), self.value())?;
        if let Some(priority) = self.priority() {
            write!(f, " {priority}")?;
        }
        Ok(())
    }
}

/// A source line that failed validation and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRejection {
    pub subdomain: String,
    pub line: usize,
    /// Trimmed line text.
    pub text: String,
    pub error: ValidationError,
}

/// Parser output for one record source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedSource {
    /// Valid intents in file order.
    pub intents: Vec<RecordIntent>,
    /// Lines that were skipped.
    pub rejected: Vec<LineRejection>,
}
