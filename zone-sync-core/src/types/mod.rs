//! Type definition module

mod intent;
mod report;

pub use intent::{LineRejection, ParsedSource, RecordIntent};
pub use report::{FailureReason, FileFailure, IntentReport, Outcome, SyncReport};

// Re-export library types
pub use zone_sync_provider::{DnsRecordType, ProviderRecord, RecordData};
