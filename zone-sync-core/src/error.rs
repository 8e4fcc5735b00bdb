//! Unified error type definition

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use zone_sync_provider::ProviderError;

/// Per-line validation failure. The line is skipped; the rest of the file still runs.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ValidationError {
    /// The first token is not one of A, AAAA, CNAME, MX, TXT.
    #[error("unknown record type: {0}")]
    UnknownRecordType(String),

    /// Nothing followed the type (and, for MX, the priority).
    #[error("empty value")]
    EmptyValue,

    /// The trailing MX token is not plain decimal digits fitting a 16-bit unsigned integer.
    #[error("invalid MX priority: {0}")]
    InvalidPriority(String),

    /// The value mentions the managed zone itself.
    #[error("value references managed zone {apex}: {value}")]
    ReferencesManagedZone { apex: String, value: String },
}

/// File-level failure: the whole source is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ParseError {
    /// The file name yields no subdomain (e.g. `.txt`).
    #[error("empty subdomain")]
    EmptySubdomain,

    /// The subdomain contains characters other than letters, digits, `-`, `_` and `.`.
    #[error("invalid subdomain: {0}")]
    InvalidSubdomain(String),

    /// The subdomain already contains the zone apex (`foo.example.com.txt`).
    #[error("subdomain {subdomain} contains managed zone {apex}")]
    SubdomainContainsApex { subdomain: String, apex: String },
}

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// The record-source directory could not be enumerated. Fatal for the run.
    #[error("Failed to enumerate record sources in {}: {source}", .path.display())]
    SourceEnumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One record source could not be read.
    #[error("Failed to read record source {subdomain}: {detail}")]
    SourceRead { subdomain: String, detail: String },

    /// Invalid run configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether the whole run must stop.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SourceEnumeration { .. } | Self::Config(_))
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
