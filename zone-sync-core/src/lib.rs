//! zone-sync core library
//!
//! Reconciles per-subdomain record files against a single DNS zone:
//! - [`parser`]: `{subdomain}.txt` text into validated record intents
//! - [`Reconciler`]: check-then-create for one intent, idempotent per (name, type)
//! - [`SyncService`]: walks every source in order and collects a [`SyncReport`]
//!
//! Record sources and the DNS provider are injected through traits
//! ([`SourceRepository`], [`zone_sync_provider::ProviderClient`]); nothing here reads the
//! process environment.

pub mod config;
pub mod error;
pub mod parser;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::SyncConfig;
pub use error::{CoreError, CoreResult, ParseError, ValidationError};
pub use services::{Reconciler, ServiceContext, SyncService};
pub use traits::{FsSourceRepository, SourceRepository};
pub use types::{FailureReason, Outcome, RecordIntent, SyncReport};
