//! # zone-sync-provider
//!
//! DNS provider abstraction used by zone-sync to look up and create records in a single
//! managed zone.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | Bearer Token |
//!
//! ## Feature Flags
//!
//! - **`cloudflare`** *(default)*: Enable the Cloudflare provider.
//! - **`rustls`** *(default)*: Use rustls for TLS.
//! - **`native-tls`**: Use the platform's native TLS implementation instead.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use zone_sync_provider::{
//!     create_provider, CreateRecordRequest, DnsRecordType, ProviderConfig, RecordData,
//!     CF_API_BASE, TTL_AUTOMATIC,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderConfig::Cloudflare {
//!         api_token: "your-token".to_string(),
//!         zone_id: "your-zone-id".to_string(),
//!         api_base: CF_API_BASE.to_string(),
//!         max_retries: 2,
//!     })?;
//!
//!     let existing = provider
//!         .find_records("www.example.com", DnsRecordType::A)
//!         .await?;
//!
//!     if existing.is_empty() {
//!         let created = provider
//!             .create_record(&CreateRecordRequest {
//!                 name: "www.example.com".to_string(),
//!                 ttl: TTL_AUTOMATIC,
//!                 data: RecordData::A { address: "192.0.2.10".to_string() },
//!                 proxied: false,
//!             })
//!             .await?;
//!         println!("created {}", created.id);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! [`ProviderError::is_transport`] separates failures where no provider verdict was
//! obtained (network, timeout, rate limiting, unparseable response) from rejections
//! reported by the provider API. Transient failures on lookups are retried with
//! exponential backoff; creates are sent once.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::create_provider;

pub use traits::ProviderClient;

pub use types::{
    ConfigValidationError, CreateRecordRequest, DnsRecordType, ProviderConfig, ProviderRecord,
    ProviderType, RecordData, TTL_AUTOMATIC,
};

pub use utils::log_sanitizer::truncate_for_log;

#[cfg(feature = "cloudflare")]
pub use providers::{CF_API_BASE, CloudflareProvider};
