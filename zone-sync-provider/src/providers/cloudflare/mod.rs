//! Cloudflare DNS Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, normalize_api_base};

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse};

/// Default Cloudflare API root.
pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// Cloudflare DNS Provider bound to one zone.
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) zone_id: String,
    pub(crate) api_base: String,
    pub(crate) max_retries: u32,
}

impl CloudflareProvider {
    pub fn new(api_token: String, zone_id: String) -> Result<Self> {
        Ok(Self {
            client: create_http_client("cloudflare")?,
            api_token,
            zone_id,
            api_base: CF_API_BASE.to_string(),
            max_retries: 0,
        })
    }

    /// Point the provider at a different API root (proxies, test servers).
    #[must_use]
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = normalize_api_base(api_base);
        self
    }

    /// Retry transient transport failures up to `max_retries` times per request.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub(crate) fn records_path(&self) -> String {
        format!("/zones/{}/dns_records", self.zone_id)
    }
}
