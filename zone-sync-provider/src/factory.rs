//! Provider factory.

use std::sync::Arc;

use crate::error::{ProviderError, Result};
use crate::traits::ProviderClient;
use crate::types::ProviderConfig;

#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;

/// Creates a [`ProviderClient`] from the given configuration.
///
/// The configuration is validated first; an invalid configuration is reported as
/// [`ProviderError::InvalidParameter`] naming the offending field.
///
/// # Examples
///
/// ```rust,no_run
/// use zone_sync_provider::{create_provider, ProviderConfig, CF_API_BASE};
///
/// let provider = create_provider(ProviderConfig::Cloudflare {
///     api_token: "your-token".to_string(),
///     zone_id: "023e105f4ecef8ad9ca31a8372d0c353".to_string(),
///     api_base: CF_API_BASE.to_string(),
///     max_retries: 2,
/// })?;
/// # Ok::<(), zone_sync_provider::ProviderError>(())
/// ```
pub fn create_provider(config: ProviderConfig) -> Result<Arc<dyn ProviderClient>> {
    let provider_name = config.provider_type().to_string();
    config.validate().map_err(|e| ProviderError::InvalidParameter {
        provider: provider_name,
        param: "config".to_string(),
        detail: e.to_string(),
    })?;

    match config {
        #[cfg(feature = "cloudflare")]
        ProviderConfig::Cloudflare {
            api_token,
            zone_id,
            api_base,
            max_retries,
        } => Ok(Arc::new(
            CloudflareProvider::new(api_token, zone_id)?
                .with_api_base(&api_base)
                .with_max_retries(max_retries),
        )),
    }
}
