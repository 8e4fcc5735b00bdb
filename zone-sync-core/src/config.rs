//! Run configuration injected by the caller

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Default managed apex.
pub const DEFAULT_ZONE_APEX: &str = "is-cod.in";

/// Settings for one sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    /// Apex of the managed zone; every FQDN is `{subdomain}.{zone_apex}`.
    pub zone_apex: String,
    /// Check existence only, never create.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            zone_apex: DEFAULT_ZONE_APEX.to_string(),
            dry_run: false,
        }
    }
}

impl SyncConfig {
    /// Normalize and check the apex (lowercase, no surrounding dots).
    pub fn new(zone_apex: &str, dry_run: bool) -> CoreResult<Self> {
        let zone_apex = zone_apex.trim().trim_matches('.').to_ascii_lowercase();
        if zone_apex.is_empty() {
            return Err(CoreError::Config("zone apex must not be empty".to_string()));
        }
        if zone_apex.chars().any(char::is_whitespace) {
            return Err(CoreError::Config(format!(
                "zone apex contains whitespace: {zone_apex}"
            )));
        }
        Ok(Self { zone_apex, dry_run })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_apex() {
        let config = SyncConfig::new(" Is-Cod.In. ", true);
        assert!(
            matches!(&config, Ok(c) if c.zone_apex == "is-cod.in" && c.dry_run),
            "{config:?}"
        );
    }

    #[test]
    fn rejects_blank_apex() {
        assert!(matches!(SyncConfig::new("  ", false), Err(CoreError::Config(_))));
        assert!(matches!(SyncConfig::new(".", false), Err(CoreError::Config(_))));
        assert!(matches!(
            SyncConfig::new("is cod.in", false),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn default_apex() {
        assert_eq!(SyncConfig::default().zone_apex, DEFAULT_ZONE_APEX);
    }
}
