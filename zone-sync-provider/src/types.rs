use serde::{Deserialize, Serialize};
use thiserror::Error;

/// TTL value the provider interprets as "automatic" (its minimum).
pub const TTL_AUTOMATIC: u32 = 1;

// ============ Provider Types ============

/// Identifies which DNS provider implementation to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Cloudflare DNS. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    Cloudflare,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare => write!(f, "cloudflare"),
        }
    }
}

// ============ DNS Record Types ============

/// DNS record type identifier for the managed record set.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, `"MX"`, `"TXT"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Text record.
    Txt,
}

impl DnsRecordType {
    /// Every supported record type.
    pub const ALL: [Self; 5] = [Self::A, Self::Aaaa, Self::Cname, Self::Mx, Self::Txt];

    /// Wire name used by provider APIs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
        }
    }

    /// Look up a record type by name, ignoring ASCII case.
    ///
    /// Returns `None` for anything outside the supported set (e.g. `"SRV"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-safe representation of DNS record data.
///
/// Each variant carries exactly the fields valid for that record type; only
/// [`MX`](Self::MX) has a priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum RecordData {
    /// A record: maps a hostname to an IPv4 address.
    A {
        /// IPv4 address (e.g., `"1.2.3.4"`).
        address: String,
    },

    /// AAAA record: maps a hostname to an IPv6 address.
    AAAA {
        /// IPv6 address (e.g., `"2001:db8::1"`).
        address: String,
    },

    /// CNAME record: alias from one name to another.
    CNAME {
        /// Target hostname.
        target: String,
    },

    /// MX record: mail exchange server.
    MX {
        /// Priority (lower = preferred).
        priority: u16,
        /// Mail server hostname.
        exchange: String,
    },

    /// TXT record: arbitrary text data.
    TXT {
        /// Text content.
        text: String,
    },
}

impl RecordData {
    /// Returns the [`DnsRecordType`] discriminant for this record data.
    pub fn record_type(&self) -> DnsRecordType {
        match self {
            Self::A { .. } => DnsRecordType::A,
            Self::AAAA { .. } => DnsRecordType::Aaaa,
            Self::CNAME { .. } => DnsRecordType::Cname,
            Self::MX { .. } => DnsRecordType::Mx,
            Self::TXT { .. } => DnsRecordType::Txt,
        }
    }

    /// The value sent as the record's `content`.
    pub fn content(&self) -> &str {
        match self {
            Self::A { address } | Self::AAAA { address } => address,
            Self::CNAME { target } => target,
            Self::MX { exchange, .. } => exchange,
            Self::TXT { text } => text,
        }
    }

    /// MX priority; `None` for every other type.
    pub fn priority(&self) -> Option<u16> {
        match self {
            Self::MX { priority, .. } => Some(*priority),
            _ => None,
        }
    }
}

/// A DNS record as reported by the provider.
///
/// `record_type` is kept as the provider's string so that records of types outside
/// [`DnsRecordType`] can still be reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    /// Provider-specific record identifier.
    pub id: String,
    /// Fully-qualified record name (no trailing dot).
    pub name: String,
    /// Record type as reported by the provider.
    pub record_type: String,
    /// Record content.
    pub content: String,
    /// Time to live in seconds (`1` = automatic).
    pub ttl: u32,
    /// MX priority, if the provider reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Whether the provider's edge proxy is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    /// When the record was created, if known.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,

    /// When the record was last updated, if known.
    #[serde(with = "crate::utils::datetime")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Request to create a new DNS record in the configured zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    /// Fully-qualified record name (e.g., `"www.example.com"`).
    pub name: String,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Type-specific record data.
    pub data: RecordData,
    /// Route traffic through the provider's edge proxy.
    pub proxied: bool,
}

// ============ Configuration Types ============

/// Validation error for provider configuration.
#[derive(Debug, Clone, Serialize, Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConfigValidationError {
    /// A required field is present but empty/whitespace-only.
    #[error("Field must not be empty: {label}")]
    EmptyField {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A field has an invalid format.
    #[error("{label}: {reason}")]
    InvalidFormat {
        /// Which provider the error relates to.
        provider: ProviderType,
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
        /// Description of what's wrong with the format.
        reason: String,
    },
}

/// Type-safe configuration for the supported DNS providers.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
/// Credentials and the zone identifier are supplied by the caller; nothing here reads
/// the process environment.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "config")]
pub enum ProviderConfig {
    /// Cloudflare configuration. Requires feature `cloudflare`.
    #[cfg(feature = "cloudflare")]
    #[serde(rename = "cloudflare")]
    Cloudflare {
        /// Cloudflare API token (bearer).
        api_token: String,
        /// Identifier of the zone all records are written to.
        zone_id: String,
        /// API root, e.g. `https://api.cloudflare.com/client/v4`.
        api_base: String,
        /// Transport retries per request (0 disables retrying).
        max_retries: u32,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare {
                zone_id,
                api_base,
                max_retries,
                ..
            } => f
                .debug_struct("Cloudflare")
                .field("api_token", &"<redacted>")
                .field("zone_id", zone_id)
                .field("api_base", api_base)
                .field("max_retries", max_retries)
                .finish(),
        }
    }
}

impl ProviderConfig {
    /// The provider this configuration targets.
    pub fn provider_type(&self) -> ProviderType {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare { .. } => ProviderType::Cloudflare,
        }
    }

    /// Check that required fields are present and well-formed.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        match self {
            #[cfg(feature = "cloudflare")]
            Self::Cloudflare {
                api_token,
                zone_id,
                api_base,
                ..
            } => {
                let provider = self.provider_type();
                Self::require_non_empty(provider, "apiToken", "API Token", api_token)?;
                Self::require_non_empty(provider, "zoneId", "Zone ID", zone_id)?;
                Self::require_non_empty(provider, "apiBase", "API Base URL", api_base)?;
                if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
                    return Err(ConfigValidationError::InvalidFormat {
                        provider,
                        field: "apiBase".to_string(),
                        label: "API Base URL".to_string(),
                        reason: "must start with http:// or https://".to_string(),
                    });
                }
                Ok(())
            }
        }
    }

    fn require_non_empty(
        provider: ProviderType,
        field: &str,
        label: &str,
        value: &str,
    ) -> Result<(), ConfigValidationError> {
        if value.trim().is_empty() {
            return Err(ConfigValidationError::EmptyField {
                provider,
                field: field.to_string(),
                label: label.to_string(),
            });
        }
        Ok(())
    }
}
