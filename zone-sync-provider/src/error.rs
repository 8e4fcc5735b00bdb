//! Unified provider error

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned by every [`ProviderClient`](crate::ProviderClient) call.
///
/// `provider` names the backend that failed. Serialized with a `code` tag so the run
/// report can carry it as-is.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// Connection refused, DNS failure, reset, or a 502/503/504 from the edge.
    #[error("[{provider}] Network error: {detail}")]
    NetworkError { provider: String, detail: String },

    /// Token missing, malformed or revoked.
    #[error("[{provider}] Invalid credentials{}", suffix(.raw_message.as_deref()))]
    InvalidCredentials {
        provider: String,
        raw_message: Option<String>,
    },

    /// A conflicting record exists (reported by the create call itself).
    #[error("[{provider}] Record '{record_name}' already exists")]
    RecordExists {
        provider: String,
        record_name: String,
        raw_message: Option<String>,
    },

    /// The provider refused a field of the request, e.g. content that is not an IPv4 address.
    #[error("[{provider}] Invalid parameter '{param}': {detail}")]
    InvalidParameter {
        provider: String,
        /// `name`, `content`, `ttl`, `proxied`, `config` or `general`
        param: String,
        detail: String,
    },

    /// Record quota of the zone is used up.
    #[error("[{provider}] Quota exceeded{}", suffix(.raw_message.as_deref()))]
    QuotaExceeded {
        provider: String,
        raw_message: Option<String>,
    },

    /// HTTP 429. `retry_after` is in seconds when the server sent one.
    #[error("[{provider}] Rate limited{}", retry_hint(.retry_after.as_ref()))]
    RateLimited {
        provider: String,
        retry_after: Option<u64>,
        raw_message: Option<String>,
    },

    #[error("[{provider}] Request timeout: {detail}")]
    Timeout { provider: String, detail: String },

    /// The zone identifier does not resolve.
    #[error("[{provider}] Zone '{domain}' not found{}", suffix(.raw_message.as_deref()))]
    DomainNotFound {
        provider: String,
        domain: String,
        raw_message: Option<String>,
    },

    /// Token is valid but lacks access to the zone.
    #[error("[{provider}] Permission denied{}", suffix(.raw_message.as_deref()))]
    PermissionDenied {
        provider: String,
        raw_message: Option<String>,
    },

    /// Response body was not the expected JSON.
    #[error("[{provider}] Parse error: {detail}")]
    ParseError { provider: String, detail: String },

    /// Error code with no mapping.
    #[error("[{provider}] {raw_message}")]
    Unknown {
        provider: String,
        raw_code: Option<String>,
        raw_message: String,
    },
}

fn suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

fn retry_hint(retry_after: Option<&u64>) -> String {
    retry_after
        .map(|secs| format!(" (retry after {secs}s)"))
        .unwrap_or_default()
}

impl ProviderError {
    /// 调用方可预期的错误（配置、输入、冲突），日志用 `warn`；其余用 `error`。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::RecordExists { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::DomainNotFound { .. }
                | Self::PermissionDenied { .. }
        )
    }

    /// No provider verdict was obtained: network, timeout, rate limit, unreadable body.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. }
                | Self::Timeout { .. }
                | Self::RateLimited { .. }
                | Self::ParseError { .. }
        )
    }

    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::InvalidCredentials { provider, .. }
            | Self::RecordExists { provider, .. }
            | Self::InvalidParameter { provider, .. }
            | Self::QuotaExceeded { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::DomainNotFound { provider, .. }
            | Self::PermissionDenied { provider, .. }
            | Self::ParseError { provider, .. }
            | Self::Unknown { provider, .. } => provider,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_classification() {
        let timeout = ProviderError::Timeout {
            provider: "cloudflare".into(),
            detail: "deadline".into(),
        };
        let parse = ProviderError::ParseError {
            provider: "cloudflare".into(),
            detail: "expected value".into(),
        };
        let rejected = ProviderError::InvalidParameter {
            provider: "cloudflare".into(),
            param: "value".into(),
            detail: "bad ipv4".into(),
        };
        assert!(timeout.is_transport());
        assert!(parse.is_transport());
        assert!(!rejected.is_transport());
        assert!(rejected.is_expected());
        assert!(!timeout.is_expected());
    }

    #[test]
    fn display_includes_provider_and_message() {
        let err = ProviderError::Unknown {
            provider: "cloudflare".into(),
            raw_code: Some("1234".into()),
            raw_message: "something odd".into(),
        };
        assert_eq!(err.to_string(), "[cloudflare] something odd");
        assert_eq!(err.provider(), "cloudflare");
    }

    #[test]
    fn optional_details_in_display() {
        let limited = ProviderError::RateLimited {
            provider: "cloudflare".into(),
            retry_after: Some(7),
            raw_message: None,
        };
        let denied = ProviderError::PermissionDenied {
            provider: "cloudflare".into(),
            raw_message: Some("Unauthorized to access requested resource".into()),
        };
        let bare = ProviderError::QuotaExceeded {
            provider: "cloudflare".into(),
            raw_message: None,
        };
        assert_eq!(limited.to_string(), "[cloudflare] Rate limited (retry after 7s)");
        assert_eq!(
            denied.to_string(),
            "[cloudflare] Permission denied: Unauthorized to access requested resource"
        );
        assert_eq!(bare.to_string(), "[cloudflare] Quota exceeded");
    }

    #[test]
    fn serializes_with_code_tag() {
        let err = ProviderError::RateLimited {
            provider: "cloudflare".into(),
            retry_after: Some(5),
            raw_message: None,
        };
        let json = serde_json::to_value(&err);
        assert!(json.is_ok(), "serialize failed: {json:?}");
        let Ok(json) = json else {
            return;
        };
        assert_eq!(json["code"], "RateLimited");
        assert_eq!(json["retry_after"], 5);
    }
}
