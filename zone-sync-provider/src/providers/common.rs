//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .user_agent(concat!("zone-sync/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// 去掉 URL 末尾的斜杠，便于拼接路径
pub fn normalize_api_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_dot_removed() {
        assert_eq!(normalize_domain_name("www.example.com."), "www.example.com");
        assert_eq!(normalize_domain_name("www.example.com"), "www.example.com");
    }

    #[test]
    fn trailing_slash_removed() {
        assert_eq!(
            normalize_api_base("https://api.cloudflare.com/client/v4/"),
            "https://api.cloudflare.com/client/v4"
        );
    }

    #[test]
    fn client_builds() {
        assert!(create_http_client("test").is_ok());
    }
}
