//! Generic HTTP client tools
//!
//! Sending, status classification, body reading and retrying live here so that each
//! provider only builds its `RequestBuilder` (URL, auth headers, body) and interprets
//! the response envelope.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Upper bound for a single backoff sleep.
const MAX_BACKOFF_MS: u64 = 10_000;
/// Upper bound honoured for a server-supplied `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;

/// Identifies a request in log lines and error values.
#[derive(Debug, Clone, Copy)]
pub struct RequestLabel<'a> {
    /// Provider name (for logging and error attribution).
    pub provider: &'a str,
    /// HTTP method, e.g. `"GET"`.
    pub method: &'a str,
    /// URL or action name.
    pub target: &'a str,
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Sends one request and returns `(status_code, response_text)`.
    ///
    /// Responses with an application envelope (2xx and most 4xx) are returned as-is for
    /// the provider to interpret. The following are turned into errors here:
    /// - send failures → `Timeout` or `NetworkError`
    /// - HTTP 429 → `RateLimited` (with `Retry-After` when present)
    /// - HTTP 502/503/504 → `NetworkError`
    pub async fn execute_request(
        request_builder: RequestBuilder,
        label: RequestLabel<'_>,
    ) -> Result<(u16, String), ProviderError> {
        let RequestLabel {
            provider,
            method,
            target,
        } = label;
        log::debug!("[{provider}] {method} {target}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider}] Response Status: {status_code}");

        // 必须在读取 body 之前取出 header
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider.to_string(),
                retry_after,
                raw_message: Some(truncate_for_log(&body)),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider}] Upstream unavailable (HTTP {status_code})");
            return Err(ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body, mapping failures to `ProviderError::ParseError`.
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// [`execute_request`](Self::execute_request) with up to `max_retries` extra attempts.
    ///
    /// Only `NetworkError`, `Timeout` and `RateLimited` are retried. Delays grow
    /// 100ms, 200ms, 400ms, ... capped at 10s; a `Retry-After` hint (capped at 30s)
    /// takes precedence. Requests whose body cannot be cloned are sent once.
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        label: RequestLabel<'_>,
        max_retries: u32,
    ) -> Result<(u16, String), ProviderError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, label).await;
        }

        let mut attempt = 0;
        loop {
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{}] Cannot clone request, disabling retry", label.provider);
                return Self::execute_request(request_builder, label).await;
            };

            match Self::execute_request(req, label).await {
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    attempt += 1;
                    log::warn!(
                        "[{}] {} {} failed (attempt {attempt}/{max_retries}), retrying in {:.1}s: {e}",
                        label.provider,
                        label.method,
                        label.target,
                        delay.as_secs_f32(),
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}

/// Network errors, timeouts and throttling are worth another attempt; API verdicts are not.
fn is_retryable(error: &ProviderError) -> bool {
    matches!(
        error,
        ProviderError::NetworkError { .. }
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
    )
}

fn retry_delay(error: &ProviderError, attempt: u32) -> Duration {
    if let ProviderError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(MAX_RETRY_AFTER_SECS))
    } else {
        backoff_delay(attempt)
    }
}

fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}
