//! Cloudflare HTTP 请求方法

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;
use crate::http_client::{HttpUtils, RequestLabel};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CloudflareProvider, CloudflareResponse};

impl CloudflareProvider {
    /// 执行 GET 请求（可重试）
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path_and_query: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{}{path_and_query}", self.api_base);
        let request = self.client.get(&url).bearer_auth(&self.api_token);

        let (_, response_text) = HttpUtils::execute_request_with_retry(
            request,
            RequestLabel {
                provider: self.provider_name(),
                method: "GET",
                target: &url,
            },
            self.max_retries,
        )
        .await?;

        self.unwrap_envelope::<T>(&response_text, context)?
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))
    }

    /// 执行 POST 请求
    ///
    /// 创建请求不做重试：超时的请求可能已经在服务端生效
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{}{path}", self.api_base);
        if log::log_enabled!(log::Level::Debug) {
            let body_json = serde_json::to_string(body)
                .unwrap_or_else(|_| "无法序列化请求体".to_string());
            log::debug!("[{}] Request Body: {body_json}", self.provider_name());
        }

        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(body);

        let (_, response_text) = HttpUtils::execute_request(
            request,
            RequestLabel {
                provider: self.provider_name(),
                method: "POST",
                target: &url,
            },
        )
        .await?;

        // success = true 但没有 result：请求已被接受，不能算作传输错误
        self.unwrap_envelope::<T>(&response_text, context)?
            .ok_or_else(|| {
                log::warn!(
                    "[{}] POST {path} succeeded without a result record",
                    self.provider_name()
                );
                self.unknown_error(RawApiError::new(
                    "request accepted but the response carried no result record",
                ))
            })
    }

    /// 解析 Cloudflare 响应信封：`success = false` 时映射为统一错误
    ///
    /// 错误码取第一条，消息保留全部，便于诊断
    fn unwrap_envelope<T: DeserializeOwned>(
        &self,
        response_text: &str,
        context: ErrorContext,
    ) -> Result<Option<T>> {
        let cf_response: CloudflareResponse<T> =
            HttpUtils::parse_json(response_text, self.provider_name())?;

        if !cf_response.success {
            let errors = cf_response.errors.unwrap_or_default();
            let raw = match errors.first() {
                Some(first) => {
                    let message = errors
                        .iter()
                        .map(|e| format!("{} ({})", e.message, e.code))
                        .collect::<Vec<_>>()
                        .join("; ");
                    RawApiError::with_code(first.code.to_string(), message)
                }
                None => RawApiError::new("Unknown error"),
            };
            log::error!("[{}] API 错误: {}", self.provider_name(), raw.message);
            return Err(self.map_error(raw, context));
        }

        Ok(cf_response.result)
    }
}
