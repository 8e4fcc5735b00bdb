//! 共享测试工具和辅助函数

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::MockServer;
use zone_sync_provider::CloudflareProvider;

pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const API_TOKEN: &str = "test-token";

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 断言 `Option` 为 `Some`，并解包返回内部值。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 指向 mock server 的 Cloudflare provider
pub fn provider_for(server: &MockServer, max_retries: u32) -> Option<CloudflareProvider> {
    CloudflareProvider::new(API_TOKEN.to_string(), ZONE_ID.to_string())
        .ok()
        .map(|p| p.with_api_base(&server.uri()).with_max_retries(max_retries))
}

pub fn records_path() -> String {
    format!("/zones/{ZONE_ID}/dns_records")
}

/// Cloudflare 记录 JSON
pub fn cf_record(id: &str, record_type: &str, name: &str, content: &str) -> Value {
    json!({
        "id": id,
        "type": record_type,
        "name": name,
        "content": content,
        "ttl": 1,
        "proxied": false,
        "created_on": "2024-05-06T07:08:09.123456Z",
        "modified_on": "2024-05-06T07:08:09.123456Z"
    })
}

/// 成功响应信封
pub fn success(result: Value) -> Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result
    })
}

/// 失败响应信封
pub fn failure(errors: &[(i32, &str)]) -> Value {
    let errors: Vec<Value> = errors
        .iter()
        .map(|(code, message)| json!({ "code": code, "message": message }))
        .collect();
    json!({
        "success": false,
        "errors": errors,
        "messages": [],
        "result": null
    })
}
