//! Cloudflare `ProviderClient` trait 实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::providers::common::normalize_domain_name;
use crate::traits::{ErrorContext, ProviderClient, ProviderErrorMapper};
use crate::types::{CreateRecordRequest, DnsRecordType, ProviderRecord};

use super::types::CreateRecordBody;
use super::{CloudflareDnsRecord, CloudflareProvider, MAX_PAGE_SIZE_RECORDS};

impl CloudflareProvider {
    /// 将 Cloudflare 记录转换为 `ProviderRecord`
    pub(crate) fn cf_record_to_provider_record(cf_record: CloudflareDnsRecord) -> ProviderRecord {
        ProviderRecord {
            id: cf_record.id,
            name: normalize_domain_name(&cf_record.name),
            record_type: cf_record.record_type,
            content: cf_record.content,
            ttl: cf_record.ttl,
            priority: cf_record.priority,
            proxied: cf_record.proxied,
            created_at: parse_timestamp(cf_record.created_on.as_deref()),
            updated_at: parse_timestamp(cf_record.modified_on.as_deref()),
        }
    }
}

/// Cloudflare 时间戳为 RFC3339；无法解析时忽略
fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl ProviderClient for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn find_records(
        &self,
        name: &str,
        record_type: DnsRecordType,
    ) -> Result<Vec<ProviderRecord>> {
        // name + type 精确匹配，结果不会超过一页
        let url = format!(
            "{}?name={}&type={}&per_page={}",
            self.records_path(),
            urlencoding::encode(name),
            record_type.as_str(),
            MAX_PAGE_SIZE_RECORDS
        );

        let context = ErrorContext {
            record_name: Some(name.to_string()),
            domain: Some(self.zone_id.clone()),
        };
        let cf_records: Vec<CloudflareDnsRecord> = self.get(&url, context).await?;

        log::debug!(
            "[{}] {} existing {record_type} record(s) for {name}",
            self.provider_name(),
            cf_records.len()
        );

        Ok(cf_records
            .into_iter()
            .map(Self::cf_record_to_provider_record)
            .collect())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<ProviderRecord> {
        let body = CreateRecordBody {
            record_type: req.data.record_type().as_str(),
            name: &req.name,
            content: req.data.content(),
            ttl: req.ttl,
            proxied: req.proxied,
            priority: req.data.priority(),
        };

        let context = ErrorContext {
            record_name: Some(req.name.clone()),
            domain: Some(self.zone_id.clone()),
        };
        let cf_record: CloudflareDnsRecord =
            self.post(&self.records_path(), &body, context).await?;

        Ok(Self::cf_record_to_provider_record(cf_record))
    }
}
