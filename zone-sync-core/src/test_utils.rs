//! 测试辅助模块
//!
//! 提供内存中的 provider / source repository 以及便捷的测试工厂方法。

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use zone_sync_provider::{
    CreateRecordRequest, DnsRecordType, ProviderClient, ProviderError, ProviderRecord, RecordData,
    Result as ProviderResult,
};

use crate::error::{CoreError, CoreResult};
use crate::traits::SourceRepository;
use crate::types::RecordIntent;

pub const APEX: &str = "is-cod.in";

pub fn intent(subdomain: &str, line: usize, data: RecordData) -> RecordIntent {
    RecordIntent {
        subdomain: subdomain.to_string(),
        line,
        fqdn: format!("{subdomain}.{APEX}"),
        data,
    }
}

pub fn network_error() -> ProviderError {
    ProviderError::NetworkError {
        provider: "memory".to_string(),
        detail: "connection reset by peer".to_string(),
    }
}

// ===== InMemoryProvider =====

#[derive(Default)]
struct ProviderState {
    records: Vec<ProviderRecord>,
    creates: Vec<CreateRecordRequest>,
    lookups: usize,
    /// (fqdn, type) -> error returned by `find_records`
    lookup_failures: HashMap<(String, DnsRecordType), ProviderError>,
    /// fqdn -> error returned by `create_record`
    create_failures: HashMap<String, ProviderError>,
}

/// Zone stored in memory; created records become visible to later lookups.
pub struct InMemoryProvider {
    state: RwLock<ProviderState>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ProviderState::default()),
        }
    }

    pub async fn seed(&self, record: ProviderRecord) {
        self.state.write().await.records.push(record);
    }

    pub async fn fail_lookup(&self, fqdn: &str, record_type: DnsRecordType, err: ProviderError) {
        self.state
            .write()
            .await
            .lookup_failures
            .insert((fqdn.to_string(), record_type), err);
    }

    pub async fn fail_create(&self, fqdn: &str, err: ProviderError) {
        self.state
            .write()
            .await
            .create_failures
            .insert(fqdn.to_string(), err);
    }

    /// Every create request received, in order (including failed ones).
    pub async fn create_requests(&self) -> Vec<CreateRecordRequest> {
        self.state.read().await.creates.clone()
    }

    pub async fn lookups(&self) -> usize {
        self.state.read().await.lookups
    }
}

#[async_trait]
impl ProviderClient for InMemoryProvider {
    fn id(&self) -> &'static str {
        "memory"
    }

    async fn find_records(
        &self,
        name: &str,
        record_type: DnsRecordType,
    ) -> ProviderResult<Vec<ProviderRecord>> {
        let mut state = self.state.write().await;
        state.lookups += 1;
        if let Some(err) = state
            .lookup_failures
            .get(&(name.to_string(), record_type))
        {
            return Err(err.clone());
        }
        Ok(state
            .records
            .iter()
            .filter(|r| {
                r.name.eq_ignore_ascii_case(name)
                    && r.record_type.eq_ignore_ascii_case(record_type.as_str())
            })
            .cloned()
            .collect())
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> ProviderResult<ProviderRecord> {
        let mut state = self.state.write().await;
        state.creates.push(req.clone());
        if let Some(err) = state.create_failures.get(&req.name) {
            return Err(err.clone());
        }
        let record = ProviderRecord {
            id: format!("rec-{}", state.records.len() + 1),
            name: req.name.clone(),
            record_type: req.data.record_type().as_str().to_string(),
            content: req.data.content().to_string(),
            ttl: req.ttl,
            priority: req.data.priority(),
            proxied: Some(req.proxied),
            created_at: Some(chrono::Utc::now()),
            updated_at: None,
        };
        state.records.push(record.clone());
        Ok(record)
    }
}

// ===== InMemorySourceRepository =====

enum Source {
    Text(String),
    Unreadable,
    /// The whole source directory is gone when this one is read.
    Vanished,
}

/// Sources returned in insertion order.
#[derive(Default)]
pub struct InMemorySourceRepository {
    sources: Vec<(String, Source)>,
    fail_enumeration: bool,
}

impl InMemorySourceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, subdomain: &str, text: &str) -> Self {
        self.sources
            .push((subdomain.to_string(), Source::Text(text.to_string())));
        self
    }

    pub fn with_unreadable(mut self, subdomain: &str) -> Self {
        self.sources.push((subdomain.to_string(), Source::Unreadable));
        self
    }

    pub fn with_vanished(mut self, subdomain: &str) -> Self {
        self.sources.push((subdomain.to_string(), Source::Vanished));
        self
    }

    pub fn failing_enumeration(mut self) -> Self {
        self.fail_enumeration = true;
        self
    }
}

#[async_trait]
impl SourceRepository for InMemorySourceRepository {
    async fn list_subdomains(&self) -> CoreResult<Vec<String>> {
        if self.fail_enumeration {
            return Err(CoreError::SourceEnumeration {
                path: PathBuf::from("records"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        Ok(self.sources.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn read(&self, subdomain: &str) -> CoreResult<String> {
        match self.sources.iter().find(|(name, _)| name == subdomain) {
            Some((_, Source::Text(text))) => Ok(text.clone()),
            Some((_, Source::Vanished)) => Err(CoreError::SourceEnumeration {
                path: PathBuf::from("records"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }),
            Some((_, Source::Unreadable)) => Err(CoreError::SourceRead {
                subdomain: subdomain.to_string(),
                detail: "stream did not contain valid UTF-8".to_string(),
            }),
            None => Err(CoreError::SourceRead {
                subdomain: subdomain.to_string(),
                detail: "not found".to_string(),
            }),
        }
    }
}
