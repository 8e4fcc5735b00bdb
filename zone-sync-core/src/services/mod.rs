//! 业务逻辑服务层

mod reconciler;
mod sync_service;

pub use reconciler::Reconciler;
pub use sync_service::SyncService;

use std::sync::Arc;

use zone_sync_provider::ProviderClient;

use crate::config::SyncConfig;
use crate::traits::SourceRepository;

/// 服务上下文 - 持有所有依赖
///
/// 调用方负责创建 provider 与 source repository 并注入。
pub struct ServiceContext {
    /// DNS provider of the managed zone
    pub provider: Arc<dyn ProviderClient>,
    /// Record sources
    pub source_repository: Arc<dyn SourceRepository>,
    /// Run settings
    pub config: SyncConfig,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        provider: Arc<dyn ProviderClient>,
        source_repository: Arc<dyn SourceRepository>,
        config: SyncConfig,
    ) -> Self {
        Self {
            provider,
            source_repository,
            config,
        }
    }
}
