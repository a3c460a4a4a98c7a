use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::services::{AudienceService, CatalogService, EventService};
use crate::storage::{SeaOrmStorage, StorageFactory};

#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub event_service: Arc<EventService>,
    pub catalog_service: Arc<CatalogService>,
    pub audience_service: Arc<AudienceService>,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub health_prefix: String,
}

impl StartupContext {
    /// 由已有的存储构建服务（集成测试也走这里）
    pub fn from_storage(storage: Arc<SeaOrmStorage>) -> Self {
        let config = crate::config::get_config();
        Self {
            event_service: Arc::new(EventService::new(storage.clone())),
            catalog_service: Arc::new(CatalogService::new(storage.clone())),
            audience_service: Arc::new(AudienceService::new(storage.clone())),
            storage,
            route_config: RouteConfig {
                health_prefix: config.api.health_prefix.clone(),
            },
        }
    }
}

/// 准备服务器启动的上下文：存储连接、迁移、服务实例和路由配置
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let context = StartupContext::from_storage(storage);

    info!(
        "Pre-startup processing completed in {:?}",
        start_time.elapsed()
    );
    Ok(context)
}
