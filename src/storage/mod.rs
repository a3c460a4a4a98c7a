use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod criteria;
pub mod models;

pub use backend::SeaOrmStorage;
pub use criteria::{DateRange, EventQuery, OrderClause, PageRequest, SortColumn, SortDirection};
pub use models::{
    EventRecord, FunnelRecord, ProductRecord, ProfessionRecord, SessionRecord, StorageInfo,
    UserRecord,
};

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = SeaOrmStorage::new(database_url, &backend_type, &config.database).await?;
        Ok(Arc::new(storage))
    }
}
