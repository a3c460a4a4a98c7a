//! Profession and funnel catalog service

use std::sync::Arc;

use tracing::{debug, error};

use crate::errors::AppError;
use crate::storage::{FunnelRecord, OrderClause, PageRequest, ProfessionRecord, SeaOrmStorage};

pub struct CatalogService {
    storage: Arc<SeaOrmStorage>,
}

impl CatalogService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_professions(
        &self,
        page: &PageRequest,
        order: &OrderClause,
    ) -> Result<(Vec<ProfessionRecord>, u64), AppError> {
        self.storage
            .load_professions_page(page, order)
            .await
            .map_err(|e| {
                error!("Failed to list professions: {}", e);
                AppError::database_operation(format!(
                    "Failed to list professions: {}",
                    e.message()
                ))
            })
    }

    pub async fn list_funnels(
        &self,
        page: &PageRequest,
        order: &OrderClause,
        profession_id: Option<i32>,
    ) -> Result<(Vec<FunnelRecord>, u64), AppError> {
        self.storage
            .load_funnels_page(page, order, profession_id)
            .await
            .map_err(|e| {
                error!("Failed to list funnels: {}", e);
                AppError::database_operation(format!("Failed to list funnels: {}", e.message()))
            })
    }

    /// Funnels of one profession; `NotFound` when the profession doesn't exist.
    pub async fn list_profession_funnels(
        &self,
        profession_id: i32,
        page: &PageRequest,
        order: &OrderClause,
    ) -> Result<(Vec<FunnelRecord>, u64), AppError> {
        let profession = self.storage.find_profession(profession_id).await.map_err(|e| {
            error!("Failed to load profession {}: {}", profession_id, e);
            AppError::database_operation(format!("Failed to load profession: {}", e.message()))
        })?;

        if profession.is_none() {
            debug!("Profession {} not found", profession_id);
            return Err(AppError::not_found("Profession not found"));
        }

        self.list_funnels(page, order, Some(profession_id)).await
    }
}
