//! User and session listing service

use std::sync::Arc;

use tracing::error;

use crate::errors::AppError;
use crate::storage::{
    DateRange, OrderClause, PageRequest, SeaOrmStorage, SessionRecord, UserRecord,
};

pub struct AudienceService {
    storage: Arc<SeaOrmStorage>,
}

impl AudienceService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_users(
        &self,
        page: &PageRequest,
        order: &OrderClause,
        is_client: Option<bool>,
    ) -> Result<(Vec<UserRecord>, u64), AppError> {
        self.storage
            .load_users_page(page, order, is_client)
            .await
            .map_err(|e| {
                error!("Failed to list users: {}", e);
                AppError::database_operation(format!("Failed to list users: {}", e.message()))
            })
    }

    pub async fn list_sessions(
        &self,
        page: &PageRequest,
        order: &OrderClause,
        range: Option<&DateRange>,
    ) -> Result<(Vec<SessionRecord>, u64), AppError> {
        self.storage
            .load_sessions_page(page, order, range)
            .await
            .map_err(|e| {
                error!("Failed to list sessions: {}", e);
                AppError::database_operation(format!("Failed to list sessions: {}", e.message()))
            })
    }

    pub async fn count_sessions(&self, range: Option<&DateRange>) -> Result<u64, AppError> {
        self.storage.count_sessions(range).await.map_err(|e| {
            error!("Failed to count sessions: {}", e);
            AppError::database_operation(format!("Failed to count sessions: {}", e.message()))
        })
    }
}
