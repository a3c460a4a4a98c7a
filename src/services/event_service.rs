//! Event listing service
//!
//! Thin orchestration between the HTTP handlers and the repository.

use std::sync::Arc;

use tracing::{error, info};

use crate::errors::AppError;
use crate::storage::{EventQuery, EventRecord, SeaOrmStorage};

/// One page of events plus the total matching row count.
#[derive(Debug, Clone)]
pub struct EventPage {
    pub events: Vec<EventRecord>,
    pub total: u64,
}

pub struct EventService {
    storage: Arc<SeaOrmStorage>,
}

impl EventService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// List events with pagination, filtering and validated ordering
    pub async fn list_events(&self, query: &EventQuery) -> Result<EventPage, AppError> {
        let (events, total) = self.storage.load_events_page(query).await.map_err(|e| {
            error!("Failed to list events: {}", e);
            AppError::database_operation(format!("Failed to list events: {}", e.message()))
        })?;

        info!(
            "Listed {} events (total {}, page {}, order {}, from {}, to {})",
            events.len(),
            total,
            query.page.page(),
            query.order.to_sql(),
            query.range.from,
            query.range.to
        );

        Ok(EventPage { events, total })
    }
}
