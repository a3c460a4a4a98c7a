//! Profession and funnel listings

use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{model_to_funnel, model_to_profession};
use crate::errors::Result;
use crate::storage::criteria::{OrderClause, PageRequest};
use crate::storage::models::{FunnelRecord, ProfessionRecord};

use migration::entities::{funnel, profession};

impl SeaOrmStorage {
    pub async fn load_professions_page(
        &self,
        page: &PageRequest,
        order: &OrderClause,
    ) -> Result<(Vec<ProfessionRecord>, u64)> {
        let paginator = profession::Entity::find()
            .order_by(order.column.expr(), order.direction.into())
            .order_by_asc(profession::Column::ProfessionId)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        debug!(
            "load_professions_page: order={}, page={}, rows={}, total={}",
            order.to_sql(),
            page.page(),
            models.len(),
            total
        );

        Ok((models.into_iter().map(model_to_profession).collect(), total))
    }

    /// 漏斗分页，`profession_id` 为 Some 时只返回该职业下的漏斗
    pub async fn load_funnels_page(
        &self,
        page: &PageRequest,
        order: &OrderClause,
        profession_id: Option<i32>,
    ) -> Result<(Vec<FunnelRecord>, u64)> {
        let mut condition = Condition::all();
        if let Some(id) = profession_id {
            condition = condition.add(funnel::Column::ProfessionId.eq(id));
        }

        let paginator = funnel::Entity::find()
            .filter(condition)
            .order_by(order.column.expr(), order.direction.into())
            .order_by_asc(funnel::Column::FunnelId)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        debug!(
            "load_funnels_page: order={}, profession_id={:?}, page={}, rows={}, total={}",
            order.to_sql(),
            profession_id,
            page.page(),
            models.len(),
            total
        );

        Ok((models.into_iter().map(model_to_funnel).collect(), total))
    }

    pub async fn find_profession(&self, profession_id: i32) -> Result<Option<ProfessionRecord>> {
        let model = profession::Entity::find_by_id(profession_id)
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_profession))
    }
}
