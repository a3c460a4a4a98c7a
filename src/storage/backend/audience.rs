//! User and session listings

use sea_orm::sea_query::SelectStatement;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    QueryTrait,
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{model_to_session, model_to_user};
use crate::errors::Result;
use crate::storage::criteria::{DateRange, OrderClause, PageRequest};
use crate::storage::models::{SessionRecord, UserRecord};

use migration::entities::{event, session, user};

/// 窗口内至少有一条事件的会话 ID
fn sessions_active_in(range: &DateRange) -> SelectStatement {
    event::Entity::find()
        .select_only()
        .column(event::Column::SessionId)
        .filter(event::Column::SessionId.is_not_null())
        .filter(event::Column::EventTime.gte(range.from))
        .filter(event::Column::EventTime.lte(range.to))
        .into_query()
}

fn session_condition(range: Option<&DateRange>) -> Condition {
    let mut condition = Condition::all();
    if let Some(range) = range {
        condition =
            condition.add(session::Column::SessionId.in_subquery(sessions_active_in(range)));
    }
    condition
}

impl SeaOrmStorage {
    /// 用户分页，`is_client` 为 Some 时按客户标记过滤
    pub async fn load_users_page(
        &self,
        page: &PageRequest,
        order: &OrderClause,
        is_client: Option<bool>,
    ) -> Result<(Vec<UserRecord>, u64)> {
        let mut condition = Condition::all();
        if let Some(flag) = is_client {
            condition = condition.add(user::Column::IsClient.eq(flag));
        }

        let paginator = user::Entity::find()
            .filter(condition)
            .order_by(order.column.expr(), order.direction.into())
            .order_by_asc(user::Column::UserId)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        debug!(
            "load_users_page: order={}, is_client={:?}, page={}, rows={}, total={}",
            order.to_sql(),
            is_client,
            page.page(),
            models.len(),
            total
        );

        Ok((models.into_iter().map(model_to_user).collect(), total))
    }

    /// 会话分页；给定时间窗口时只返回窗口内有事件的会话
    pub async fn load_sessions_page(
        &self,
        page: &PageRequest,
        order: &OrderClause,
        range: Option<&DateRange>,
    ) -> Result<(Vec<SessionRecord>, u64)> {
        let paginator = session::Entity::find()
            .filter(session_condition(range))
            .order_by(order.column.expr(), order.direction.into())
            .order_by_asc(session::Column::SessionId)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()).await?;

        debug!(
            "load_sessions_page: order={}, range={:?}, page={}, rows={}, total={}",
            order.to_sql(),
            range,
            page.page(),
            models.len(),
            total
        );

        Ok((models.into_iter().map(model_to_session).collect(), total))
    }

    pub async fn count_sessions(&self, range: Option<&DateRange>) -> Result<u64> {
        let total = session::Entity::find()
            .filter(session_condition(range))
            .count(&self.db)
            .await?;
        debug!("count_sessions: range={:?}, total={}", range, total);
        Ok(total)
    }
}
