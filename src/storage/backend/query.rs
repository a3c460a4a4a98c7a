//! Event queries for SeaOrmStorage
//!
//! One filtered, joined and paginated query on `events`, then one batched
//! `IN (...)` lookup per related table to hydrate the page.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Value,
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{
    model_to_event, model_to_funnel, model_to_product, model_to_profession, model_to_session,
    model_to_user,
};
use crate::errors::Result;
use crate::storage::criteria::EventQuery;
use crate::storage::models::EventRecord;

use migration::entities::{event, funnel, product, profession, session, user};

/// 按主键批量加载关联实体，空集合时不发起查询
pub(super) async fn load_by_ids<E, K>(
    db: &DatabaseConnection,
    column: E::Column,
    ids: BTreeSet<K>,
    key: fn(&E::Model) -> K,
) -> Result<HashMap<K, E::Model>>
where
    E: EntityTrait,
    K: Into<Value> + Eq + Hash + Ord + Clone,
{
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let models = E::find().filter(column.is_in(ids)).all(db).await?;
    Ok(models.into_iter().map(|m| (key(&m), m)).collect())
}

impl SeaOrmStorage {
    /// 加载一页事件及总数
    ///
    /// 时间范围两端都包含；排序列来自白名单，`events.event_id asc`
    /// 作为稳定的次级排序。
    pub async fn load_events_page(&self, query: &EventQuery) -> Result<(Vec<EventRecord>, u64)> {
        let mut condition = Condition::all()
            .add(event::Column::EventTime.gte(query.range.from))
            .add(event::Column::EventTime.lte(query.range.to));

        if let Some(profession_id) = query.profession_id {
            condition = condition.add(event::Column::ProfessionId.eq(profession_id));
        }

        if let Some(funnel_id) = query.funnel_id {
            condition = condition.add(event::Column::FunnelId.eq(funnel_id));
        }

        let select = event::Entity::find()
            .join(JoinType::LeftJoin, event::Relation::User.def())
            .join(JoinType::LeftJoin, event::Relation::Session.def())
            .join(JoinType::LeftJoin, event::Relation::Profession.def())
            .join(JoinType::LeftJoin, event::Relation::Product.def())
            .join(JoinType::LeftJoin, event::Relation::Funnel.def())
            .filter(condition)
            .order_by(query.order.column.expr(), query.order.direction.into())
            .order_by_asc(event::Column::EventId);

        let paginator = select.paginate(&self.db, query.page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(query.page.index()).await?;

        debug!(
            "load_events_page: order={}, page={}, limit={}, rows={}, total={}",
            query.order.to_sql(),
            query.page.page(),
            query.page.limit(),
            models.len(),
            total
        );

        let records = self.hydrate_events(models).await?;
        Ok((records, total))
    }

    async fn hydrate_events(&self, models: Vec<event::Model>) -> Result<Vec<EventRecord>> {
        let user_ids: BTreeSet<String> = models.iter().filter_map(|m| m.user_id.clone()).collect();
        let session_ids: BTreeSet<String> =
            models.iter().filter_map(|m| m.session_id.clone()).collect();
        let profession_ids: BTreeSet<i32> =
            models.iter().filter_map(|m| m.profession_id).collect();
        let product_ids: BTreeSet<i32> = models.iter().filter_map(|m| m.product_id).collect();
        let funnel_ids: BTreeSet<i32> = models.iter().filter_map(|m| m.funnel_id).collect();

        let users = load_by_ids::<user::Entity, _>(&self.db, user::Column::UserId, user_ids, |m| {
            m.user_id.clone()
        })
        .await?;
        let sessions = load_by_ids::<session::Entity, _>(
            &self.db,
            session::Column::SessionId,
            session_ids,
            |m| m.session_id.clone(),
        )
        .await?;
        let professions = load_by_ids::<profession::Entity, _>(
            &self.db,
            profession::Column::ProfessionId,
            profession_ids,
            |m| m.profession_id,
        )
        .await?;
        let products = load_by_ids::<product::Entity, _>(
            &self.db,
            product::Column::ProductId,
            product_ids,
            |m| m.product_id,
        )
        .await?;
        let funnels = load_by_ids::<funnel::Entity, _>(
            &self.db,
            funnel::Column::FunnelId,
            funnel_ids,
            |m| m.funnel_id,
        )
        .await?;

        // 外键悬空时关联对象为 None
        let records = models
            .into_iter()
            .map(|model| {
                let user = model
                    .user_id
                    .as_ref()
                    .and_then(|id| users.get(id))
                    .cloned()
                    .map(model_to_user);
                let session = model
                    .session_id
                    .as_ref()
                    .and_then(|id| sessions.get(id))
                    .cloned()
                    .map(model_to_session);
                let profession = model
                    .profession_id
                    .and_then(|id| professions.get(&id))
                    .cloned()
                    .map(model_to_profession);
                let product = model
                    .product_id
                    .and_then(|id| products.get(&id))
                    .cloned()
                    .map(model_to_product);
                let funnel = model
                    .funnel_id
                    .and_then(|id| funnels.get(&id))
                    .cloned()
                    .map(model_to_funnel);

                EventRecord {
                    user,
                    session,
                    profession,
                    product,
                    funnel,
                    ..model_to_event(model)
                }
            })
            .collect();

        Ok(records)
    }
}
