//! events 表迁移
//!
//! 事件是中心事实表，对其它五张表都是多对一关系。
//! 索引覆盖列表接口的三个过滤条件：event_time 范围、profession_id、funnel_id。

use sea_orm_migration::prelude::*;

use crate::m20250301_000001_reference_tables::{Funnels, Products, Professions, Sessions, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::EventId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::EventName).string().not_null())
                    .col(ColumnDef::new(Events::PageviewId).string_len(64).null())
                    .col(ColumnDef::new(Events::SessionId).string_len(64).null())
                    .col(
                        ColumnDef::new(Events::EventTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::UserId).string_len(64).null())
                    .col(ColumnDef::new(Events::ProfessionId).integer().null())
                    .col(ColumnDef::new(Events::ProductId).integer().null())
                    .col(ColumnDef::new(Events::FunnelId).integer().null())
                    .col(ColumnDef::new(Events::EventSource).string_len(100).null())
                    .col(ColumnDef::new(Events::EventType).string_len(100).null())
                    .col(ColumnDef::new(Events::EventProperties).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_user")
                            .from(Events::Table, Events::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_session")
                            .from(Events::Table, Events::SessionId)
                            .to(Sessions::Table, Sessions::SessionId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_profession")
                            .from(Events::Table, Events::ProfessionId)
                            .to(Professions::Table, Professions::ProfessionId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_product")
                            .from(Events::Table, Events::ProductId)
                            .to(Products::Table, Products::ProductId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_funnel")
                            .from(Events::Table, Events::FunnelId)
                            .to(Funnels::Table, Funnels::FunnelId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 时间范围查询 + 默认排序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_event_time")
                    .table(Events::Table)
                    .col(Events::EventTime)
                    .to_owned(),
            )
            .await?;

        // 按职业过滤后按时间排序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_profession_time")
                    .table(Events::Table)
                    .col(Events::ProfessionId)
                    .col(Events::EventTime)
                    .to_owned(),
            )
            .await?;

        // 按漏斗过滤后按时间排序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_events_funnel_time")
                    .table(Events::Table)
                    .col(Events::FunnelId)
                    .col(Events::EventTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_events_funnel_time").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_events_profession_time").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_events_event_time").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    EventId,
    EventName,
    PageviewId,
    SessionId,
    EventTime,
    UserId,
    ProfessionId,
    ProductId,
    FunnelId,
    EventSource,
    EventType,
    EventProperties,
}
