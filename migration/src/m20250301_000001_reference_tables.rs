//! 参考数据表迁移
//!
//! 创建 events 依赖的五张表：
//! - sessions（营销归因 + 地理位置）
//! - users
//! - professions
//! - products
//! - funnels

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::SessionId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sessions::UtmSource).string().null())
                    .col(ColumnDef::new(Sessions::UtmMedium).string().null())
                    .col(ColumnDef::new(Sessions::UtmCampaign).string().null())
                    .col(ColumnDef::new(Sessions::UtmContent).string().null())
                    .col(ColumnDef::new(Sessions::UtmTerm).string().null())
                    .col(ColumnDef::new(Sessions::Country).string_len(100).null())
                    .col(ColumnDef::new(Sessions::State).string_len(100).null())
                    .col(ColumnDef::new(Sessions::City).string_len(100).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Fullname).string().null())
                    .col(ColumnDef::new(Users::Email).string().null())
                    .col(ColumnDef::new(Users::Phone).string_len(50).null())
                    .col(
                        ColumnDef::new(Users::IsClient)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Professions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Professions::ProfessionId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Professions::ProfessionName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Professions::MetaPixel).string().null())
                    .col(ColumnDef::new(Professions::MetaToken).text().null())
                    .col(
                        ColumnDef::new(Professions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::ProductId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::ProductName).string().not_null())
                    .col(ColumnDef::new(Products::ProfessionId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_profession")
                            .from(Products::Table, Products::ProfessionId)
                            .to(Professions::Table, Professions::ProfessionId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Funnels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Funnels::FunnelId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Funnels::FunnelName).string().not_null())
                    .col(ColumnDef::new(Funnels::FunnelTag).string().null())
                    .col(
                        ColumnDef::new(Funnels::Global)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Funnels::ProfessionId).integer().null())
                    .col(
                        ColumnDef::new(Funnels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_funnels_profession")
                            .from(Funnels::Table, Funnels::ProfessionId)
                            .to(Professions::Table, Professions::ProfessionId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 按职业列出漏斗
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_funnels_profession_id")
                    .table(Funnels::Table)
                    .col(Funnels::ProfessionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_funnels_profession_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Funnels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Professions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Sessions {
    Table,
    SessionId,
    UtmSource,
    UtmMedium,
    UtmCampaign,
    UtmContent,
    UtmTerm,
    Country,
    State,
    City,
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    UserId,
    Fullname,
    Email,
    Phone,
    IsClient,
}

#[derive(DeriveIden)]
pub(crate) enum Professions {
    Table,
    ProfessionId,
    ProfessionName,
    MetaPixel,
    MetaToken,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Products {
    Table,
    ProductId,
    ProductName,
    ProfessionId,
}

#[derive(DeriveIden)]
pub(crate) enum Funnels {
    Table,
    FunnelId,
    FunnelName,
    FunnelTag,
    Global,
    ProfessionId,
    CreatedAt,
}
