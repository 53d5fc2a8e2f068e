//! Core intake tables
//!
//! clients -> competitors, clients -> queries -> reports, all with
//! `ON DELETE CASCADE` so removing a client removes everything it owns.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Clients::Website).string_len(500).not_null())
                    .col(
                        ColumnDef::new(Clients::SocialHandles)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Clients::ContactName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Clients::ContactEmail)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Clients::SubscriptionTier)
                            .string_len(50)
                            .not_null()
                            .default("trial"),
                    )
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clients_created_at")
                    .table(Clients::Table)
                    .col(Clients::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Competitors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Competitors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Competitors::ClientId).integer().not_null())
                    .col(
                        ColumnDef::new(Competitors::Name)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Competitors::Website)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Competitors::SocialHandles)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Competitors::YoutubeUrl)
                            .string_len(500)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Competitors::VimeoUrl)
                            .string_len(500)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Competitors::ReviewPageUrl)
                            .string_len(500)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Competitors::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_competitors_client_id")
                            .from(Competitors::Table, Competitors::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_competitors_client_id")
                    .table(Competitors::Table)
                    .col(Competitors::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Queries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Queries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Queries::ClientId).integer().not_null())
                    .col(
                        ColumnDef::new(Queries::Keywords)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Queries::Countries)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Queries::PeriodStart).date().null())
                    .col(ColumnDef::new(Queries::PeriodEnd).date().null())
                    .col(
                        ColumnDef::new(Queries::Frequency)
                            .string_len(50)
                            .not_null()
                            .default("monthly"),
                    )
                    .col(
                        ColumnDef::new(Queries::AutoRun)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Queries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_queries_client_id")
                            .from(Queries::Table, Queries::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_queries_client_id")
                    .table(Queries::Table)
                    .col(Queries::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reports::QueryId).integer().not_null())
                    .col(
                        ColumnDef::new(Reports::Status)
                            .string_len(50)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Reports::Data).text().not_null().default("{}"))
                    .col(
                        ColumnDef::new(Reports::GeneratedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Reports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_query_id")
                            .from(Reports::Table, Reports::QueryId)
                            .to(Queries::Table, Queries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reports_query_id")
                    .table(Reports::Table)
                    .col(Reports::QueryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Queries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Competitors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    Name,
    Website,
    SocialHandles,
    ContactName,
    ContactEmail,
    SubscriptionTier,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Competitors {
    Table,
    Id,
    ClientId,
    Name,
    Website,
    SocialHandles,
    YoutubeUrl,
    VimeoUrl,
    ReviewPageUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Queries {
    Table,
    Id,
    ClientId,
    Keywords,
    Countries,
    PeriodStart,
    PeriodEnd,
    Frequency,
    AutoRun,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Reports {
    Table,
    Id,
    QueryId,
    Status,
    Data,
    GeneratedAt,
    CreatedAt,
}
