//! Create attributes table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attributes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attributes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attributes::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Attributes::Type).string_len(64))
                    .col(
                        ColumnDef::new(Attributes::DefaultValue)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attributes::IsVisible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Attributes::IsFilterable)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Attributes::IsRequired)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Attributes::IsLocalized)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Attributes::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Attributes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attributes::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attributes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Attributes {
    Table,
    Id,
    Name,
    Type,
    DefaultValue,
    IsVisible,
    IsFilterable,
    IsRequired,
    IsLocalized,
    Active,
    CreatedAt,
    ModifiedAt,
}
