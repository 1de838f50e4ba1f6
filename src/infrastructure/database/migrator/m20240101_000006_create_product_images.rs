//! Create product_images table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductImages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductImages::ProductId).integer().not_null())
                    .col(ColumnDef::new(ProductImages::Title).string_len(128).not_null())
                    .col(ColumnDef::new(ProductImages::AlternateText).string_len(128))
                    .col(ColumnDef::new(ProductImages::SortOrder).integer())
                    .col(ColumnDef::new(ProductImages::UrlTiny).string())
                    .col(ColumnDef::new(ProductImages::UrlThumbnail).string())
                    .col(ColumnDef::new(ProductImages::UrlStandard).string())
                    .col(ColumnDef::new(ProductImages::UrlZoom).string())
                    .col(ColumnDef::new(ProductImages::OtherDetails).json())
                    .col(
                        ColumnDef::new(ProductImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductImages::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_images_product")
                            .from(ProductImages::Table, ProductImages::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_images_product_id")
                    .table(ProductImages::Table)
                    .col(ProductImages::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductImages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ProductImages {
    Table,
    Id,
    ProductId,
    Title,
    AlternateText,
    SortOrder,
    UrlTiny,
    UrlThumbnail,
    UrlStandard,
    UrlZoom,
    OtherDetails,
    CreatedAt,
    ModifiedAt,
}
