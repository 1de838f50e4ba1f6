//! Create product_reviews table

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
                    .table(ProductReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductReviews::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductReviews::ProductId).integer().not_null())
                    .col(ColumnDef::new(ProductReviews::Rating).double())
                    .col(ColumnDef::new(ProductReviews::ReviewText).text())
                    .col(ColumnDef::new(ProductReviews::Name).string_len(128).not_null())
                    .col(ColumnDef::new(ProductReviews::Email).string_len(128))
                    .col(ColumnDef::new(ProductReviews::Status).string_len(128))
                    .col(
                        ColumnDef::new(ProductReviews::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(ProductReviews::Tags).json())
                    .col(ColumnDef::new(ProductReviews::Images).json())
                    .col(ColumnDef::new(ProductReviews::Videos).json())
                    .col(ColumnDef::new(ProductReviews::ReviewDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ProductReviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductReviews::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_reviews_product")
                            .from(ProductReviews::Table, ProductReviews::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_reviews_product_id")
                    .table(ProductReviews::Table)
                    .col(ProductReviews::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductReviews::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ProductReviews {
    Table,
    Id,
    ProductId,
    Rating,
    ReviewText,
    Name,
    Email,
    Status,
    IsFeatured,
    Tags,
    Images,
    Videos,
    ReviewDate,
    CreatedAt,
    ModifiedAt,
}
