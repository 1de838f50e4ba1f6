//! Create product_pricing table (one row per product)

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
                    .table(ProductPricing::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductPricing::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProductPricing::ProductId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ProductPricing::CustomerGroupId)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductPricing::SellingPrice)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductPricing::MinOrderQuantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductPricing::MaxOrderQuantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductPricing::IncrementalQuantity)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductPricing::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductPricing::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_pricing_product")
                            .from(ProductPricing::Table, ProductPricing::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductPricing::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ProductPricing {
    Table,
    Id,
    ProductId,
    CustomerGroupId,
    SellingPrice,
    MinOrderQuantity,
    MaxOrderQuantity,
    IncrementalQuantity,
    CreatedAt,
    ModifiedAt,
}
