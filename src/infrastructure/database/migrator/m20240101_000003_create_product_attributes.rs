//! Create product_attributes join table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_products::Products;
use super::m20240101_000002_create_attributes::Attributes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductAttributes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductAttributes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductAttributes::ProductId).integer())
                    .col(ColumnDef::new(ProductAttributes::AttributeId).integer())
                    .col(
                        ColumnDef::new(ProductAttributes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductAttributes::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_attributes_product")
                            .from(ProductAttributes::Table, ProductAttributes::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_attributes_attribute")
                            .from(ProductAttributes::Table, ProductAttributes::AttributeId)
                            .to(Attributes::Table, Attributes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_attributes_product_id")
                    .table(ProductAttributes::Table)
                    .col(ProductAttributes::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductAttributes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ProductAttributes {
    Table,
    Id,
    ProductId,
    AttributeId,
    CreatedAt,
    ModifiedAt,
}
