//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_products;
mod m20240101_000002_create_attributes;
mod m20240101_000003_create_product_attributes;
mod m20240101_000004_create_categories;
mod m20240101_000005_create_product_categories;
mod m20240101_000006_create_product_images;
mod m20240101_000007_create_product_pricing;
mod m20240101_000008_create_product_reviews;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_products::Migration),
            Box::new(m20240101_000002_create_attributes::Migration),
            Box::new(m20240101_000003_create_product_attributes::Migration),
            Box::new(m20240101_000004_create_categories::Migration),
            Box::new(m20240101_000005_create_product_categories::Migration),
            Box::new(m20240101_000006_create_product_images::Migration),
            Box::new(m20240101_000007_create_product_pricing::Migration),
            Box::new(m20240101_000008_create_product_reviews::Migration),
        ]
    }
}
