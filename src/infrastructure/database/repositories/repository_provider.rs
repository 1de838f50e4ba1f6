//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{ProductRepository, RepositoryProvider};

use super::product_repository::SeaOrmProductRepository;

/// Unified repository provider backed by SeaORM.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let product = repos.products().find_by_id(42).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    products: SeaOrmProductRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            products: SeaOrmProductRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }
}
