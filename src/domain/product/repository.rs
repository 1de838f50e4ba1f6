//! Product repository interface

use async_trait::async_trait;

use super::model::{NewProduct, ProductChanges, ProductDetails, ProductFilter};
use crate::domain::DomainResult;
use crate::shared::pagination::PageRequest;

/// Storage for products and their relations.
///
/// Listings are ordered by ascending id. Every returned [`ProductDetails`]
/// is fully hydrated; implementations batch-load relations per page
/// instead of querying per product.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn count(&self, filter: &ProductFilter) -> DomainResult<u64>;
    async fn find_page(
        &self,
        filter: &ProductFilter,
        request: PageRequest,
    ) -> DomainResult<Vec<ProductDetails>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ProductDetails>>;
    /// Whether another product already uses `sku`.
    async fn sku_exists(&self, sku: &str, exclude_id: Option<i32>) -> DomainResult<bool>;
    async fn create(&self, product: NewProduct) -> DomainResult<ProductDetails>;
    async fn update(&self, id: i32, changes: ProductChanges) -> DomainResult<ProductDetails>;
    /// Removes the product with its reviews, images, pricing and join rows.
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
