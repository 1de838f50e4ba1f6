//! Product catalog business logic service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::{
    DomainResult, NewProduct, ProductChanges, ProductDetails, ProductFilter, ProductRepository,
    RepositoryProvider,
};
use crate::shared::errors::DomainError;
use crate::shared::pagination::{Page, PageRequest, PageSource, Paginator};

pub const DUPLICATE_SKU_MESSAGE: &str = "SKU must be unique";

/// Filtered product listing seen as a count-and-slice source.
struct FilteredProducts<'a> {
    repo: &'a dyn ProductRepository,
    filter: &'a ProductFilter,
}

#[async_trait]
impl<'a> PageSource for FilteredProducts<'a> {
    type Item = ProductDetails;

    async fn count(&self) -> DomainResult<u64> {
        self.repo.count(self.filter).await
    }

    async fn fetch(&self, request: PageRequest) -> DomainResult<Vec<ProductDetails>> {
        self.repo.find_page(self.filter, request).await
    }
}

/// Service for product catalog operations
pub struct ProductService {
    repos: Arc<dyn RepositoryProvider>,
    paginator: Paginator,
}

impl ProductService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, paginator: Paginator) -> Self {
        Self { repos, paginator }
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub async fn list(
        &self,
        filter: &ProductFilter,
        request: PageRequest,
    ) -> DomainResult<Page<ProductDetails>> {
        let source = FilteredProducts {
            repo: self.repos.products(),
            filter,
        };
        let page = self.paginator.fetch_page(&source, request).await?;
        debug!(
            total = page.metadata.total_records,
            returned = page.items.len(),
            limit = request.limit(),
            offset = request.offset(),
            "Listed products"
        );
        Ok(page)
    }

    pub async fn get(&self, id: i32) -> DomainResult<Option<ProductDetails>> {
        self.repos.products().find_by_id(id).await
    }

    pub async fn create(&self, mut product: NewProduct) -> DomainResult<ProductDetails> {
        product.sku = normalize_sku(product.sku);
        if let Some(sku) = &product.sku {
            self.ensure_sku_available(sku, None).await?;
        }

        let created = self.repos.products().create(product).await?;
        info!(id = created.product.id, "Product created: {}", created.product.name);
        Ok(created)
    }

    pub async fn update(&self, id: i32, mut changes: ProductChanges) -> DomainResult<ProductDetails> {
        if self.repos.products().find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("Product", id));
        }

        changes.sku = changes.sku.map(normalize_sku);
        if let Some(Some(sku)) = &changes.sku {
            self.ensure_sku_available(sku, Some(id)).await?;
        }

        let updated = self.repos.products().update(id, changes).await?;
        info!(id, "Product updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.products().delete(id).await?;
        info!(id, "Product deleted");
        Ok(())
    }

    async fn ensure_sku_available(&self, sku: &str, exclude_id: Option<i32>) -> DomainResult<()> {
        if self.repos.products().sku_exists(sku, exclude_id).await? {
            warn!(sku, "Rejected duplicate SKU");
            return Err(DomainError::Validation(DUPLICATE_SKU_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Blank SKUs are stored as absent.
fn normalize_sku(sku: Option<String>) -> Option<String> {
    sku.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn service() -> (ProductService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let service = ProductService::new(repos.clone(), Paginator::default());
        (service, repos)
    }

    fn with_sku(name: &str, sku: &str) -> NewProduct {
        NewProduct {
            sku: Some(sku.to_string()),
            ..NewProduct::named(name)
        }
    }

    #[tokio::test]
    async fn list_pages_in_id_order() {
        let (service, _) = service();
        for i in 0..25 {
            service.create(NewProduct::named(format!("P{i}"))).await.unwrap();
        }

        let request = service.paginator().request(Some(10), Some(20));
        let page = service.list(&ProductFilter::all(), request).await.unwrap();

        let names: Vec<_> = page.items.iter().map(|d| d.product.name.as_str()).collect();
        assert_eq!(names, ["P20", "P21", "P22", "P23", "P24"]);
        assert_eq!(page.metadata.total_pages, 3);
        assert_eq!(page.metadata.previous_page, Some(2));
        assert_eq!(page.metadata.next_page, None);
    }

    #[tokio::test]
    async fn active_only_filter_excludes_inactive() {
        let (service, _) = service();
        service.create(NewProduct::named("on")).await.unwrap();
        service
            .create(NewProduct {
                active: false,
                ..NewProduct::named("off")
            })
            .await
            .unwrap();

        let request = service.paginator().request(None, None);
        let page = service.list(&ProductFilter::active_only(), request).await.unwrap();
        assert_eq!(page.metadata.total_records, 1);
        assert_eq!(page.items[0].product.name, "on");
    }

    #[tokio::test]
    async fn duplicate_sku_is_rejected_before_write() {
        let (service, _) = service();
        service.create(with_sku("A", "SKU-1")).await.unwrap();

        let err = service.create(with_sku("B", " SKU-1 ")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref m) if m == DUPLICATE_SKU_MESSAGE));

        let request = service.paginator().request(None, None);
        let page = service.list(&ProductFilter::all(), request).await.unwrap();
        assert_eq!(page.metadata.total_records, 1);
    }

    #[tokio::test]
    async fn update_may_keep_its_own_sku() {
        let (service, _) = service();
        let a = service.create(with_sku("A", "SKU-1")).await.unwrap();
        service.create(with_sku("B", "SKU-2")).await.unwrap();

        let same = ProductChanges {
            sku: Some(Some("SKU-1".into())),
            name: Some("A2".into()),
            ..Default::default()
        };
        let updated = service.update(a.product.id, same).await.unwrap();
        assert_eq!(updated.product.name, "A2");

        let taken = ProductChanges {
            sku: Some(Some("SKU-2".into())),
            ..Default::default()
        };
        assert!(matches!(
            service.update(a.product.id, taken).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn blank_sku_is_stored_as_absent() {
        let (service, _) = service();
        let first = service.create(with_sku("A", "   ")).await.unwrap();
        let second = service.create(with_sku("B", "")).await.unwrap();
        assert_eq!(first.product.sku, None);
        assert_eq!(second.product.sku, None);
    }

    #[tokio::test]
    async fn blank_sku_on_update_clears_it() {
        let (service, _) = service();
        let a = service.create(with_sku("A", "SKU-1")).await.unwrap();

        let cleared = ProductChanges {
            sku: Some(Some(" ".into())),
            ..Default::default()
        };
        let updated = service.update(a.product.id, cleared).await.unwrap();
        assert_eq!(updated.product.sku, None);

        // freed SKU is available again
        service.create(with_sku("B", "SKU-1")).await.unwrap();
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids_are_not_found() {
        let (service, _) = service();
        assert!(matches!(
            service.update(99, ProductChanges::default()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete(99).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(service.get(99).await.unwrap().is_none());
    }
}
