//! In-memory product storage

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, NewProduct, Product, ProductChanges, ProductDetails, ProductFilter,
    ProductRepository, RepositoryProvider,
};
use crate::shared::pagination::PageRequest;

/// In-memory product repository for development and testing
pub struct InMemoryProductRepository {
    products: DashMap<i32, ProductDetails>,
    categories: DashMap<i32, Vec<i32>>,
    product_counter: AtomicI32,
    child_counter: AtomicI32,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            categories: DashMap::new(),
            product_counter: AtomicI32::new(1),
            child_counter: AtomicI32::new(1),
        }
    }

    /// Store a fully hydrated product as-is.
    ///
    /// A zero product id is replaced with the next free id; child records
    /// are re-pointed at the product and zero child ids are assigned.
    pub fn seed(&self, mut details: ProductDetails) -> ProductDetails {
        if details.product.id == 0 {
            details.product.id = self.product_counter.fetch_add(1, Ordering::SeqCst);
        } else {
            self.product_counter
                .fetch_max(details.product.id + 1, Ordering::SeqCst);
        }
        let id = details.product.id;

        for review in &mut details.reviews {
            review.product_id = id;
            if review.id == 0 {
                review.id = self.next_child_id();
            }
        }
        for image in &mut details.images {
            image.product_id = id;
            if image.id == 0 {
                image.id = self.next_child_id();
            }
        }
        if let Some(pricing) = details.pricing.as_mut() {
            pricing.product_id = id;
            if pricing.id == 0 {
                pricing.id = self.next_child_id();
            }
        }

        self.products.insert(id, details.clone());
        details
    }

    pub fn link_category(&self, product_id: i32, category_id: i32) {
        self.categories.entry(product_id).or_default().push(category_id);
    }

    fn next_child_id(&self) -> i32 {
        self.child_counter.fetch_add(1, Ordering::SeqCst)
    }

    fn matches(&self, details: &ProductDetails, filter: &ProductFilter) -> bool {
        if let Some(active) = filter.active {
            if details.product.active != active {
                return false;
            }
        }
        if let Some(category_id) = filter.category_id {
            let linked = self
                .categories
                .get(&details.product.id)
                .map(|ids| ids.contains(&category_id))
                .unwrap_or(false);
            if !linked {
                return false;
            }
        }
        true
    }

    fn filtered(&self, filter: &ProductFilter) -> Vec<ProductDetails> {
        let mut items: Vec<ProductDetails> = self
            .products
            .iter()
            .filter(|entry| self.matches(entry.value(), filter))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|d| d.product.id);
        items
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn count(&self, filter: &ProductFilter) -> DomainResult<u64> {
        Ok(self.filtered(filter).len() as u64)
    }

    async fn find_page(
        &self,
        filter: &ProductFilter,
        request: PageRequest,
    ) -> DomainResult<Vec<ProductDetails>> {
        let items = self.filtered(filter);
        Ok(request.slice(&items).to_vec())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ProductDetails>> {
        Ok(self.products.get(&id).map(|d| d.value().clone()))
    }

    async fn sku_exists(&self, sku: &str, exclude_id: Option<i32>) -> DomainResult<bool> {
        Ok(self.products.iter().any(|entry| {
            Some(entry.product.id) != exclude_id && entry.product.sku.as_deref() == Some(sku)
        }))
    }

    async fn create(&self, p: NewProduct) -> DomainResult<ProductDetails> {
        let now = Utc::now();
        let product = Product {
            id: 0,
            product_master_id: p.product_master_id,
            name: p.name,
            sku: p.sku,
            product_type: p.product_type,
            active: p.active,
            stock_available: p.stock_available,
            is_featured: p.is_featured,
            on_offer: p.on_offer,
            on_subscription: p.on_subscription,
            on_promotion: p.on_promotion,
            has_variant: p.has_variant,
            short_description: p.short_description,
            description: p.description,
            reviews_rating_sum: p.reviews_rating_sum,
            reviews_count: p.reviews_count,
            tags: p.tags,
            created_at: now,
            modified_at: now,
        };
        Ok(self.seed(ProductDetails::bare(product)))
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> DomainResult<ProductDetails> {
        let mut entry = self
            .products
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Product", id))?;
        changes.apply(&mut entry.product);
        entry.product.modified_at = Utc::now();
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        if self.products.remove(&id).is_none() {
            return Err(DomainError::not_found("Product", id));
        }
        self.categories.remove(&id);
        Ok(())
    }
}

/// [`RepositoryProvider`] backed by in-memory repositories.
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    products: InMemoryProductRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct access for seeding related records.
    pub fn product_store(&self) -> &InMemoryProductRepository {
        &self.products
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }
}
