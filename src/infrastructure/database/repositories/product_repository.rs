//! SeaORM implementation of ProductRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
    TransactionTrait,
};
use tracing::{debug, info};

use crate::domain::{
    Attribute, DomainError, DomainResult, NewProduct, Product, ProductChanges, ProductDetails,
    ProductFilter, ProductImage, ProductPricing, ProductRepository, ProductReview, ProductType,
};
use crate::infrastructure::database::entities::{
    attribute, product, product_attribute, product_category, product_image, product_pricing,
    product_review,
};
use crate::shared::pagination::PageRequest;

// ── Conversion helpers ──────────────────────────────────────────

fn type_to_domain(t: product::ProductType) -> ProductType {
    match t {
        product::ProductType::Physical => ProductType::Physical,
        product::ProductType::Digital => ProductType::Digital,
    }
}

fn type_to_entity(t: ProductType) -> product::ProductType {
    match t {
        ProductType::Physical => product::ProductType::Physical,
        ProductType::Digital => product::ProductType::Digital,
    }
}

fn product_to_domain(m: product::Model) -> Product {
    Product {
        id: m.id,
        product_master_id: m.product_master_id,
        name: m.name,
        sku: m.sku,
        product_type: m.product_type.map(type_to_domain),
        active: m.active,
        stock_available: m.stock_available,
        is_featured: m.is_featured,
        on_offer: m.on_offer,
        on_subscription: m.on_subscription,
        on_promotion: m.on_promotion,
        has_variant: m.has_variant,
        short_description: m.short_description,
        description: m.description,
        reviews_rating_sum: m.reviews_rating_sum,
        reviews_count: m.reviews_count,
        tags: m.tags,
        created_at: m.created_at,
        modified_at: m.modified_at,
    }
}

fn review_to_domain(m: product_review::Model) -> ProductReview {
    ProductReview {
        id: m.id,
        product_id: m.product_id,
        rating: m.rating,
        review_text: m.review_text,
        name: m.name,
        email: m.email,
        status: m.status,
        is_featured: m.is_featured,
        tags: m.tags,
        images: m.images,
        videos: m.videos,
        review_date: m.review_date,
    }
}

fn image_to_domain(m: product_image::Model) -> ProductImage {
    ProductImage {
        id: m.id,
        product_id: m.product_id,
        title: m.title,
        alternate_text: m.alternate_text,
        sort_order: m.sort_order,
        url_tiny: m.url_tiny,
        url_thumbnail: m.url_thumbnail,
        url_standard: m.url_standard,
        url_zoom: m.url_zoom,
        other_details: m.other_details,
    }
}

fn pricing_to_domain(m: product_pricing::Model) -> ProductPricing {
    ProductPricing {
        id: m.id,
        product_id: m.product_id,
        customer_group_id: m.customer_group_id,
        selling_price: m.selling_price,
        min_order_quantity: m.min_order_quantity,
        max_order_quantity: m.max_order_quantity,
        incremental_quantity: m.incremental_quantity,
    }
}

fn attribute_to_domain(m: attribute::Model) -> Attribute {
    Attribute {
        id: m.id,
        name: m.name,
        attribute_type: m.attribute_type,
        default_value: m.default_value,
        is_visible: m.is_visible,
        is_filterable: m.is_filterable,
        is_required: m.is_required,
        is_localized: m.is_localized,
        active: m.active,
    }
}

/// Map a unique index violation on write to a conflict. Covers two writers
/// racing past the service-level SKU check.
fn write_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict("Product with this SKU already exists".to_string())
        }
        _ => e.into(),
    }
}

fn filter_condition(filter: &ProductFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(active) = filter.active {
        cond = cond.add(product::Column::Active.eq(active));
    }
    if let Some(category_id) = filter.category_id {
        cond = cond.add(
            product::Column::Id.in_subquery(
                Query::select()
                    .column(product_category::Column::ProductId)
                    .from(product_category::Entity)
                    .and_where(product_category::Column::CategoryId.eq(category_id))
                    .to_owned(),
            ),
        );
    }
    cond
}

/// Load reviews, images, pricing and attributes for a batch of products.
///
/// Issues one query per relation regardless of batch size. Output order
/// follows `models`.
async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    models: Vec<product::Model>,
) -> DomainResult<Vec<ProductDetails>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

    let mut reviews: HashMap<i32, Vec<ProductReview>> = HashMap::new();
    for r in product_review::Entity::find()
        .filter(product_review::Column::ProductId.is_in(ids.clone()))
        .order_by_asc(product_review::Column::Id)
        .all(conn)
        .await?
    {
        reviews.entry(r.product_id).or_default().push(review_to_domain(r));
    }

    let mut images: HashMap<i32, Vec<ProductImage>> = HashMap::new();
    for i in product_image::Entity::find()
        .filter(product_image::Column::ProductId.is_in(ids.clone()))
        .order_by_asc(product_image::Column::SortOrder)
        .order_by_asc(product_image::Column::Id)
        .all(conn)
        .await?
    {
        images.entry(i.product_id).or_default().push(image_to_domain(i));
    }

    let mut pricing: HashMap<i32, ProductPricing> = product_pricing::Entity::find()
        .filter(product_pricing::Column::ProductId.is_in(ids.clone()))
        .all(conn)
        .await?
        .into_iter()
        .map(|p| (p.product_id, pricing_to_domain(p)))
        .collect();

    let links = product_attribute::Entity::find()
        .filter(product_attribute::Column::ProductId.is_in(ids.clone()))
        .order_by_asc(product_attribute::Column::AttributeId)
        .all(conn)
        .await?;
    let attribute_ids: Vec<i32> = links.iter().filter_map(|l| l.attribute_id).collect();
    let known: HashMap<i32, Attribute> = if attribute_ids.is_empty() {
        HashMap::new()
    } else {
        attribute::Entity::find()
            .filter(attribute::Column::Id.is_in(attribute_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|a| (a.id, attribute_to_domain(a)))
            .collect()
    };
    let mut attributes: HashMap<i32, Vec<Attribute>> = HashMap::new();
    for link in links {
        if let (Some(product_id), Some(attr)) =
            (link.product_id, link.attribute_id.and_then(|id| known.get(&id)))
        {
            attributes.entry(product_id).or_default().push(attr.clone());
        }
    }
    // a product linked twice to one attribute still lists it once
    for list in attributes.values_mut() {
        list.dedup_by_key(|a| a.id);
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let id = m.id;
            ProductDetails {
                product: product_to_domain(m),
                reviews: reviews.remove(&id).unwrap_or_default(),
                images: images.remove(&id).unwrap_or_default(),
                pricing: pricing.remove(&id),
                attributes: attributes.remove(&id).unwrap_or_default(),
            }
        })
        .collect())
}

// ── SeaOrmProductRepository ─────────────────────────────────────

pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, id: i32) -> DomainResult<Option<ProductDetails>> {
        let Some(model) = product::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(hydrate(&self.db, vec![model]).await?.pop())
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn count(&self, filter: &ProductFilter) -> DomainResult<u64> {
        let total = product::Entity::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await?;
        Ok(total)
    }

    async fn find_page(
        &self,
        filter: &ProductFilter,
        request: PageRequest,
    ) -> DomainResult<Vec<ProductDetails>> {
        let models = product::Entity::find()
            .filter(filter_condition(filter))
            .order_by_asc(product::Column::Id)
            .offset(request.offset())
            .limit(request.limit())
            .all(&self.db)
            .await?;
        debug!(rows = models.len(), "Fetched product page");
        hydrate(&self.db, models).await
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ProductDetails>> {
        self.load(id).await
    }

    async fn sku_exists(&self, sku: &str, exclude_id: Option<i32>) -> DomainResult<bool> {
        let mut query = product::Entity::find().filter(product::Column::Sku.eq(sku));
        if let Some(id) = exclude_id {
            query = query.filter(product::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn create(&self, p: NewProduct) -> DomainResult<ProductDetails> {
        let now = Utc::now();
        let model = product::ActiveModel {
            product_master_id: Set(p.product_master_id),
            name: Set(p.name),
            sku: Set(p.sku),
            product_type: Set(p.product_type.map(type_to_entity)),
            active: Set(p.active),
            stock_available: Set(p.stock_available),
            is_featured: Set(p.is_featured),
            on_offer: Set(p.on_offer),
            on_subscription: Set(p.on_subscription),
            on_promotion: Set(p.on_promotion),
            has_variant: Set(p.has_variant),
            short_description: Set(p.short_description),
            description: Set(p.description),
            reviews_rating_sum: Set(p.reviews_rating_sum),
            reviews_count: Set(p.reviews_count),
            tags: Set(p.tags),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(write_err)?;
        info!("Product saved: {} ({})", result.name, result.id);
        Ok(ProductDetails::bare(product_to_domain(result)))
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> DomainResult<ProductDetails> {
        let Some(existing) = product::Entity::find_by_id(id).one(&self.db).await? else {
            return Err(DomainError::not_found("Product", id));
        };

        let mut p = product_to_domain(existing);
        changes.apply(&mut p);

        let model = product::ActiveModel {
            id: Set(p.id),
            product_master_id: Set(p.product_master_id),
            name: Set(p.name),
            sku: Set(p.sku),
            product_type: Set(p.product_type.map(type_to_entity)),
            active: Set(p.active),
            stock_available: Set(p.stock_available),
            is_featured: Set(p.is_featured),
            on_offer: Set(p.on_offer),
            on_subscription: Set(p.on_subscription),
            on_promotion: Set(p.on_promotion),
            has_variant: Set(p.has_variant),
            short_description: Set(p.short_description),
            description: Set(p.description),
            reviews_rating_sum: Set(p.reviews_rating_sum),
            reviews_count: Set(p.reviews_count),
            tags: Set(p.tags),
            created_at: Set(p.created_at),
            modified_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(write_err)?;

        self.load(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let tx = self.db.begin().await?;

        if product::Entity::find_by_id(id).one(&tx).await?.is_none() {
            return Err(DomainError::not_found("Product", id));
        }

        product_review::Entity::delete_many()
            .filter(product_review::Column::ProductId.eq(id))
            .exec(&tx)
            .await?;
        product_image::Entity::delete_many()
            .filter(product_image::Column::ProductId.eq(id))
            .exec(&tx)
            .await?;
        product_pricing::Entity::delete_many()
            .filter(product_pricing::Column::ProductId.eq(id))
            .exec(&tx)
            .await?;
        product_attribute::Entity::delete_many()
            .filter(product_attribute::Column::ProductId.eq(id))
            .exec(&tx)
            .await?;
        product_category::Entity::delete_many()
            .filter(product_category::Column::ProductId.eq(id))
            .exec(&tx)
            .await?;
        product::Entity::delete_by_id(id).exec(&tx).await?;

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use sea_orm::{ConnectOptions, Database};
    use sea_orm_migration::MigratorTrait;

    async fn setup() -> (DatabaseConnection, SeaOrmProductRepository) {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        (db.clone(), SeaOrmProductRepository::new(db))
    }

    async fn add_review(db: &DatabaseConnection, product_id: i32, name: &str, rating: f64) {
        let now = Utc::now();
        product_review::ActiveModel {
            product_id: Set(product_id),
            rating: Set(Some(rating)),
            review_text: Set(Some("ok".into())),
            name: Set(name.into()),
            email: Set(None),
            status: Set(Some("approved".into())),
            is_featured: Set(false),
            tags: Set(None),
            images: Set(None),
            videos: Set(None),
            review_date: Set(Some(now)),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn add_image(db: &DatabaseConnection, product_id: i32, title: &str, sort_order: i32) {
        let now = Utc::now();
        product_image::ActiveModel {
            product_id: Set(product_id),
            title: Set(title.into()),
            alternate_text: Set(None),
            sort_order: Set(Some(sort_order)),
            url_tiny: Set(None),
            url_thumbnail: Set(None),
            url_standard: Set(Some(format!("https://cdn.test/{title}.png"))),
            url_zoom: Set(None),
            other_details: Set(None),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn add_pricing(db: &DatabaseConnection, product_id: i32, cents: i64) {
        let now = Utc::now();
        product_pricing::ActiveModel {
            product_id: Set(product_id),
            customer_group_id: Set("retail".into()),
            selling_price: Set(cents),
            min_order_quantity: Set(1),
            max_order_quantity: Set(10),
            incremental_quantity: Set(1),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    async fn add_attribute(db: &DatabaseConnection, product_id: i32, name: &str) -> i32 {
        let now = Utc::now();
        let attr = attribute::ActiveModel {
            name: Set(name.into()),
            attribute_type: Set(Some("text".into())),
            default_value: Set("n/a".into()),
            is_visible: Set(true),
            is_filterable: Set(false),
            is_required: Set(false),
            is_localized: Set(false),
            active: Set(true),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        product_attribute::ActiveModel {
            product_id: Set(Some(product_id)),
            attribute_id: Set(Some(attr.id)),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        attr.id
    }

    async fn add_category(db: &DatabaseConnection, product_id: i32, name: &str) -> i32 {
        let now = Utc::now();
        let cat = crate::infrastructure::database::entities::category::ActiveModel {
            name: Set(name.into()),
            description: Set(None),
            active: Set(true),
            parent_category_id: Set(None),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        product_category::ActiveModel {
            product_id: Set(Some(product_id)),
            category_id: Set(Some(cat.id)),
            created_at: Set(now),
            modified_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        cat.id
    }

    #[tokio::test]
    async fn find_by_id_hydrates_relations() {
        let (db, repo) = setup().await;
        let p = repo.create(NewProduct::named("Lamp")).await.unwrap();
        let id = p.product.id;

        add_review(&db, id, "alice", 4.5).await;
        add_review(&db, id, "bob", 3.0).await;
        add_image(&db, id, "back", 2).await;
        add_image(&db, id, "front", 1).await;
        add_pricing(&db, id, 1999).await;
        add_attribute(&db, id, "colour").await;

        let details = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(details.reviews.len(), 2);
        assert_eq!(details.reviews[0].name, "alice");
        let titles: Vec<_> = details.images.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["front", "back"]);
        assert_eq!(details.pricing.unwrap().selling_price_major(), 19.99);
        assert_eq!(details.attributes[0].name, "colour");
    }

    #[tokio::test]
    async fn missing_relations_are_empty() {
        let (_, repo) = setup().await;
        let p = repo.create(NewProduct::named("Bare")).await.unwrap();
        let details = repo.find_by_id(p.product.id).await.unwrap().unwrap();
        assert!(details.reviews.is_empty());
        assert!(details.images.is_empty());
        assert!(details.pricing.is_none());
        assert!(details.attributes.is_empty());
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_page_orders_by_id_and_keeps_relations_apart() {
        let (db, repo) = setup().await;
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(repo.create(NewProduct::named(format!("P{i}"))).await.unwrap().product.id);
        }
        add_review(&db, ids[3], "only-on-3", 5.0).await;

        let page = repo
            .find_page(&ProductFilter::all(), PageRequest::new(2, 2))
            .await
            .unwrap();
        let names: Vec<_> = page.iter().map(|d| d.product.name.as_str()).collect();
        assert_eq!(names, ["P2", "P3"]);
        assert!(page[0].reviews.is_empty());
        assert_eq!(page[1].reviews.len(), 1);
        assert_eq!(repo.count(&ProductFilter::all()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn filters_by_active_and_category() {
        let (db, repo) = setup().await;
        let a = repo.create(NewProduct::named("a")).await.unwrap();
        repo.create(NewProduct {
            active: false,
            ..NewProduct::named("b")
        })
        .await
        .unwrap();
        let cat = add_category(&db, a.product.id, "lighting").await;

        assert_eq!(repo.count(&ProductFilter::active_only()).await.unwrap(), 1);
        let by_category = ProductFilter {
            category_id: Some(cat),
            ..Default::default()
        };
        let page = repo.find_page(&by_category, PageRequest::new(10, 0)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].product.name, "a");
    }

    #[tokio::test]
    async fn sku_exists_can_exclude_an_id() {
        let (_, repo) = setup().await;
        let p = repo
            .create(NewProduct {
                sku: Some("SKU-1".into()),
                ..NewProduct::named("a")
            })
            .await
            .unwrap();
        assert!(repo.sku_exists("SKU-1", None).await.unwrap());
        assert!(!repo.sku_exists("SKU-1", Some(p.product.id)).await.unwrap());
        assert!(!repo.sku_exists("SKU-2", None).await.unwrap());
    }

    #[tokio::test]
    async fn unique_index_violation_is_a_conflict() {
        let (_, repo) = setup().await;
        let with_sku = |name: &str| NewProduct {
            sku: Some("DUP".into()),
            ..NewProduct::named(name)
        };
        repo.create(with_sku("a")).await.unwrap();
        assert!(matches!(
            repo.create(with_sku("b")).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn update_applies_partial_changes() {
        let (_, repo) = setup().await;
        let p = repo.create(NewProduct::named("old")).await.unwrap();
        let changes = ProductChanges {
            name: Some("new".into()),
            product_type: Some(ProductType::Digital),
            ..Default::default()
        };
        let updated = repo.update(p.product.id, changes).await.unwrap();
        assert_eq!(updated.product.name, "new");
        assert_eq!(updated.product.product_type, Some(ProductType::Digital));
        assert!(updated.product.active);

        let set_sku = ProductChanges {
            sku: Some(Some("S-1".into())),
            ..Default::default()
        };
        let with_sku = repo.update(p.product.id, set_sku).await.unwrap();
        assert_eq!(with_sku.product.sku.as_deref(), Some("S-1"));
        let clear_sku = ProductChanges {
            sku: Some(None),
            ..Default::default()
        };
        let cleared = repo.update(p.product.id, clear_sku).await.unwrap();
        assert_eq!(cleared.product.sku, None);

        assert!(matches!(
            repo.update(999, ProductChanges::default()).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_removes_owned_records() {
        let (db, repo) = setup().await;
        let p = repo.create(NewProduct::named("gone")).await.unwrap();
        let id = p.product.id;
        add_review(&db, id, "r", 1.0).await;
        add_image(&db, id, "i", 1).await;
        add_pricing(&db, id, 100).await;
        add_attribute(&db, id, "size").await;

        repo.delete(id).await.unwrap();

        assert!(repo.find_by_id(id).await.unwrap().is_none());
        assert_eq!(product_review::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(product_image::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(product_pricing::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(product_attribute::Entity::find().count(&db).await.unwrap(), 0);
        // shared attribute rows survive
        assert_eq!(attribute::Entity::find().count(&db).await.unwrap(), 1);
        assert!(matches!(
            repo.delete(id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
