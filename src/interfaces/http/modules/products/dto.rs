//! Product DTOs
//!
//! [`ProductDto`] is the expanded, nested representation of a product. Its
//! field set and order are part of the public contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{
    Attribute, DomainError, NewProduct, ProductChanges, ProductDetails, ProductFilter,
    ProductImage, ProductPricing, ProductReview, ProductType,
};
use crate::interfaces::http::common::Resource;
use crate::shared::pagination::PageMetadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub product_id: i32,
    pub rating: Option<f64>,
    pub review_text: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub status: Option<String>,
    pub is_featured: bool,
    #[schema(value_type = Option<Object>)]
    pub tags: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub images: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub videos: Option<Value>,
    pub review_date: Option<DateTime<Utc>>,
}

impl From<ProductReview> for ReviewDto {
    fn from(r: ProductReview) -> Self {
        Self {
            product_id: r.product_id,
            rating: r.rating,
            review_text: r.review_text,
            name: r.name,
            email: r.email,
            status: r.status,
            is_featured: r.is_featured,
            tags: r.tags,
            images: r.images,
            videos: r.videos,
            review_date: r.review_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageDto {
    pub title: String,
    pub alternate_text: Option<String>,
    pub sort_order: Option<i32>,
    pub url_tiny: Option<String>,
    pub url_thumbnail: Option<String>,
    pub url_standard: Option<String>,
    pub url_zoom: Option<String>,
}

impl From<ProductImage> for ImageDto {
    fn from(i: ProductImage) -> Self {
        Self {
            title: i.title,
            alternate_text: i.alternate_text,
            sort_order: i.sort_order,
            url_tiny: i.url_tiny,
            url_thumbnail: i.url_thumbnail,
            url_standard: i.url_standard,
            url_zoom: i.url_zoom,
        }
    }
}

/// Pricing with `selling_price` in major currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PricingDto {
    pub selling_price: f64,
    pub min_order_quantity: i32,
    pub max_order_quantity: i32,
    pub incremental_quantity: i32,
}

impl From<ProductPricing> for PricingDto {
    fn from(p: ProductPricing) -> Self {
        Self {
            selling_price: p.selling_price_major(),
            min_order_quantity: p.min_order_quantity,
            max_order_quantity: p.max_order_quantity,
            incremental_quantity: p.incremental_quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttributeDto {
    pub name: String,
    #[serde(rename = "type")]
    pub attribute_type: Option<String>,
    pub default_value: String,
    pub is_visible: bool,
    pub is_filterable: bool,
}

impl From<Attribute> for AttributeDto {
    fn from(a: Attribute) -> Self {
        Self {
            name: a.name,
            attribute_type: a.attribute_type,
            default_value: a.default_value,
            is_visible: a.is_visible,
            is_filterable: a.is_filterable,
        }
    }
}

/// Product with reviews, images, pricing and attributes inlined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    #[schema(example = "physical")]
    pub product_type: Option<String>,
    pub active: bool,
    pub sku: Option<String>,
    pub stock_available: bool,
    pub is_featured: bool,
    pub on_offer: bool,
    pub on_subscription: bool,
    pub on_promotion: bool,
    pub has_variant: bool,
    pub reviews_rating_sum: Option<i32>,
    pub reviews_count: Option<i32>,
    pub reviews: Vec<ReviewDto>,
    pub images: Vec<ImageDto>,
    pub pricing: Option<PricingDto>,
    pub attributes: Vec<AttributeDto>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Resource for ProductDto {
    const SINGULAR: &'static str = "product";
    const PLURAL: &'static str = "products";
}

/// Merge a hydrated product's own fields with its related records.
pub fn expand(details: ProductDetails) -> ProductDto {
    let p = details.product;
    ProductDto {
        id: p.id,
        name: p.name,
        description: p.description,
        short_description: p.short_description,
        product_type: p.product_type.map(|t| t.to_string()),
        active: p.active,
        sku: p.sku,
        stock_available: p.stock_available,
        is_featured: p.is_featured,
        on_offer: p.on_offer,
        on_subscription: p.on_subscription,
        on_promotion: p.on_promotion,
        has_variant: p.has_variant,
        reviews_rating_sum: p.reviews_rating_sum,
        reviews_count: p.reviews_count,
        reviews: details.reviews.into_iter().map(Into::into).collect(),
        images: details.images.into_iter().map(Into::into).collect(),
        pricing: details.pricing.map(Into::into),
        attributes: details.attributes.into_iter().map(Into::into).collect(),
        created_at: p.created_at,
        modified_at: p.modified_at,
    }
}

impl From<ProductDetails> for ProductDto {
    fn from(details: ProductDetails) -> Self {
        expand(details)
    }
}

// ── Requests ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 128, message = "name is required"))]
    pub name: String,
    #[validate(length(max = 128))]
    pub product_master_id: Option<String>,
    #[validate(length(max = 128))]
    pub sku: Option<String>,
    /// `physical` or `digital`
    #[schema(example = "physical")]
    pub product_type: Option<String>,
    pub active: Option<bool>,
    pub stock_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub on_offer: Option<bool>,
    pub on_subscription: Option<bool>,
    pub on_promotion: Option<bool>,
    pub has_variant: Option<bool>,
    #[validate(length(max = 128))]
    pub short_description: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub reviews_rating_sum: Option<i32>,
    #[validate(range(min = 0))]
    pub reviews_count: Option<i32>,
    #[validate(length(max = 128))]
    pub tags: Option<String>,
}

fn parse_product_type(raw: Option<String>) -> Result<Option<ProductType>, DomainError> {
    raw.map(|s| s.parse()).transpose()
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = DomainError;

    fn try_from(r: CreateProductRequest) -> Result<Self, Self::Error> {
        let product_type = parse_product_type(r.product_type)?;
        let defaults = NewProduct::named(r.name);
        Ok(Self {
            product_master_id: r.product_master_id,
            sku: r.sku,
            product_type,
            active: r.active.unwrap_or(defaults.active),
            stock_available: r.stock_available.unwrap_or(defaults.stock_available),
            is_featured: r.is_featured.unwrap_or(defaults.is_featured),
            on_offer: r.on_offer.unwrap_or(defaults.on_offer),
            on_subscription: r.on_subscription.unwrap_or(defaults.on_subscription),
            on_promotion: r.on_promotion.unwrap_or(defaults.on_promotion),
            has_variant: r.has_variant.unwrap_or(defaults.has_variant),
            short_description: r.short_description,
            description: r.description,
            reviews_rating_sum: r.reviews_rating_sum,
            reviews_count: r.reviews_count,
            tags: r.tags,
            ..defaults
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 128, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(max = 128))]
    pub product_master_id: Option<String>,
    /// A blank value clears the SKU
    #[validate(length(max = 128))]
    pub sku: Option<String>,
    #[schema(example = "digital")]
    pub product_type: Option<String>,
    pub active: Option<bool>,
    pub stock_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub on_offer: Option<bool>,
    pub on_subscription: Option<bool>,
    pub on_promotion: Option<bool>,
    pub has_variant: Option<bool>,
    #[validate(length(max = 128))]
    pub short_description: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub reviews_rating_sum: Option<i32>,
    #[validate(range(min = 0))]
    pub reviews_count: Option<i32>,
    #[validate(length(max = 128))]
    pub tags: Option<String>,
}

impl TryFrom<UpdateProductRequest> for ProductChanges {
    type Error = DomainError;

    fn try_from(r: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            product_master_id: r.product_master_id,
            name: r.name,
            sku: r.sku.map(Some),
            product_type: parse_product_type(r.product_type)?,
            active: r.active,
            stock_available: r.stock_available,
            is_featured: r.is_featured,
            on_offer: r.on_offer,
            on_subscription: r.on_subscription,
            on_promotion: r.on_promotion,
            has_variant: r.has_variant,
            short_description: r.short_description,
            description: r.description,
            reviews_rating_sum: r.reviews_rating_sum,
            reviews_count: r.reviews_count,
            tags: r.tags,
        })
    }
}

// ── Query parameters ────────────────────────────────────────────

/// Listing query. Non-numeric `limit`/`offset` values are treated as absent.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// Page size, clamped to the configured bounds (default 10)
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,
    /// Number of records to skip (default 0)
    #[serde(default, deserialize_with = "lenient_i64")]
    pub offset: Option<i64>,
    /// Only products with this `active` flag
    pub active: Option<bool>,
    /// Only products linked to this category
    pub category_id: Option<i32>,
}

impl ListProductsParams {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            active: self.active,
            category_id: self.category_id,
        }
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_saturating(s.trim())))
}

/// Integer text that overflows `i64` saturates so it can still be clamped.
fn parse_saturating(s: &str) -> Option<i64> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(s.parse().unwrap_or(if s.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

// ── OpenAPI-only envelope shapes ────────────────────────────────

#[derive(Serialize, ToSchema)]
pub struct ProductListContent {
    pub products: Vec<ProductDto>,
    pub pagination: PageMetadata,
}

/// Response of `GET /api/v1/products`
#[derive(Serialize, ToSchema)]
pub struct ProductListEnvelope {
    pub success: bool,
    #[schema(example = "Products retrieved successfully.")]
    pub message: String,
    pub content: ProductListContent,
}

#[derive(Serialize, ToSchema)]
pub struct ProductContent {
    pub product: Option<ProductDto>,
}

/// Response carrying one product (or `null`)
#[derive(Serialize, ToSchema)]
pub struct ProductEnvelope {
    pub success: bool,
    pub message: String,
    pub content: ProductContent,
}

/// Envelope without content, used for errors and deletes
#[derive(Serialize, ToSchema)]
pub struct MessageEnvelope {
    pub success: bool,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub content: Option<Value>,
}
