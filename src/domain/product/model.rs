//! Product aggregate
//!
//! A [`Product`] owns its reviews, images and optional pricing record.
//! Attributes are shared records linked through a join table; the
//! repository resolves them into [`ProductDetails::attributes`].

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::shared::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductType {
    Physical,
    Digital,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Digital => "digital",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "physical" => Ok(Self::Physical),
            "digital" => Ok(Self::Digital),
            other => Err(DomainError::Validation(format!(
                "\"{}\" is not a valid product_type",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub product_master_id: Option<String>,
    pub name: String,
    pub sku: Option<String>,
    pub product_type: Option<ProductType>,
    pub active: bool,
    pub stock_available: bool,
    pub is_featured: bool,
    pub on_offer: bool,
    pub on_subscription: bool,
    pub on_promotion: bool,
    pub has_variant: bool,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub reviews_rating_sum: Option<i32>,
    pub reviews_count: Option<i32>,
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductReview {
    pub id: i32,
    pub product_id: i32,
    pub rating: Option<f64>,
    pub review_text: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub status: Option<String>,
    pub is_featured: bool,
    pub tags: Option<Value>,
    pub images: Option<Value>,
    pub videos: Option<Value>,
    pub review_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub title: String,
    pub alternate_text: Option<String>,
    pub sort_order: Option<i32>,
    pub url_tiny: Option<String>,
    pub url_thumbnail: Option<String>,
    pub url_standard: Option<String>,
    pub url_zoom: Option<String>,
    pub other_details: Option<Value>,
}

/// Pricing for a product. Amounts are in minor currency units (cents).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPricing {
    pub id: i32,
    pub product_id: i32,
    pub customer_group_id: String,
    pub selling_price: i64,
    pub min_order_quantity: i32,
    pub max_order_quantity: i32,
    pub incremental_quantity: i32,
}

impl ProductPricing {
    /// Selling price in major units, e.g. `1999` -> `19.99`
    pub fn selling_price_major(&self) -> f64 {
        self.selling_price as f64 / 100.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: i32,
    pub name: String,
    pub attribute_type: Option<String>,
    pub default_value: String,
    pub is_visible: bool,
    pub is_filterable: bool,
    pub is_required: bool,
    pub is_localized: bool,
    pub active: bool,
}

/// A product with every relation hydrated.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub product: Product,
    pub reviews: Vec<ProductReview>,
    pub images: Vec<ProductImage>,
    pub pricing: Option<ProductPricing>,
    pub attributes: Vec<Attribute>,
}

impl ProductDetails {
    /// A product with no related records.
    pub fn bare(product: Product) -> Self {
        Self {
            product,
            reviews: Vec::new(),
            images: Vec::new(),
            pricing: None,
            attributes: Vec::new(),
        }
    }
}

/// Writable product fields for creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_master_id: Option<String>,
    pub name: String,
    pub sku: Option<String>,
    pub product_type: Option<ProductType>,
    pub active: bool,
    pub stock_available: bool,
    pub is_featured: bool,
    pub on_offer: bool,
    pub on_subscription: bool,
    pub on_promotion: bool,
    pub has_variant: bool,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub reviews_rating_sum: Option<i32>,
    pub reviews_count: Option<i32>,
    pub tags: Option<String>,
}

impl NewProduct {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            product_master_id: None,
            name: name.into(),
            sku: None,
            product_type: None,
            active: true,
            stock_available: true,
            is_featured: false,
            on_offer: false,
            on_subscription: false,
            on_promotion: false,
            has_variant: false,
            short_description: None,
            description: None,
            reviews_rating_sum: None,
            reviews_count: None,
            tags: None,
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub product_master_id: Option<String>,
    pub name: Option<String>,
    /// `Some(None)` clears the SKU.
    pub sku: Option<Option<String>>,
    pub product_type: Option<ProductType>,
    pub active: Option<bool>,
    pub stock_available: Option<bool>,
    pub is_featured: Option<bool>,
    pub on_offer: Option<bool>,
    pub on_subscription: Option<bool>,
    pub on_promotion: Option<bool>,
    pub has_variant: Option<bool>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub reviews_rating_sum: Option<i32>,
    pub reviews_count: Option<i32>,
    pub tags: Option<String>,
}

impl ProductChanges {
    pub fn apply(self, product: &mut Product) {
        if let Some(v) = self.product_master_id {
            product.product_master_id = Some(v);
        }
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.sku {
            product.sku = v;
        }
        if let Some(v) = self.product_type {
            product.product_type = Some(v);
        }
        if let Some(v) = self.active {
            product.active = v;
        }
        if let Some(v) = self.stock_available {
            product.stock_available = v;
        }
        if let Some(v) = self.is_featured {
            product.is_featured = v;
        }
        if let Some(v) = self.on_offer {
            product.on_offer = v;
        }
        if let Some(v) = self.on_subscription {
            product.on_subscription = v;
        }
        if let Some(v) = self.on_promotion {
            product.on_promotion = v;
        }
        if let Some(v) = self.has_variant {
            product.has_variant = v;
        }
        if let Some(v) = self.short_description {
            product.short_description = Some(v);
        }
        if let Some(v) = self.description {
            product.description = Some(v);
        }
        if let Some(v) = self.reviews_rating_sum {
            product.reviews_rating_sum = Some(v);
        }
        if let Some(v) = self.reviews_count {
            product.reviews_count = Some(v);
        }
        if let Some(v) = self.tags {
            product.tags = Some(v);
        }
    }
}

/// Query predicate for product listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub active: Option<bool>,
    pub category_id: Option<i32>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn active_only() -> Self {
        Self {
            active: Some(true),
            category_id: None,
        }
    }
}
