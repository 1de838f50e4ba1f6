//! Product entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product type
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(128))")]
pub enum ProductType {
    #[sea_orm(string_value = "physical")]
    Physical,
    #[sea_orm(string_value = "digital")]
    Digital,
}

/// Product model - an item that can be purchased
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Identifier in an upstream product master system
    #[sea_orm(nullable)]
    pub product_master_id: Option<String>,

    pub name: String,

    /// Stock keeping unit, unique when present
    #[sea_orm(nullable)]
    pub sku: Option<String>,

    #[sea_orm(nullable)]
    pub product_type: Option<ProductType>,

    pub active: bool,
    pub stock_available: bool,
    pub is_featured: bool,
    pub on_offer: bool,
    pub on_subscription: bool,
    pub on_promotion: bool,
    pub has_variant: bool,

    #[sea_orm(nullable)]
    pub short_description: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(nullable)]
    pub reviews_rating_sum: Option<i32>,

    #[sea_orm(nullable)]
    pub reviews_count: Option<i32>,

    /// Free-form comma separated tags
    #[sea_orm(nullable)]
    pub tags: Option<String>,

    pub created_at: DateTimeUtc,
    pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::product_image::Entity")]
    Images,
    #[sea_orm(has_one = "super::product_pricing::Entity")]
    Pricing,
    #[sea_orm(has_many = "super::product_attribute::Entity")]
    ProductAttributes,
    #[sea_orm(has_many = "super::product_category::Entity")]
    ProductCategories,
}

impl Related<super::product_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::product_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl Related<super::product_pricing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pricing.def()
    }
}

impl Related<super::product_attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductAttributes.def()
    }
}

impl Related<super::product_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductCategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
