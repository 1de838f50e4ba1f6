//! Product review entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub product_id: i32,

    /// Rating with one decimal place, e.g. 4.5
    #[sea_orm(nullable)]
    pub rating: Option<f64>,

    #[sea_orm(column_type = "Text", nullable)]
    pub review_text: Option<String>,

    /// Reviewer display name
    pub name: String,

    #[sea_orm(nullable)]
    pub email: Option<String>,

    #[sea_orm(nullable)]
    pub status: Option<String>,

    pub is_featured: bool,

    /// JSON arrays
    #[sea_orm(nullable)]
    pub tags: Option<Json>,
    #[sea_orm(nullable)]
    pub images: Option<Json>,
    #[sea_orm(nullable)]
    pub videos: Option<Json>,

    #[sea_orm(nullable)]
    pub review_date: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
    pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
