//! Product image entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub product_id: i32,

    pub title: String,

    #[sea_orm(nullable)]
    pub alternate_text: Option<String>,

    /// Display position, lower first
    #[sea_orm(nullable)]
    pub sort_order: Option<i32>,

    #[sea_orm(nullable)]
    pub url_tiny: Option<String>,
    #[sea_orm(nullable)]
    pub url_thumbnail: Option<String>,
    #[sea_orm(nullable)]
    pub url_standard: Option<String>,
    #[sea_orm(nullable)]
    pub url_zoom: Option<String>,

    #[sea_orm(nullable)]
    pub other_details: Option<Json>,

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
