//! Attribute entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attributes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Value type hint, e.g. "string", "number", "color"
    #[sea_orm(column_name = "type", nullable)]
    pub attribute_type: Option<String>,

    pub default_value: String,
    pub is_visible: bool,
    pub is_filterable: bool,
    pub is_required: bool,
    pub is_localized: bool,
    pub active: bool,

    pub created_at: DateTimeUtc,
    pub modified_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_attribute::Entity")]
    ProductAttributes,
}

impl Related<super::product_attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductAttributes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
