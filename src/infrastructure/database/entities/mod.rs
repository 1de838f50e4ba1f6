//! Database entities module

pub mod attribute;
pub mod category;
pub mod product;
pub mod product_attribute;
pub mod product_category;
pub mod product_image;
pub mod product_pricing;
pub mod product_review;

pub use attribute::Entity as Attribute;
pub use category::Entity as Category;
pub use product::Entity as Product;
pub use product_attribute::Entity as ProductAttribute;
pub use product_category::Entity as ProductCategory;
pub use product_image::Entity as ProductImage;
pub use product_pricing::Entity as ProductPricing;
pub use product_review::Entity as ProductReview;
