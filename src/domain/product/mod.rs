//! Product aggregate
//!
//! Contains the Product entity, its nested relations and the repository interface.

pub mod model;
pub mod repository;

pub use model::{
    Attribute, NewProduct, Product, ProductChanges, ProductDetails, ProductFilter, ProductImage,
    ProductPricing, ProductReview, ProductType,
};
pub use repository::ProductRepository;
