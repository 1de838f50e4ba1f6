pub mod product;
pub mod repositories;

// Re-export commonly used types
pub use product::{
    Attribute, NewProduct, Product, ProductChanges, ProductDetails, ProductFilter, ProductImage,
    ProductPricing, ProductRepository, ProductReview, ProductType,
};
pub use repositories::{DomainResult, RepositoryProvider};

pub use crate::shared::errors::DomainError;
