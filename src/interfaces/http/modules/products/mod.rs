//! `/api/v1/products` resource

pub mod dto;
pub mod handlers;

pub use dto::{expand, ProductDto};
pub use handlers::ProductState;
