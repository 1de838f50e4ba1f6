pub mod product;

pub use product::{ProductService, DUPLICATE_SKU_MESSAGE};
