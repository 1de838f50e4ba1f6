pub mod services;

// Re-export key types for convenience
pub use services::{ProductService, DUPLICATE_SKU_MESSAGE};
