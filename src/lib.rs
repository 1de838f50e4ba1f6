//! # Product Catalog Service
//!
//! REST API over a relational product catalog: paginated product listing,
//! single-product retrieval and nested serialization of each product with
//! its reviews, images, pricing and attributes.
//!
//! ## Architecture
//!
//! - **domain**: Catalog entities and repository traits
//! - **application**: Catalog use cases (listing, retrieval, SKU checks)
//! - **infrastructure**: SeaORM entities, migrations, repositories, in-memory storage
//! - **interfaces**: HTTP API (axum) with response envelopes and Swagger docs
//! - **shared**: Pagination, errors, shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
