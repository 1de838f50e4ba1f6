//! HTTP REST API interfaces
//!
//! - `common`: Response envelopes, error mapping, validated extractors
//! - `modules`: Per-resource DTOs and handlers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
