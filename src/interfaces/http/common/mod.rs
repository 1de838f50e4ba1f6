//! Shared HTTP plumbing: envelopes, error mapping, enveloped extractors

pub mod assembler;
pub mod error;
pub mod extract;

pub use assembler::{Envelope, ListContent, Resource, ResponseAssembler, SingleContent};
pub use error::ApiError;
pub use extract::{ApiPath, ApiQuery, ValidatedJson};
