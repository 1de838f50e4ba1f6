//! Repository access for the domain layer

use super::product::ProductRepository;

pub use crate::shared::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let product = repos.products().find_by_id(42).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn products(&self) -> &dyn ProductRepository;
}
