//! Limit/offset pagination
//!
//! [`Paginator`] clamps raw `limit`/`offset` query values to the configured
//! [`PaginationBounds`], derives [`PageMetadata`] from a total record count
//! and slices collections. Storage backends plug in through [`PageSource`],
//! a count-and-slice capability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::ConfigError;
use crate::shared::errors::DomainResult;

/// Configured limit bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationBounds {
    /// Limit used when the query does not carry one.
    pub default_limit: u64,
    /// Smallest accepted limit. Must be at least 1.
    pub min_limit: u64,
    /// Largest accepted limit.
    pub max_limit: u64,
}

impl Default for PaginationBounds {
    fn default() -> Self {
        Self {
            default_limit: 10,
            min_limit: 1,
            max_limit: 100,
        }
    }
}

impl PaginationBounds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_limit == 0 {
            return Err(ConfigError::Invalid(
                "pagination.min_limit must be at least 1".to_string(),
            ));
        }
        if self.min_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "pagination.min_limit ({}) exceeds pagination.max_limit ({})",
                self.min_limit, self.max_limit
            )));
        }
        if !(self.min_limit..=self.max_limit).contains(&self.default_limit) {
            return Err(ConfigError::Invalid(format!(
                "pagination.default_limit ({}) must lie within [{}, {}]",
                self.default_limit, self.min_limit, self.max_limit
            )));
        }
        Ok(())
    }

    fn clamp_limit(&self, limit: Option<i64>) -> u64 {
        match limit {
            None => self.default_limit,
            Some(limit) => (limit.max(0) as u64).clamp(self.min_limit, self.max_limit),
        }
    }
}

/// A single limit/offset query, already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u64,
    offset: u64,
}

impl PageRequest {
    /// A zero limit is raised to 1.
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: limit.max(1),
            offset,
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// At most `limit` records starting at `offset`; empty past the end.
    pub fn slice<'a, T>(&self, collection: &'a [T]) -> &'a [T] {
        let len = collection.len();
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(len);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        let end = start.saturating_add(take).min(len);
        &collection[start..end]
    }
}

/// Page description embedded in list responses.
///
/// `current_page` is derived from the offset alone, so it can point past
/// `total_pages` when the offset runs beyond the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageMetadata {
    pub total_records: u64,
    pub total_pages: u64,
    #[serde(skip)]
    pub current_page: u64,
    pub previous_page: Option<u64>,
    pub next_page: Option<u64>,
    pub limit: u64,
}

impl PageMetadata {
    pub fn compute(total_records: u64, request: PageRequest) -> Self {
        let limit = request.limit();
        let total_pages = total_records.div_ceil(limit);
        let current_page = request.offset() / limit + 1;

        Self {
            total_records,
            total_pages,
            current_page,
            previous_page: (current_page > 1).then(|| current_page - 1),
            next_page: (current_page < total_pages).then(|| current_page + 1),
            limit,
        }
    }
}

/// A slice of records plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub metadata: PageMetadata,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            metadata: self.metadata,
        }
    }
}

/// Count-and-slice capability of an ordered, filtered collection.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    async fn count(&self) -> DomainResult<u64>;

    /// Records in collection order, at most `request.limit()` from `request.offset()`.
    async fn fetch(&self, request: PageRequest) -> DomainResult<Vec<Self::Item>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Paginator {
    bounds: PaginationBounds,
}

impl Paginator {
    pub fn new(bounds: PaginationBounds) -> Result<Self, ConfigError> {
        bounds.validate()?;
        Ok(Self { bounds })
    }

    pub fn bounds(&self) -> &PaginationBounds {
        &self.bounds
    }

    /// Clamp raw query values. Missing limit falls back to the default,
    /// missing or negative offset to 0.
    pub fn request(&self, limit: Option<i64>, offset: Option<i64>) -> PageRequest {
        PageRequest::new(
            self.bounds.clamp_limit(limit),
            offset.unwrap_or(0).max(0) as u64,
        )
    }

    pub fn paginate(&self, total: u64, limit: i64, offset: i64) -> PageMetadata {
        PageMetadata::compute(total, self.request(Some(limit), Some(offset)))
    }

    pub fn slice<'a, T>(&self, collection: &'a [T], limit: i64, offset: i64) -> &'a [T] {
        self.request(Some(limit), Some(offset)).slice(collection)
    }

    /// Count the source, then fetch the requested window. An offset at or
    /// past the total skips the fetch.
    pub async fn fetch_page<S>(&self, source: &S, request: PageRequest) -> DomainResult<Page<S::Item>>
    where
        S: PageSource + ?Sized,
    {
        let total = source.count().await?;
        let metadata = PageMetadata::compute(total, request);
        let items = if request.offset() >= total {
            Vec::new()
        } else {
            source.fetch(request).await?
        };
        Ok(Page { items, metadata })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator() -> Paginator {
        Paginator::default()
    }

    #[test]
    fn first_page_of_three() {
        let meta = paginator().paginate(25, 10, 0);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.previous_page, None);
        assert_eq!(meta.next_page, Some(2));
        assert_eq!(meta.limit, 10);
    }

    #[test]
    fn last_page_of_three() {
        let meta = paginator().paginate(25, 10, 20);
        assert_eq!(meta.current_page, 3);
        assert_eq!(meta.previous_page, Some(2));
        assert_eq!(meta.next_page, None);
    }

    #[test]
    fn empty_collection_is_page_one_of_zero() {
        let meta = paginator().paginate(0, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.previous_page, None);
        assert_eq!(meta.next_page, None);
    }

    #[test]
    fn limit_is_clamped_not_rejected() {
        let p = paginator();
        assert_eq!(p.paginate(50, 0, 0).limit, 1);
        assert_eq!(p.paginate(50, -7, 0).limit, 1);
        assert_eq!(p.paginate(500, 1000, 0).limit, 100);
        assert_eq!(p.request(None, None).limit(), 10);
    }

    #[test]
    fn negative_offset_is_clamped_to_zero() {
        let request = paginator().request(Some(10), Some(-30));
        assert_eq!(request.offset(), 0);
        assert_eq!(paginator().paginate(25, 10, -30).current_page, 1);
    }

    #[test]
    fn metadata_invariants_hold_across_inputs() {
        let p = paginator();
        for total in [0u64, 1, 9, 10, 11, 99, 100, 101, 250] {
            for limit in [1i64, 2, 3, 10, 33, 100] {
                for offset in [0i64, 1, 9, 10, 25, 99, 100, 300] {
                    let meta = p.paginate(total, limit, offset);
                    let limit = limit as u64;
                    let offset = offset as u64;

                    assert_eq!(meta.total_pages, (total + limit - 1) / limit);
                    assert_eq!(meta.current_page, offset / limit + 1);

                    if meta.current_page == 1 {
                        assert_eq!(meta.previous_page, None);
                    } else {
                        assert_eq!(meta.previous_page, Some(meta.current_page - 1));
                    }

                    if meta.current_page >= meta.total_pages {
                        assert_eq!(meta.next_page, None);
                    } else {
                        assert_eq!(meta.next_page, Some(meta.current_page + 1));
                        assert!(meta.current_page + 1 <= meta.total_pages);
                    }
                }
            }
        }
    }

    #[test]
    fn paginate_is_pure() {
        let p = paginator();
        assert_eq!(p.paginate(42, 7, 14), p.paginate(42, 7, 14));
    }

    #[test]
    fn slice_returns_window() {
        let items: Vec<u32> = (0..25).collect();
        let p = paginator();
        assert_eq!(p.slice(&items, 10, 0), &items[0..10]);
        assert_eq!(p.slice(&items, 10, 20), &items[20..25]);
    }

    #[test]
    fn slice_past_end_is_empty() {
        let items: Vec<u32> = (0..5).collect();
        let p = paginator();
        assert!(p.slice(&items, 10, 5).is_empty());
        assert!(p.slice(&items, 10, 500).is_empty());
        assert!(p.slice::<u32>(&[], 10, 0).is_empty());
    }

    #[test]
    fn metadata_serializes_without_current_page() {
        let meta = paginator().paginate(25, 10, 10);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total_records": 25,
                "total_pages": 3,
                "previous_page": 1,
                "next_page": 3,
                "limit": 10
            })
        );
    }

    #[test]
    fn invalid_bounds_are_configuration_errors() {
        let zero_min = PaginationBounds {
            min_limit: 0,
            ..Default::default()
        };
        assert!(Paginator::new(zero_min).is_err());

        let inverted = PaginationBounds {
            default_limit: 10,
            min_limit: 50,
            max_limit: 20,
        };
        assert!(Paginator::new(inverted).is_err());

        let default_outside = PaginationBounds {
            default_limit: 200,
            ..Default::default()
        };
        assert!(Paginator::new(default_outside).is_err());

        assert!(Paginator::new(PaginationBounds::default()).is_ok());
    }

    struct VecSource(Vec<u32>);

    #[async_trait]
    impl PageSource for VecSource {
        type Item = u32;

        async fn count(&self) -> DomainResult<u64> {
            Ok(self.0.len() as u64)
        }

        async fn fetch(&self, request: PageRequest) -> DomainResult<Vec<u32>> {
            Ok(request.slice(&self.0).to_vec())
        }
    }

    #[tokio::test]
    async fn fetch_page_combines_count_and_slice() {
        let source = VecSource((1..=25).collect());
        let p = paginator();

        let page = p.fetch_page(&source, p.request(Some(10), Some(20))).await.unwrap();
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.metadata.total_records, 25);
        assert_eq!(page.metadata.next_page, None);

        let beyond = p.fetch_page(&source, p.request(Some(10), Some(40))).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.metadata.current_page, 5);
    }
}
